use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::app::REFRESH_INTERVAL;
use crate::domain::FilterMode;

#[derive(Parser, Debug)]
#[command(name = "arbitrage-desk")]
#[command(about = "Landed-cost and profit desk for cross-border vehicle arbitrage.")]
#[command(version)]
pub struct CommandLine {
    /// Use this CAD->USD rate instead of the configured sources
    #[arg(long, global = true)]
    pub rate: Option<f64>,

    /// Read the exchange rate from a saved FX snapshot
    #[arg(long, global = true, conflicts_with = "rate")]
    pub rate_file: Option<PathBuf>,

    /// Pricing policy JSON, overriding the saved settings
    #[arg(long, global = true)]
    pub policy: Option<PathBuf>,

    /// Live listings JSON merged over the built-in samples
    #[arg(long, global = true)]
    pub listings: Option<PathBuf>,

    /// Persist the effective policy and filter as the new defaults
    #[arg(long, global = true)]
    pub save_settings: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Evaluate every listing at the current rate
    #[command(alias = "inv")]
    Inventory {
        /// Case-insensitive match on make or model
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long, short, value_enum)]
        filter: Option<FilterArg>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Full cost breakdown for one listing
    #[command(alias = "q")]
    Quote {
        id: String,
        /// Seed for the simulated market comps
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Score a deal from days on market and profit
    #[command(alias = "c")]
    Confidence {
        #[arg(long)]
        days: u32,
        #[arg(long, allow_negative_numbers = true)]
        profit: f64,
    },
    /// Current wait times at the corridor crossings
    #[command(alias = "b")]
    Borders {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Refresh rate and listings on an interval and re-render
    #[command(alias = "w")]
    Watch {
        #[arg(long, default_value_t = REFRESH_INTERVAL.as_secs())]
        interval_secs: u64,
        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterArg {
    All,
    HighYield,
    NorthAmerican,
}

impl From<FilterArg> for FilterMode {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => FilterMode::All,
            FilterArg::HighYield => FilterMode::HighYield,
            FilterArg::NorthAmerican => FilterMode::NorthAmerican,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to run; a bare invocation lists the inventory.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Inventory {
            search: None,
            filter: None,
            json: false,
        })
    }
}
