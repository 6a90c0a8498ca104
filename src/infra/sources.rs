//! Collaborators that feed the desk with rates, listings and market data.
//!
//! Every external input goes through one of these traits so the pricing core
//! only ever sees plain values.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{BorderStatus, ExchangeRate, MarketComp, RateStatus, Vehicle};
use crate::infra::cache::{load_rate_cache, save_rate_cache, RateCache, RATE_CACHE_TTL};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("invalid exchange rate: {0}")]
    InvalidRate(f64),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub trait ExchangeRateSource: Send + Sync {
    fn name(&self) -> &str;
    fn current_rate(&self) -> Result<ExchangeRate, SourceError>;
}

pub trait InventorySource: Send + Sync {
    fn name(&self) -> &str;
    fn load(&self) -> Result<Vec<Vehicle>, SourceError>;
}

pub trait BorderFeed: Send {
    fn fetch_status(&mut self) -> Result<Vec<BorderStatus>, SourceError>;
}

pub trait MarketCompsSource: Send {
    fn comps(&mut self, year: u16, make: &str, model: &str) -> Result<MarketComp, SourceError>;
}

fn validate_rate(rate: f64) -> Result<f64, SourceError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(SourceError::InvalidRate(rate))
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// A rate supplied directly, e.g. from the command line.
#[derive(Clone, Debug)]
pub struct FixedRate {
    rate: f64,
}

impl FixedRate {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl ExchangeRateSource for FixedRate {
    fn name(&self) -> &str {
        "fixed"
    }

    fn current_rate(&self) -> Result<ExchangeRate, SourceError> {
        let rate = validate_rate(self.rate)?;
        Ok(ExchangeRate::new(rate, RateStatus::Fresh))
    }
}

/// Reads a saved FX snapshot of the form `{"base": "CAD", "rates": {"USD": 0.73}}`.
#[derive(Clone, Debug)]
pub struct JsonRateFile {
    path: PathBuf,
    quote: String,
}

#[derive(Debug, Deserialize)]
struct RateSnapshotDto {
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

impl JsonRateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quote: "USD".to_string(),
        }
    }
}

impl ExchangeRateSource for JsonRateFile {
    fn name(&self) -> &str {
        "rate-file"
    }

    fn current_rate(&self) -> Result<ExchangeRate, SourceError> {
        let content = read_file(&self.path)?;
        let snapshot: RateSnapshotDto = serde_json::from_str(&content)?;
        let rate = snapshot
            .rates
            .get(&self.quote)
            .copied()
            .ok_or_else(|| SourceError::Unavailable(format!("no {} quote in snapshot", self.quote)))?;

        let mut exchange_rate = ExchangeRate::new(validate_rate(rate)?, RateStatus::Fresh);
        if let Some(base) = snapshot.base {
            exchange_rate.base = base;
        }
        exchange_rate.quote = self.quote.clone();
        Ok(exchange_rate)
    }
}

/// Resolves a rate from the primary source, then the on-disk cache, then a constant.
pub struct FallbackRateSource {
    primary: Option<Box<dyn ExchangeRateSource>>,
    cache_path: Option<PathBuf>,
    cache_ttl: Duration,
    fallback: f64,
}

impl FallbackRateSource {
    pub fn new(fallback: f64) -> Self {
        Self {
            primary: None,
            cache_path: None,
            cache_ttl: RATE_CACHE_TTL,
            fallback,
        }
    }

    pub fn with_primary(mut self, primary: Box<dyn ExchangeRateSource>) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn with_cache(mut self, path: Option<PathBuf>) -> Self {
        self.cache_path = path;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Never fails; the worst case is the hardcoded fallback rate.
    pub fn resolve(&self) -> ExchangeRate {
        if let Some(primary) = &self.primary {
            match primary.current_rate() {
                Ok(rate) => {
                    debug!(source = primary.name(), rate = rate.rate, "exchange rate refreshed");
                    self.remember(&rate);
                    return rate;
                }
                Err(err) => {
                    warn!(source = primary.name(), error = %err, "exchange rate source failed");
                }
            }
        }

        if let Some(cached) = self.cached() {
            info!(rate = cached.rate, age = %cached.age_string(), "using cached exchange rate");
            return cached.to_rate();
        }

        warn!(rate = self.fallback, "FX fallback active");
        ExchangeRate::new(self.fallback, RateStatus::Fallback)
    }

    fn cached(&self) -> Option<RateCache> {
        let path = self.cache_path.as_deref()?;
        load_rate_cache(path).filter(|cache| !cache.is_expired(self.cache_ttl))
    }

    fn remember(&self, rate: &ExchangeRate) {
        let Some(path) = self.cache_path.as_deref() else {
            return;
        };
        if let Err(err) = save_rate_cache(path, &RateCache::from_rate(rate)) {
            warn!(error = %err, "failed to save rate cache");
        }
    }
}
