use std::time::{Duration, SystemTime};

use anyhow::{anyhow, Context};
use tracing::{debug, info, warn};

use crate::{
    cli::{CommandLine, Commands},
    domain::{
        evaluate_vehicle, market_confidence, rank_by_profit, DeskState, FALLBACK_EXCHANGE_RATE,
    },
    infra::{
        default_rate_cache_path, BorderFeed, FallbackRateSource, FixedRate, InventorySource,
        JsonInventoryFile, JsonRateFile, MarketCompsSource, SampleInventory, SimulatedBorderFeed,
        SimulatedMarketComps,
    },
    report,
    util::{
        persistence::{load_persisted_state, load_policy_file, save_persisted_state},
        version,
    },
};

/// How often rate and listings are refreshed in watch mode by default.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// A desk session: state plus the collaborators that refresh it.
pub struct Desk {
    pub state: DeskState,
    rates: FallbackRateSource,
    live: Option<Box<dyn InventorySource>>,
}

impl Desk {
    pub fn new(
        state: DeskState,
        rates: FallbackRateSource,
        live: Option<Box<dyn InventorySource>>,
    ) -> Self {
        Self { state, rates, live }
    }

    pub fn from_args(cli: &CommandLine) -> anyhow::Result<Self> {
        let mut state = DeskState::with_samples(SampleInventory.load()?);
        if let Some(saved) = load_persisted_state() {
            debug!("applying saved settings");
            state.apply_persisted(saved);
        }
        if let Some(path) = &cli.policy {
            state.policy = load_policy_file(path)
                .with_context(|| format!("failed to load policy from {}", path.display()))?;
        }

        let mut rates = FallbackRateSource::new(FALLBACK_EXCHANGE_RATE);
        if let Some(rate) = cli.rate {
            // an explicit rate is used as-is and never written to the cache
            rates = rates.with_primary(Box::new(FixedRate::new(rate)));
        } else {
            if let Some(path) = &cli.rate_file {
                rates = rates.with_primary(Box::new(JsonRateFile::new(path)));
            }
            rates = rates.with_cache(default_rate_cache_path());
        }

        let live = cli
            .listings
            .as_ref()
            .map(|path| Box::new(JsonInventoryFile::new(path)) as Box<dyn InventorySource>);

        Ok(Self::new(state, rates, live))
    }

    pub fn refresh_exchange_rate(&mut self) {
        let rate = self.rates.resolve();
        info!(pair = %rate.pair(), rate = rate.rate, status = ?rate.status, "exchange rate ready");
        self.state.set_exchange_rate(rate);
    }

    /// A failed live load keeps whatever listings the previous refresh produced.
    pub fn refresh_inventory(&mut self) {
        let Some(source) = &self.live else {
            return;
        };
        match source.load() {
            Ok(vehicles) => {
                self.state.set_live_vehicles(vehicles, SystemTime::now());
            }
            Err(err) => {
                warn!(source = source.name(), error = %err, "inventory sync failed");
            }
        }
    }

    pub fn refresh(&mut self) {
        self.refresh_exchange_rate();
        self.refresh_inventory();
    }

    pub fn inventory_report(&self) -> String {
        let mut summary = self.state.summary();
        rank_by_profit(&mut summary.items);
        report::render_inventory(&summary, &self.state.exchange_rate, &self.state.filter)
    }

    pub fn quote_report(
        &self,
        id: &str,
        comps: &mut dyn MarketCompsSource,
    ) -> anyhow::Result<String> {
        let inventory = self.state.inventory();
        let vehicle = inventory
            .iter()
            .find(|vehicle| vehicle.id == id)
            .ok_or_else(|| anyhow!("no listing with id '{id}'"))?;

        let evaluation = evaluate_vehicle(vehicle, self.state.exchange_rate.rate, &self.state.policy);
        let comp = match comps.comps(vehicle.year, &vehicle.make, &vehicle.model) {
            Ok(comp) => Some(comp),
            Err(err) => {
                warn!(error = %err, "market comps unavailable");
                None
            }
        };
        let comp_confidence = comp
            .as_ref()
            .map(|comp| market_confidence(comp.days_on_market, evaluation.breakdown.net_profit));

        Ok(report::render_quote(
            &evaluation,
            &self.state.exchange_rate,
            comp.as_ref(),
            comp_confidence,
        ))
    }

    pub fn persist_settings(&self) {
        if let Err(err) = save_persisted_state(&self.state.to_persisted()) {
            warn!(error = %err, "failed to persist settings");
        }
    }
}

pub async fn run(cli: CommandLine) -> anyhow::Result<()> {
    let command = cli.command();

    if let Commands::Confidence { days, profit } = command {
        let score = market_confidence(days, profit);
        print!("{}", report::render_confidence(days, profit, score));
        return Ok(());
    }

    if let Commands::Borders { seed } = command {
        let mut feed = seed
            .map(SimulatedBorderFeed::seeded)
            .unwrap_or_else(SimulatedBorderFeed::from_entropy);
        let statuses = feed.fetch_status()?;
        print!("{}", report::render_borders(&statuses));
        return Ok(());
    }

    let mut desk = Desk::from_args(&cli)?;
    desk.refresh();

    match command {
        Commands::Inventory {
            search,
            filter,
            json,
        } => {
            if let Some(query) = search {
                desk.state.filter.query = query;
            }
            if let Some(mode) = filter {
                desk.state.filter.mode = mode.into();
            }
            if json {
                let mut summary = desk.state.summary();
                rank_by_profit(&mut summary.items);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", desk.inventory_report());
            }
        }
        Commands::Quote { id, seed } => {
            let mut comps = seed
                .map(SimulatedMarketComps::seeded)
                .unwrap_or_else(SimulatedMarketComps::from_entropy);
            print!("{}", desk.quote_report(&id, &mut comps)?);
        }
        Commands::Watch {
            interval_secs,
            ticks,
        } => {
            watch(&mut desk, Duration::from_secs(interval_secs.max(1)), ticks).await?;
        }
        Commands::Confidence { .. } | Commands::Borders { .. } => {}
    }

    if cli.save_settings {
        desk.persist_settings();
    }
    Ok(())
}

async fn watch(desk: &mut Desk, period: Duration, ticks: Option<u32>) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(period);
    let mut rendered = 0_u32;
    info!(period_secs = period.as_secs(), "watching inventory");
    println!("{}", version::banner());

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // the first tick fires immediately and the desk was just refreshed
                if rendered > 0 {
                    desk.refresh();
                }
                print!("{}", desk.inventory_report());
                rendered += 1;
                if ticks.is_some_and(|limit| rendered >= limit) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("stopping watch");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;
    use crate::domain::{ExchangeRate, RateStatus, Vehicle};
    use crate::infra::{ExchangeRateSource, SourceError};

    #[derive(Clone, Default)]
    struct Calls(Arc<AtomicUsize>);

    impl Calls {
        fn bump(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    struct CountingRate(Calls);

    impl ExchangeRateSource for CountingRate {
        fn name(&self) -> &str {
            "counting"
        }

        fn current_rate(&self) -> Result<ExchangeRate, SourceError> {
            self.0.bump();
            Ok(ExchangeRate::new(0.73, RateStatus::Fresh))
        }
    }

    struct CountingListings(Calls);

    impl InventorySource for CountingListings {
        fn name(&self) -> &str {
            "counting"
        }

        fn load(&self) -> Result<Vec<Vehicle>, SourceError> {
            self.0.bump();
            Ok(Vec::new())
        }
    }

    struct Listings(Vec<Vehicle>);

    impl InventorySource for Listings {
        fn name(&self) -> &str {
            "test"
        }

        fn load(&self) -> Result<Vec<Vehicle>, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct Offline;

    impl InventorySource for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn load(&self) -> Result<Vec<Vehicle>, SourceError> {
            Err(SourceError::Unavailable("down".into()))
        }
    }

    struct NoComps;

    impl MarketCompsSource for NoComps {
        fn comps(
            &mut self,
            _year: u16,
            _make: &str,
            _model: &str,
        ) -> Result<crate::domain::MarketComp, SourceError> {
            Err(SourceError::Unavailable("no comps".into()))
        }
    }

    fn desk(live: Option<Box<dyn InventorySource>>) -> Desk {
        let state = DeskState::with_samples(crate::domain::sample_inventory());
        let rates = FallbackRateSource::new(FALLBACK_EXCHANGE_RATE)
            .with_primary(Box::new(FixedRate::new(0.72)));
        Desk::new(state, rates, live)
    }

    #[test]
    fn refresh_pulls_rate_and_live_listings() {
        let mut live = crate::domain::sample_inventory().remove(0);
        live.id = "live-1".into();
        live.is_live = true;

        let mut desk = desk(Some(Box::new(Listings(vec![live]))));
        desk.refresh();

        assert_eq!(desk.state.exchange_rate.rate, 0.72);
        assert_eq!(desk.state.exchange_rate.status, RateStatus::Fresh);
        assert_eq!(desk.state.inventory().len(), 6);
        assert!(desk.inventory_report().contains("[live]"));
    }

    #[test]
    fn failed_sync_keeps_previous_listings() {
        let mut desk = desk(Some(Box::new(Offline)));
        desk.state
            .set_live_vehicles(vec![crate::domain::sample_inventory().remove(2)], SystemTime::now());
        desk.refresh();
        assert_eq!(desk.state.live_vehicles.len(), 1);
    }

    #[test]
    fn quote_for_unknown_id_is_an_error() {
        let mut desk = desk(None);
        desk.refresh();
        assert!(desk.quote_report("nope", &mut NoComps).is_err());

        let text = desk.quote_report("1", &mut NoComps).unwrap();
        assert!(text.contains("F-150 Raptor R"));
        assert!(!text.contains("Market comps"));

        let mut comps = SimulatedMarketComps::seeded(5);
        let text = desk.quote_report("2", &mut comps).unwrap();
        assert!(text.contains("Market comps"));
    }

    #[tokio::test]
    async fn watch_refreshes_on_every_tick_after_the_first() {
        let rate_calls = Calls::default();
        let listing_calls = Calls::default();
        let rates = FallbackRateSource::new(FALLBACK_EXCHANGE_RATE)
            .with_primary(Box::new(CountingRate(rate_calls.clone())));
        let mut desk = Desk::new(
            DeskState::with_samples(crate::domain::sample_inventory()),
            rates,
            Some(Box::new(CountingListings(listing_calls.clone()))),
        );
        desk.refresh();
        assert_eq!(rate_calls.count(), 1);

        watch(&mut desk, Duration::from_millis(20), Some(8))
            .await
            .unwrap();

        // one refresh before watching, then one per tick except the immediate first
        assert_eq!(rate_calls.count(), 8);
        assert_eq!(listing_calls.count(), 8);
    }
}
