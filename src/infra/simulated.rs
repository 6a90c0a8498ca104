//! Offline stand-ins for the border-wait and market-comps services.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::domain::{BorderStatus, MarketComp};
use crate::infra::sources::{BorderFeed, MarketCompsSource, SourceError};

struct Crossing {
    name: &'static str,
    location: &'static str,
    base_car_wait: u32,
    base_truck_wait: Option<u32>,
}

const CROSSINGS: [Crossing; 4] = [
    Crossing {
        name: "Peace Bridge",
        location: "Fort Erie, ON / Buffalo, NY",
        base_car_wait: 15,
        base_truck_wait: Some(28),
    },
    Crossing {
        name: "Rainbow Bridge",
        location: "Niagara Falls, ON / NY",
        base_car_wait: 42,
        base_truck_wait: None,
    },
    Crossing {
        name: "Queenston-Lewiston",
        location: "Niagara-on-the-Lake, ON",
        base_car_wait: 20,
        base_truck_wait: Some(35),
    },
    Crossing {
        name: "Ambassador Bridge",
        location: "Windsor, ON / Detroit, MI",
        base_car_wait: 58,
        base_truck_wait: Some(85),
    },
];

const MIN_CAR_WAIT: i64 = 2;
const MIN_TRUCK_WAIT: i64 = 5;

/// Jitters fixed base waits: cars by -8..=7 minutes, trucks by -12..=11.
pub struct SimulatedBorderFeed<R = StdRng> {
    rng: R,
}

impl SimulatedBorderFeed<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> BorderFeed for SimulatedBorderFeed<R> {
    fn fetch_status(&mut self) -> Result<Vec<BorderStatus>, SourceError> {
        let statuses = CROSSINGS
            .iter()
            .map(|crossing| {
                let car_jitter = self.rng.random_range(-8..=7);
                let car_wait = (i64::from(crossing.base_car_wait) + car_jitter).max(MIN_CAR_WAIT);
                let truck_wait = crossing.base_truck_wait.map(|base| {
                    let jitter = self.rng.random_range(-12..=11);
                    (i64::from(base) + jitter).max(MIN_TRUCK_WAIT) as u32
                });
                BorderStatus::new(crossing.name, crossing.location, car_wait as u32, truck_wait)
            })
            .collect();
        Ok(statuses)
    }
}

/// Comparable-sales figures drawn from fixed ranges.
pub struct SimulatedMarketComps<R = StdRng> {
    rng: R,
}

impl SimulatedMarketComps<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> MarketCompsSource for SimulatedMarketComps<R> {
    fn comps(&mut self, year: u16, make: &str, model: &str) -> Result<MarketComp, SourceError> {
        if make.trim().is_empty() || model.trim().is_empty() || year == 0 {
            return Err(SourceError::Unavailable(format!(
                "no comps for '{year} {make} {model}'"
            )));
        }
        Ok(MarketComp {
            average_price: 155_000.0 + self.rng.random_range(0.0..20_000.0),
            inventory_count: self.rng.random_range(1..=25),
            days_on_market: self.rng.random_range(3..=17),
        })
    }
}
