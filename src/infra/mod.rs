//! Input collaborators and local caches.

pub mod cache;
pub mod listings;
pub mod simulated;
pub mod sources;

pub use cache::{default_rate_cache_path, RateCache, RATE_CACHE_TTL};
pub use listings::{JsonInventoryFile, SampleInventory};
pub use simulated::{SimulatedBorderFeed, SimulatedMarketComps};
pub use sources::{
    BorderFeed, ExchangeRateSource, FallbackRateSource, FixedRate, InventorySource, JsonRateFile,
    MarketCompsSource, SourceError,
};
