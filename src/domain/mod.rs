//! Pricing, scoring and inventory logic for the arbitrage desk.

pub mod app_state;
pub mod border;
pub mod confidence;
pub mod entities;
pub mod inventory;
pub mod pricing;
pub mod samples;

pub use app_state::{
    DeskState, PersistedState, RefreshResource, RefreshTimestamps, FALLBACK_EXCHANGE_RATE,
};
pub use border::{fastest_crossing, BorderStatus, CrossingStatus};
pub use confidence::{market_confidence, ConfidenceTier};
pub use entities::{
    ExchangeRate, MarketComp, OriginZone, ProfitBreakdown, RateStatus, SeasonalAdjustment,
    Vehicle, VehicleId,
};
pub use inventory::{
    evaluate_inventory, evaluate_vehicle, merge_inventory, rank_by_profit, FilterMode,
    InventoryFilter, InventorySummary, VehicleEvaluation,
};
pub use pricing::{
    classify_origin, compute_profit_breakdown, DutyBasis, FixedFees, LuxuryDuty, PricingPolicy,
    SeasonalPolicy,
};
pub use samples::sample_inventory;
