//! Landed-cost and profit computation for a single listing.
//!
//! Every rate and threshold lives in [`PricingPolicy`], which callers pass in
//! explicitly so that several duty regimes can be compared side by side.

use serde::{Deserialize, Serialize};

use super::entities::{OriginZone, ProfitBreakdown, SeasonalAdjustment, Vehicle};

/// Which portion of the base price the primary duty is levied on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyBasis {
    /// Duty on the full converted price.
    #[default]
    WholePrice,
    /// Duty only on the share of value that is not domestic content.
    ForeignContent,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedFees {
    pub paperwork: f64,
    pub shipping: f64,
    pub inspection: f64,
}

impl FixedFees {
    pub fn total(&self) -> f64 {
        self.paperwork + self.shipping + self.inspection
    }
}

impl Default for FixedFees {
    fn default() -> Self {
        Self {
            paperwork: 1_200.0,
            shipping: 1_800.0,
            inspection: 500.0,
        }
    }
}

/// Secondary duty on high-value imports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuxuryDuty {
    /// Applied to the whole subtotal once it crosses the threshold.
    pub flat_rate: f64,
    /// Applied to the part of the subtotal above the threshold.
    pub marginal_rate: f64,
    pub threshold: f64,
}

impl LuxuryDuty {
    /// Greater of the flat and marginal options; zero at or below the threshold.
    pub fn assess(&self, subtotal: f64) -> f64 {
        if subtotal <= self.threshold {
            return 0.0;
        }
        let flat = self.flat_rate * subtotal;
        let marginal = self.marginal_rate * (subtotal - self.threshold);
        flat.max(marginal).max(0.0)
    }
}

impl Default for LuxuryDuty {
    fn default() -> Self {
        Self {
            flat_rate: 0.10,
            marginal_rate: 0.20,
            threshold: 100_000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalPolicy {
    pub winter_deduction_rate: f64,
    pub storage_premium_rate: f64,
}

impl SeasonalPolicy {
    /// Both rates apply to the unadjusted list price.
    pub fn assess(&self, vehicle: &Vehicle) -> SeasonalAdjustment {
        SeasonalAdjustment {
            winter_deduction: if vehicle.winter_driven {
                vehicle.list_price * self.winter_deduction_rate
            } else {
                0.0
            },
            storage_premium: if vehicle.heated_storage {
                vehicle.list_price * self.storage_premium_rate
            } else {
                0.0
            },
        }
    }
}

impl Default for SeasonalPolicy {
    fn default() -> Self {
        Self {
            winter_deduction_rate: 0.065,
            storage_premium_rate: 0.04,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    pub duty_rate: f64,
    pub duty_basis: DutyBasis,
    pub luxury: LuxuryDuty,
    pub fixed_fees: FixedFees,
    pub seasonal: SeasonalPolicy,
    /// Net profit must be strictly above this to count as high-yield.
    pub high_yield_threshold: f64,
    /// Leading identification characters that mark a duty-free origin.
    pub zone_eligible_prefixes: Vec<char>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            duty_rate: 0.25,
            duty_basis: DutyBasis::WholePrice,
            luxury: LuxuryDuty::default(),
            fixed_fees: FixedFees::default(),
            seasonal: SeasonalPolicy::default(),
            high_yield_threshold: 20_000.0,
            zone_eligible_prefixes: vec!['1', '4', '5'],
        }
    }
}

impl PricingPolicy {
    pub fn with_duty_basis(mut self, basis: DutyBasis) -> Self {
        self.duty_basis = basis;
        self
    }
}

/// Classify origin from the first character of a VIN-like string.
pub fn classify_origin(identification: &str, policy: &PricingPolicy) -> OriginZone {
    let Some(first) = identification.trim_start().chars().next() else {
        return OriginZone::Foreign;
    };
    let first = first.to_ascii_uppercase();
    if policy.zone_eligible_prefixes.contains(&first) {
        OriginZone::ZoneEligible
    } else {
        OriginZone::Foreign
    }
}

fn primary_duty(
    origin: OriginZone,
    base_price: f64,
    domestic_content: f64,
    policy: &PricingPolicy,
) -> f64 {
    if origin.is_duty_free() {
        return 0.0;
    }
    let dutiable = match policy.duty_basis {
        DutyBasis::WholePrice => base_price,
        DutyBasis::ForeignContent => base_price * (1.0 - domestic_content.clamp(0.0, 1.0)),
    };
    dutiable * policy.duty_rate
}

/// Compute the landed cost and profit of `vehicle` at `exchange_rate`.
///
/// Total for any finite input; the vehicle is not modified.
pub fn compute_profit_breakdown(
    vehicle: &Vehicle,
    exchange_rate: f64,
    policy: &PricingPolicy,
) -> ProfitBreakdown {
    let seasonal = policy.seasonal.assess(vehicle);
    let adjusted_price = vehicle.list_price - seasonal.winter_deduction + seasonal.storage_premium;
    let base_price = adjusted_price * exchange_rate;

    let origin = classify_origin(vehicle.identification(), policy);
    let primary_duty = primary_duty(origin, base_price, vehicle.domestic_content, policy);

    let fixed_fees = policy.fixed_fees.total();
    let luxury_duty = policy.luxury.assess(base_price + primary_duty + fixed_fees);

    let total_landed_cost = base_price + primary_duty + luxury_duty + fixed_fees;
    let net_profit = vehicle.expected_resale - total_landed_cost;

    ProfitBreakdown {
        base_price,
        seasonal,
        primary_duty,
        luxury_duty,
        fixed_fees,
        total_landed_cost,
        net_profit,
        is_high_yield: net_profit > policy.high_yield_threshold,
        origin,
        origin_label: origin.label().to_string(),
    }
}
