//! Inventory merging, search and aggregate evaluation.

use std::{cmp::Ordering, collections::HashSet};

use serde::{Deserialize, Serialize};

use super::{
    confidence::market_confidence,
    entities::{ProfitBreakdown, Vehicle},
    pricing::{compute_profit_breakdown, PricingPolicy},
};

/// Live listings first, then samples whose id is not already taken.
pub fn merge_inventory(live: Vec<Vehicle>, samples: Vec<Vehicle>) -> Vec<Vehicle> {
    let mut seen = HashSet::new();
    live.into_iter()
        .chain(samples)
        .filter(|vehicle| seen.insert(vehicle.id.clone()))
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    HighYield,
    NorthAmerican,
}

impl FilterMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::HighYield => "High yield",
            Self::NorthAmerican => "North American",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub mode: FilterMode,
}

impl InventoryFilter {
    pub fn matches(&self, vehicle: &Vehicle, breakdown: &ProfitBreakdown) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty()
            && !vehicle.make.to_lowercase().contains(&query)
            && !vehicle.model.to_lowercase().contains(&query)
        {
            return false;
        }

        match self.mode {
            FilterMode::All => true,
            FilterMode::HighYield => breakdown.is_high_yield,
            FilterMode::NorthAmerican => vehicle.is_north_american,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VehicleEvaluation {
    pub vehicle: Vehicle,
    pub breakdown: ProfitBreakdown,
    pub confidence: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InventorySummary {
    /// Sum of net profit over every evaluated listing.
    pub total_market_profit: f64,
    pub high_yield_count: usize,
    pub average_confidence: f64,
    pub items: Vec<VehicleEvaluation>,
}

pub fn evaluate_vehicle(
    vehicle: &Vehicle,
    exchange_rate: f64,
    policy: &PricingPolicy,
) -> VehicleEvaluation {
    let breakdown = compute_profit_breakdown(vehicle, exchange_rate, policy);
    let confidence = market_confidence(vehicle.days_to_sale, breakdown.net_profit);
    VehicleEvaluation {
        vehicle: vehicle.clone(),
        breakdown,
        confidence,
    }
}

pub fn evaluate_inventory(
    vehicles: &[Vehicle],
    exchange_rate: f64,
    policy: &PricingPolicy,
) -> InventorySummary {
    let mut items = Vec::with_capacity(vehicles.len());
    let mut total_market_profit = 0.0;
    let mut high_yield_count = 0;
    let mut confidence_sum = 0.0;

    for vehicle in vehicles {
        let evaluation = evaluate_vehicle(vehicle, exchange_rate, policy);
        total_market_profit += evaluation.breakdown.net_profit;
        if evaluation.breakdown.is_high_yield {
            high_yield_count += 1;
        }
        confidence_sum += f64::from(evaluation.confidence);
        items.push(evaluation);
    }

    let average_confidence = if items.is_empty() {
        0.0
    } else {
        confidence_sum / items.len() as f64
    };

    InventorySummary {
        total_market_profit,
        high_yield_count,
        average_confidence,
        items,
    }
}

impl InventorySummary {
    /// Keep only the evaluations the filter accepts. Totals are left as computed
    /// over the whole inventory.
    pub fn filtered(mut self, filter: &InventoryFilter) -> Self {
        self.items
            .retain(|item| filter.matches(&item.vehicle, &item.breakdown));
        self
    }
}

/// Sort by net profit, best first.
pub fn rank_by_profit(items: &mut [VehicleEvaluation]) {
    items.sort_by(|a, b| {
        b.breakdown
            .net_profit
            .partial_cmp(&a.breakdown.net_profit)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::samples::sample_inventory;

    fn live(id: &str, make: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            make: make.to_string(),
            is_live: true,
            ..sample_inventory().remove(1)
        }
    }

    #[test]
    fn live_listings_shadow_samples() {
        let merged = merge_inventory(
            vec![live("2", "Porsche"), live("99", "Porsche"), live("99", "Dup")],
            sample_inventory(),
        );
        let ids: Vec<_> = merged.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "99", "1", "3", "4", "5"]);
        assert!(merged[0].is_live);
        assert_eq!(merged[1].make, "Porsche");
    }

    #[test]
    fn search_is_case_insensitive_over_make_and_model() {
        let policy = PricingPolicy::default();
        let vehicles = sample_inventory();
        let filter = InventoryFilter {
            query: "PLAID".into(),
            mode: FilterMode::All,
        };
        let summary = evaluate_inventory(&vehicles, 0.737, &policy).filtered(&filter);
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].vehicle.make, "Tesla");

        let by_make = InventoryFilter {
            query: "lambo".into(),
            mode: FilterMode::All,
        };
        let summary = evaluate_inventory(&vehicles, 0.737, &policy).filtered(&by_make);
        assert_eq!(summary.items.len(), 1);
    }

    #[test]
    fn filter_modes() {
        let policy = PricingPolicy::default();
        let summary = evaluate_inventory(&sample_inventory(), 0.737, &policy);

        let north = summary.clone().filtered(&InventoryFilter {
            query: String::new(),
            mode: FilterMode::NorthAmerican,
        });
        assert!(north.items.iter().all(|i| i.vehicle.is_north_american));
        assert_eq!(north.items.len(), 3);

        let high = summary.clone().filtered(&InventoryFilter {
            query: String::new(),
            mode: FilterMode::HighYield,
        });
        assert_eq!(high.items.len(), summary.high_yield_count);
        assert!(high.items.iter().all(|i| i.breakdown.is_high_yield));
        assert_eq!(high.total_market_profit, summary.total_market_profit);
    }

    #[test]
    fn summary_totals() {
        let policy = PricingPolicy::default();
        let vehicles = sample_inventory();
        let summary = evaluate_inventory(&vehicles, 0.737, &policy);

        let expected: f64 = vehicles
            .iter()
            .map(|v| compute_profit_breakdown(v, 0.737, &policy).net_profit)
            .sum();
        assert!((summary.total_market_profit - expected).abs() < 1e-6);
        assert_eq!(summary.items.len(), vehicles.len());
        assert!(summary.average_confidence <= 100.0);

        let empty = evaluate_inventory(&[], 0.737, &policy);
        assert_eq!(empty.average_confidence, 0.0);
        assert_eq!(empty.total_market_profit, 0.0);
    }

    #[test]
    fn ranking_puts_best_first() {
        let policy = PricingPolicy::default();
        let mut items = evaluate_inventory(&sample_inventory(), 0.737, &policy).items;
        rank_by_profit(&mut items);
        for pair in items.windows(2) {
            assert!(pair[0].breakdown.net_profit >= pair[1].breakdown.net_profit);
        }
    }
}
