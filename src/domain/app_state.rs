use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

use super::{
    entities::{ExchangeRate, RateStatus, Vehicle},
    inventory::{evaluate_inventory, merge_inventory, InventoryFilter, InventorySummary},
    pricing::PricingPolicy,
};

/// Rate used when no source can supply one.
pub const FALLBACK_EXCHANGE_RATE: f64 = 0.737;

/// In-memory state for one desk session.
#[derive(Clone, Debug)]
pub struct DeskState {
    pub live_vehicles: Vec<Vehicle>,
    pub sample_vehicles: Vec<Vehicle>,
    pub exchange_rate: ExchangeRate,
    pub policy: PricingPolicy,
    pub filter: InventoryFilter,
    pub refresh: RefreshTimestamps,
}

impl Default for DeskState {
    fn default() -> Self {
        Self {
            live_vehicles: Vec::new(),
            sample_vehicles: Vec::new(),
            exchange_rate: ExchangeRate::new(FALLBACK_EXCHANGE_RATE, RateStatus::Fallback),
            policy: PricingPolicy::default(),
            filter: InventoryFilter::default(),
            refresh: RefreshTimestamps::default(),
        }
    }
}

impl DeskState {
    pub fn with_samples(samples: Vec<Vehicle>) -> Self {
        Self {
            sample_vehicles: samples,
            ..Self::default()
        }
    }

    pub fn is_stale(&self, resource: &RefreshResource, ttl: Duration) -> bool {
        self.refresh.is_stale(resource, ttl)
    }

    pub fn set_exchange_rate(&mut self, rate: ExchangeRate) {
        self.refresh
            .record_fetch(RefreshResource::ExchangeRate, rate.observed_at);
        self.exchange_rate = rate;
    }

    pub fn set_live_vehicles(&mut self, vehicles: Vec<Vehicle>, fetched_at: SystemTime) {
        self.live_vehicles = vehicles;
        self.refresh
            .record_fetch(RefreshResource::Inventory, fetched_at);
    }

    /// Live listings merged over the samples.
    pub fn inventory(&self) -> Vec<Vehicle> {
        merge_inventory(self.live_vehicles.clone(), self.sample_vehicles.clone())
    }

    /// Evaluate the merged inventory at the current rate, then apply the filter.
    pub fn summary(&self) -> InventorySummary {
        evaluate_inventory(&self.inventory(), self.exchange_rate.rate, &self.policy)
            .filtered(&self.filter)
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.policy = persisted.policy;
        self.filter = persisted.filter;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            policy: self.policy.clone(),
            filter: self.filter.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RefreshTimestamps {
    entries: HashMap<RefreshResource, SystemTime>,
}

impl RefreshTimestamps {
    pub fn record_fetch(&mut self, resource: RefreshResource, fetched_at: SystemTime) {
        self.entries.insert(resource, fetched_at);
    }

    pub fn fetched_at(&self, resource: &RefreshResource) -> Option<SystemTime> {
        self.entries.get(resource).copied()
    }

    pub fn is_stale(&self, resource: &RefreshResource, ttl: Duration) -> bool {
        self.fetched_at(resource)
            .map(|time| time.elapsed().map(|elapsed| elapsed > ttl).unwrap_or(true))
            .unwrap_or(true)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefreshResource {
    ExchangeRate,
    Inventory,
}

/// Settings kept between runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub policy: PricingPolicy,
    #[serde(default)]
    pub filter: InventoryFilter,
}
