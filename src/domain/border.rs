//! Border crossing wait times for the export corridor.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

const OPTIMAL_BELOW_MINUTES: u32 = 25;
const DELAYED_BELOW_MINUTES: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossingStatus {
    Optimal,
    Delayed,
    Congested,
}

impl CrossingStatus {
    /// Classify by passenger-car wait.
    pub fn from_wait(car_wait_minutes: u32) -> Self {
        if car_wait_minutes < OPTIMAL_BELOW_MINUTES {
            Self::Optimal
        } else if car_wait_minutes < DELAYED_BELOW_MINUTES {
            Self::Delayed
        } else {
            Self::Congested
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Delayed => "DELAYED",
            Self::Congested => "CONGESTED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BorderStatus {
    pub crossing: String,
    pub location: String,
    pub car_wait_minutes: u32,
    /// `None` for crossings closed to commercial traffic.
    pub truck_wait_minutes: Option<u32>,
    pub status: CrossingStatus,
    pub observed_at: SystemTime,
}

impl BorderStatus {
    pub fn new(
        crossing: impl Into<String>,
        location: impl Into<String>,
        car_wait_minutes: u32,
        truck_wait_minutes: Option<u32>,
    ) -> Self {
        Self {
            crossing: crossing.into(),
            location: location.into(),
            car_wait_minutes,
            truck_wait_minutes,
            status: CrossingStatus::from_wait(car_wait_minutes),
            observed_at: SystemTime::now(),
        }
    }

    pub fn truck_wait_display(&self) -> String {
        self.truck_wait_minutes
            .map(|minutes| format!("{minutes} min"))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// The crossing with the shortest car wait, if any.
pub fn fastest_crossing(statuses: &[BorderStatus]) -> Option<&BorderStatus> {
    statuses.iter().min_by_key(|status| status.car_wait_minutes)
}
