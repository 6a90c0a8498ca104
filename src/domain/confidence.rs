use serde::{Deserialize, Serialize};

const MAX_PROFIT_POINTS: f64 = 50.0;
const PROFIT_PER_POINT: f64 = 500.0;
const MAX_SPEED_POINTS: f64 = 50.0;
const POINTS_LOST_PER_DAY: f64 = 2.0;

/// Score a deal in `0..=100`: up to 50 points for profit, up to 50 for a fast sale.
pub fn market_confidence(days_on_market: u32, profit: f64) -> u8 {
    let profit_points = if profit.is_finite() {
        (profit / PROFIT_PER_POINT).clamp(0.0, MAX_PROFIT_POINTS)
    } else {
        0.0
    };
    let speed_points =
        (MAX_SPEED_POINTS - POINTS_LOST_PER_DAY * f64::from(days_on_market)).max(0.0);

    (profit_points + speed_points).round().clamp(0.0, 100.0) as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    None,
}

impl ConfidenceTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => Self::High,
            45..=74 => Self::Medium,
            1..=44 => Self::Low,
            0 => Self::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::None => "N/A",
        }
    }
}
