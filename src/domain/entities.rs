use std::{fmt, time::SystemTime};

use serde::{Deserialize, Serialize};

/// Identifier for listings, unique within a merged inventory.
pub type VehicleId = String;

/// A listing under evaluation. Prices are in the origin currency (CAD),
/// resale figures in the target currency (USD).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub list_price: f64,
    pub is_north_american: bool,
    /// Fraction of value with domestic (US) content, expected in `0..=1`.
    #[serde(default)]
    pub domestic_content: f64,
    #[serde(default)]
    pub vin: Option<String>,
    pub history_id: String,
    pub expected_resale: f64,
    /// Estimated days until the unit sells on the target market.
    #[serde(default = "default_days_to_sale")]
    pub days_to_sale: u32,
    #[serde(default)]
    pub winter_driven: bool,
    #[serde(default)]
    pub heated_storage: bool,
    /// Set for listings that came from an external feed rather than the samples.
    #[serde(default)]
    pub is_live: bool,
}

fn default_days_to_sale() -> u32 {
    10
}

impl Vehicle {
    /// The string origin is derived from: the VIN when present, otherwise the history id.
    pub fn identification(&self) -> &str {
        self.vin
            .as_deref()
            .map(str::trim)
            .filter(|vin| !vin.is_empty())
            .unwrap_or(&self.history_id)
    }

    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// Origin classification derived from the identification string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginZone {
    /// No primary import duty applies.
    ZoneEligible,
    Foreign,
}

impl OriginZone {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ZoneEligible => "ZONE-ELIGIBLE (DUTY-FREE)",
            Self::Foreign => "FOREIGN (TARIFFED)",
        }
    }

    pub fn is_duty_free(&self) -> bool {
        matches!(self, Self::ZoneEligible)
    }
}

impl fmt::Display for OriginZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Valuation adjustments applied to the list price, in origin currency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAdjustment {
    pub winter_deduction: f64,
    pub storage_premium: f64,
}

impl SeasonalAdjustment {
    pub fn net(&self) -> f64 {
        self.storage_premium - self.winter_deduction
    }
}

/// Landed-cost projection of a vehicle at one exchange rate. Never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    pub base_price: f64,
    pub seasonal: SeasonalAdjustment,
    pub primary_duty: f64,
    pub luxury_duty: f64,
    pub fixed_fees: f64,
    pub total_landed_cost: f64,
    pub net_profit: f64,
    pub is_high_yield: bool,
    pub origin: OriginZone,
    pub origin_label: String,
}

/// Where the current exchange rate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateStatus {
    Fresh,
    Cached,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub base: String,
    pub quote: String,
    pub rate: f64,
    pub observed_at: SystemTime,
    pub status: RateStatus,
}

impl ExchangeRate {
    pub fn new(rate: f64, status: RateStatus) -> Self {
        Self {
            base: "CAD".to_string(),
            quote: "USD".to_string(),
            rate,
            observed_at: SystemTime::now(),
            status,
        }
    }

    pub fn pair(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }
}

/// Comparable listings on the target market for a year/make/model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketComp {
    pub average_price: f64,
    pub inventory_count: u32,
    pub days_on_market: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(vin: Option<&str>) -> Vehicle {
        Vehicle {
            id: "v1".into(),
            make: "Porsche".into(),
            model: "911 GT3".into(),
            year: 2023,
            list_price: 285_000.0,
            is_north_american: false,
            domestic_content: 0.0,
            vin: vin.map(String::from),
            history_id: "EIGTA-9221-P".into(),
            expected_resale: 265_000.0,
            days_to_sale: 12,
            winter_driven: false,
            heated_storage: false,
            is_live: false,
        }
    }

    #[test]
    fn identification_prefers_vin() {
        assert_eq!(vehicle(Some(" 1FTFW1RG ")).identification(), "1FTFW1RG");
        assert_eq!(vehicle(None).identification(), "EIGTA-9221-P");
        assert_eq!(vehicle(Some("   ")).identification(), "EIGTA-9221-P");
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "id": "7", "make": "Ford", "model": "GT", "year": 2022,
            "list_price": 1000.0, "is_north_american": true,
            "history_id": "H-7", "expected_resale": 1200.0
        }"#;
        let parsed: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.days_to_sale, 10);
        assert!(!parsed.is_live);
        assert_eq!(parsed.vin, None);
        assert_eq!(parsed.display_name(), "2022 Ford GT");
    }
}
