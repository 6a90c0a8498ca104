//! Listings loaded from a JSON export of the live inventory feed.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::info;

use crate::domain::{sample_inventory, Vehicle};
use crate::infra::sources::{read_file, InventorySource, SourceError};

const DEFAULT_YEAR: u16 = 2024;
const DEFAULT_DAYS_TO_SALE: u32 = 10;
const NORTH_AMERICAN_CONTENT: f64 = 0.85;
const IMPORTED_CONTENT: f64 = 0.05;

/// The built-in sample listings.
#[derive(Clone, Debug, Default)]
pub struct SampleInventory;

impl InventorySource for SampleInventory {
    fn name(&self) -> &str {
        "samples"
    }

    fn load(&self) -> Result<Vec<Vehicle>, SourceError> {
        Ok(sample_inventory())
    }
}

/// A JSON file holding either an array of listing records or `{"data": [...]}`.
#[derive(Clone, Debug)]
pub struct JsonInventoryFile {
    path: PathBuf,
}

impl JsonInventoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InventorySource for JsonInventoryFile {
    fn name(&self) -> &str {
        "listings-file"
    }

    fn load(&self) -> Result<Vec<Vehicle>, SourceError> {
        let content = read_file(&self.path)?;
        let vehicles = parse_listings(&content)?;
        info!(
            count = vehicles.len(),
            path = %self.path.display(),
            "loaded live listings"
        );
        Ok(vehicles)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingPayload {
    Bare(Vec<ListingRecord>),
    Wrapped { data: Vec<ListingRecord> },
}

pub fn parse_listings(content: &str) -> Result<Vec<Vehicle>, SourceError> {
    let records = match serde_json::from_str::<ListingPayload>(content)? {
        ListingPayload::Bare(records) => records,
        ListingPayload::Wrapped { data } => data,
    };
    Ok(records.into_iter().map(Vehicle::from).collect())
}

#[derive(Debug, Deserialize)]
struct ListingRecord {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    make: String,
    model: String,
    #[serde(default)]
    year: Option<u16>,
    #[serde(default, alias = "price_cad")]
    list_price: Option<f64>,
    #[serde(default)]
    vin: Option<String>,
    #[serde(default, alias = "demand_score")]
    days_to_sale: Option<u32>,
    #[serde(default, alias = "expected_us_resale")]
    expected_resale: Option<f64>,
    #[serde(default)]
    domestic_content: Option<f64>,
    #[serde(default)]
    winter_driven: Option<bool>,
    #[serde(default)]
    heated_storage: Option<bool>,
}

impl From<ListingRecord> for Vehicle {
    fn from(record: ListingRecord) -> Self {
        let vin = record
            .vin
            .map(|vin| vin.trim().to_uppercase())
            .filter(|vin| !vin.is_empty());
        let is_north_american = vin
            .as_deref()
            .and_then(|vin| vin.chars().next())
            .map(|first| ('1'..='5').contains(&first))
            .unwrap_or(false);
        let domestic_content = record.domestic_content.unwrap_or(if is_north_american {
            NORTH_AMERICAN_CONTENT
        } else {
            IMPORTED_CONTENT
        });

        Self {
            history_id: format!("LIVE-{}", record.id),
            id: record.id,
            make: record.make,
            model: record.model,
            year: record.year.unwrap_or(DEFAULT_YEAR),
            list_price: record.list_price.unwrap_or(0.0),
            is_north_american,
            domestic_content,
            vin,
            expected_resale: record.expected_resale.unwrap_or(0.0),
            days_to_sale: record.days_to_sale.unwrap_or(DEFAULT_DAYS_TO_SALE),
            winter_driven: record.winter_driven.unwrap_or(false),
            heated_storage: record.heated_storage.unwrap_or(false),
            is_live: true,
        }
    }
}

fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> serde::de::Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}
