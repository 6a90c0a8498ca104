use super::entities::Vehicle;

struct Sample {
    id: &'static str,
    make: &'static str,
    model: &'static str,
    year: u16,
    list_price: f64,
    is_north_american: bool,
    domestic_content: f64,
    vin: &'static str,
    history_id: &'static str,
    expected_resale: f64,
    days_to_sale: u32,
    winter_driven: bool,
    heated_storage: bool,
}

const SAMPLES: [Sample; 5] = [
    Sample {
        id: "1",
        make: "Ford",
        model: "F-150 Raptor R",
        year: 2024,
        list_price: 145_000.0,
        is_north_american: true,
        domestic_content: 0.85,
        vin: "1FTFW1RJ4RFA07722",
        history_id: "EIGTA-7722-X",
        expected_resale: 145_000.0,
        days_to_sale: 4,
        winter_driven: false,
        heated_storage: true,
    },
    Sample {
        id: "2",
        make: "Porsche",
        model: "911 GT3",
        year: 2023,
        list_price: 285_000.0,
        is_north_american: false,
        domestic_content: 0.0,
        vin: "WP0AC2A99PS279221",
        history_id: "EIGTA-9221-P",
        expected_resale: 265_000.0,
        days_to_sale: 12,
        winter_driven: false,
        heated_storage: false,
    },
    Sample {
        id: "3",
        make: "Tesla",
        model: "Model S Plaid",
        year: 2024,
        list_price: 115_000.0,
        is_north_american: true,
        domestic_content: 0.95,
        vin: "5YJSA1E6XRF533312",
        history_id: "EIGTA-3312-T",
        expected_resale: 110_000.0,
        days_to_sale: 7,
        winter_driven: true,
        heated_storage: false,
    },
    Sample {
        id: "4",
        make: "Lucid",
        model: "Air Sapphire",
        year: 2024,
        list_price: 320_000.0,
        is_north_american: true,
        domestic_content: 0.90,
        vin: "50EA1TEA8RA008821",
        history_id: "EIGTA-8821-L",
        expected_resale: 310_000.0,
        days_to_sale: 15,
        winter_driven: false,
        heated_storage: true,
    },
    Sample {
        id: "5",
        make: "Lamborghini",
        model: "Huracan Tecnica",
        year: 2023,
        list_price: 395_000.0,
        is_north_american: false,
        domestic_content: 0.0,
        vin: "ZHWUB6ZF4PLA05542",
        history_id: "EIGTA-5542-L",
        expected_resale: 380_000.0,
        days_to_sale: 21,
        winter_driven: true,
        heated_storage: true,
    },
];

/// The built-in listings shown when no live feed is available.
pub fn sample_inventory() -> Vec<Vehicle> {
    SAMPLES
        .iter()
        .map(|sample| Vehicle {
            id: sample.id.to_string(),
            make: sample.make.to_string(),
            model: sample.model.to_string(),
            year: sample.year,
            list_price: sample.list_price,
            is_north_american: sample.is_north_american,
            domestic_content: sample.domestic_content,
            vin: Some(sample.vin.to_string()),
            history_id: sample.history_id.to_string(),
            expected_resale: sample.expected_resale,
            days_to_sale: sample.days_to_sale,
            winter_driven: sample.winter_driven,
            heated_storage: sample.heated_storage,
            is_live: false,
        })
        .collect()
}
