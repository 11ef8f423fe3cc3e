//! Sample fixture for the dashboard.
//!
//! Hand-authored production figures for five European markets plus a
//! customer list generated with a seeded RNG, so the dataset is identical
//! across runs.
//!
//! # Data Layout
//! - 6 months (Oca–Haz), 5 countries, 5 vehicle models
//! - Top-level monthly production is the sum of the country series
//! - Türkiye carries city-level data for the drilldown map
//! - 25 customers, distributed round-robin across the countries

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::fixture::{
    City, CountryRecord, Customer, DailyOrder, Downtime, Fixture, ModelSales, MonthValue,
    Shipment,
};

/// Month labels in dashboard order.
pub const MONTHS: [&str; 6] = ["Oca", "Şub", "Mar", "Nis", "May", "Haz"];

/// Data seed for reproducible customer generation.
const DATA_SEED: u64 = 42;

/// Number of sample customers.
const CUSTOMER_COUNT: usize = 25;

const CUSTOMER_NAMES: [&str; 10] = [
    "Anka Lojistik",
    "Nordic Fleet",
    "Rhein Mobil",
    "Atlas Kiralama",
    "Lumen Auto",
    "Delta Filo",
    "Polder Cars",
    "Boreal Motors",
    "Seine Transport",
    "Marmara Oto",
];

const SEGMENTS: [&str; 4] = ["Filo", "Bayi", "Kurumsal", "Bireysel"];

/// Build the canonical sample fixture.
///
/// Always returns the same data (seeded RNG for customers).
pub fn sample_fixture() -> Fixture {
    let by_country = vec![
        country(
            "Türkiye",
            [128, 119, 135, 142, 150, 158],
            [(40, 25), (35, 18), (22, 30), (15, 12)],
            [35.24, 38.96],
        )
        .with_cities(vec![
            city("İstanbul", 42, [28.97, 41.01]),
            city("Ankara", 18, [32.85, 39.93]),
            city("İzmir", 15, [27.14, 38.42]),
            city("Bursa", 12, [29.06, 40.19]),
            city("Kocaeli", 9, [29.92, 40.77]),
        ]),
        country(
            "Almanya",
            [104, 98, 112, 109, 117, 121],
            [(30, 20), (28, 14), (18, 22), (10, 9)],
            [10.45, 51.17],
        ),
        country(
            "İsveç",
            [72, 69, 78, 81, 85, 88],
            [(18, 12), (16, 9), (11, 14), (6, 5)],
            [18.64, 60.13],
        ),
        country(
            "Fransa",
            [95, 91, 99, 103, 108, 111],
            [(26, 17), (24, 13), (15, 19), (9, 8)],
            [2.21, 46.23],
        ),
        country(
            "Hollanda",
            [64, 61, 70, 73, 76, 79],
            [(14, 10), (13, 7), (9, 11), (5, 4)],
            [5.29, 52.13],
        ),
    ];

    let monthly_production = MONTHS
        .iter()
        .map(|month| {
            let value = by_country.iter().map(|c| c.production_for(month)).sum();
            MonthValue::new(*month, value)
        })
        .collect();

    let customers = generate_customers(&by_country, CUSTOMER_COUNT);

    Fixture {
        monthly_production,
        sales_by_model: vec![
            model("SUV (T10X)", 420, Some(5_000)),
            model("Sedan (C-Class)", 310, Some(3_500)),
            model("Hatchback", 260, Some(3_000)),
            model("Ticari (Van)", 150, None),
            model("Elektrikli (EV)", 190, Some(2_800)),
        ],
        by_country,
        customers,
        shipments: vec![
            shipment("Türkiye", "Almanya", 120),
            shipment("Türkiye", "Fransa", 85),
            shipment("Almanya", "Hollanda", 40),
            shipment("İsveç", "Almanya", 30),
            shipment("Türkiye", "İsveç", 25),
            // Spain has no country record; the map drops this arc.
            shipment("Fransa", "İspanya", 18),
        ],
    }
}

/// Process-wide sample fixture, built on first use and never mutated.
pub fn shared_fixture() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(sample_fixture)
}

/// Generate customers spread round-robin over the fixture countries.
pub fn generate_customers(countries: &[CountryRecord], count: usize) -> Vec<Customer> {
    if countries.is_empty() {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(DATA_SEED);

    (0..count)
        .map(|i| {
            let country = &countries[i % countries.len()];
            let name = CUSTOMER_NAMES[rng.gen_range(0..CUSTOMER_NAMES.len())];
            let segment = SEGMENTS[rng.gen_range(0..SEGMENTS.len())];
            Customer {
                id: format!("cus_{:03}", i + 1),
                name: format!("{} {}", name, i / countries.len() + 1),
                country: country.name.clone(),
                segment: segment.to_string(),
                orders: rng.gen_range(1..=40),
            }
        })
        .collect()
}

fn country(
    name: &str,
    production: [i64; 6],
    downtime: [(i64, i64); 4],
    coordinates: [f64; 2],
) -> CountryRecord {
    const REASONS: [&str; 4] = ["Bakım", "Arıza", "Malzeme", "Kalite"];
    const WEEKDAYS: [&str; 7] = ["Pzt", "Sal", "Çar", "Per", "Cum", "Cmt", "Paz"];

    let monthly_production = MONTHS
        .iter()
        .zip(production)
        .map(|(month, value)| MonthValue::new(*month, value))
        .collect();

    // Weekly order profile scaled from January production.
    let daily_orders = WEEKDAYS
        .iter()
        .enumerate()
        .map(|(i, day)| DailyOrder {
            day: day.to_string(),
            value: production[0] / 7 + (i as i64 % 3) - 1,
        })
        .collect();

    let downtime_by_reason = REASONS
        .iter()
        .zip(downtime)
        .map(|(reason, (planned, unplanned))| Downtime {
            reason: reason.to_string(),
            minutes: planned + unplanned,
        })
        .collect();

    CountryRecord {
        name: name.to_string(),
        monthly_production,
        daily_orders,
        downtime_by_reason,
        cities: Vec::new(),
        coordinates: Some(coordinates),
    }
}

impl CountryRecord {
    fn with_cities(mut self, cities: Vec<City>) -> Self {
        self.cities = cities;
        self
    }
}

fn city(name: &str, value: i64, coordinates: [f64; 2]) -> City {
    City { name: name.to_string(), value, coordinates }
}

fn model(name: &str, value: i64, capacity: Option<i64>) -> ModelSales {
    ModelSales { name: name.to_string(), value, capacity }
}

fn shipment(from: &str, to: &str, value: i64) -> Shipment {
    Shipment { from: from.to_string(), to: to.to_string(), value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let fixture = sample_fixture();
        assert_eq!(fixture.monthly_production.len(), 6);
        assert_eq!(fixture.by_country.len(), 5);
        assert_eq!(fixture.sales_by_model.len(), 5);
        assert_eq!(fixture.customers.len(), CUSTOMER_COUNT);
    }

    #[test]
    fn test_top_level_production_is_country_sum() {
        let fixture = sample_fixture();
        let expected = [463, 438, 494, 508, 536, 557];
        for (m, want) in fixture.monthly_production.iter().zip(expected) {
            assert_eq!(m.value, want, "month {}", m.month);
        }
    }

    #[test]
    fn test_is_deterministic() {
        let a = sample_fixture();
        let b = sample_fixture();
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_country_has_customers() {
        let fixture = sample_fixture();
        for record in &fixture.by_country {
            let count = fixture.customers.iter().filter(|c| c.country == record.name).count();
            assert_eq!(count, CUSTOMER_COUNT / fixture.by_country.len());
        }
    }

    #[test]
    fn test_customer_fields_in_range() {
        let fixture = sample_fixture();
        for customer in &fixture.customers {
            assert!((1..=40).contains(&customer.orders), "orders out of range for {}", customer.id);
            assert!(SEGMENTS.contains(&customer.segment.as_str()));
        }
    }

    #[test]
    fn test_unique_customer_ids() {
        let fixture = sample_fixture();
        let mut ids: Vec<&str> = fixture.customers.iter().map(|c| c.id.as_str()).collect();
        let original_len = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), original_len, "Customer IDs must be unique");
    }

    #[test]
    fn test_only_primary_country_has_cities() {
        let fixture = sample_fixture();
        for record in &fixture.by_country {
            assert_eq!(!record.cities.is_empty(), record.name == "Türkiye");
        }
    }

    #[test]
    fn test_shared_fixture_matches_sample() {
        assert_eq!(shared_fixture(), &sample_fixture());
        assert!(std::ptr::eq(shared_fixture(), shared_fixture()));
    }

    #[test]
    fn test_no_countries_means_no_customers() {
        assert!(generate_customers(&[], 10).is_empty());
    }
}
