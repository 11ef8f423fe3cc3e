use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// A `{month, value}` pair of a monthly production series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthValue {
    /// Short month label (e.g., "Oca").
    pub month: String,
    /// Units produced in that month.
    pub value: i64,
}

impl MonthValue {
    pub fn new(month: impl Into<String>, value: i64) -> Self {
        MonthValue { month: month.into(), value }
    }
}

/// A `{day, value}` pair, used by both the fixture and the 30-day generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyOrder {
    /// Day label. Zero-padded ("01".."30") for generated series.
    pub day: String,
    /// Orders placed that day.
    pub value: i64,
}

/// Sales volume of one vehicle model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSales {
    /// Model display name (e.g., "SUV (T10X)").
    pub name: String,
    /// Units sold.
    pub value: i64,
    /// Storage capacity for this model, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
}

/// Minutes of line downtime attributed to one reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Downtime {
    pub reason: String,
    pub minutes: i64,
}

/// A city inside a country record, used for the city drilldown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    pub name: String,
    /// Relative sales weight of the city.
    pub value: i64,
    /// `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}

/// Per-country slice of the fixture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    /// Country name as authored in the fixture (map key in JSON).
    #[serde(skip)]
    pub name: String,
    pub monthly_production: Vec<MonthValue>,
    #[serde(default)]
    pub daily_orders: Vec<DailyOrder>,
    #[serde(default)]
    pub downtime_by_reason: Vec<Downtime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cities: Vec<City>,
    /// `[longitude, latitude]` of the country marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[f64; 2]>,
}

impl CountryRecord {
    /// Production for `month`, or 0 if the month is not in this record.
    pub fn production_for(&self, month: &str) -> i64 {
        self.monthly_production
            .iter()
            .filter(|m| m.month == month)
            .map(|m| m.value)
            .sum()
    }
}

/// A customer account, used for the country dropdown and customer table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub country: String,
    pub segment: String,
    pub orders: u32,
}

/// A vehicle shipment between two fixture countries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shipment {
    pub from: String,
    pub to: String,
    pub value: i64,
}

/// The static sample dataset the engine treats as ground truth.
///
/// `by_country` keeps the authoring order of the JSON object so that
/// rankings break ties deterministically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub monthly_production: Vec<MonthValue>,
    pub sales_by_model: Vec<ModelSales>,
    #[serde(with = "ordered_countries")]
    pub by_country: Vec<CountryRecord>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub shipments: Vec<Shipment>,
}

impl Fixture {
    /// Parse a fixture from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(DashboardError::InvalidFixture)
    }

    pub fn country(&self, name: &str) -> Option<&CountryRecord> {
        self.by_country.iter().find(|c| c.name == name)
    }

    pub fn model(&self, name: &str) -> Option<&ModelSales> {
        self.sales_by_model.iter().find(|m| m.name == name)
    }

    /// Month labels in fixture order.
    pub fn months(&self) -> impl Iterator<Item = &str> {
        self.monthly_production.iter().map(|m| m.month.as_str())
    }

    /// Zero-based position of `month` in the fixture's month order.
    pub fn month_index(&self, month: &str) -> Option<usize> {
        self.months().position(|m| m == month)
    }
}

/// (De)serializes `by_country` as a JSON object while keeping key order.
mod ordered_countries {
    use super::CountryRecord;
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(records: &[CountryRecord], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(records.iter().map(|r| (r.name.as_str(), r)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<CountryRecord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountriesVisitor;

        impl<'de> Visitor<'de> for CountriesVisitor {
            type Value = Vec<CountryRecord>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of country name to country record")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, mut record)) = map.next_entry::<String, CountryRecord>()? {
                    record.name = name;
                    records.push(record);
                }
                Ok(records)
            }
        }

        deserializer.deserialize_map(CountriesVisitor)
    }
}
