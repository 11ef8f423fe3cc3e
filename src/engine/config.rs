//! Business constants for the aggregation engine.
//!
//! Every coefficient the dashboard hardcodes lives here as an explicit
//! lookup table with one documented default, so tests can swap a table
//! without touching the aggregation logic.

use serde::{Deserialize, Serialize};

/// Bidirectional map between fixture country names and canonical seed keys.
///
/// Fixture names are Turkish ("Almanya"); seed keys are English ("Germany").
/// Names without an entry pass through unchanged in both directions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryKeyMap {
    entries: Vec<(String, String)>,
}

impl CountryKeyMap {
    pub fn new<I, A, B>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        CountryKeyMap {
            entries: entries.into_iter().map(|(a, b)| (a.into(), b.into())).collect(),
        }
    }

    /// Canonical key for a fixture country name.
    pub fn to_key<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(local, _)| local == name)
            .map(|(_, key)| key.as_str())
            .unwrap_or(name)
    }

    /// Fixture country name for a canonical key.
    pub fn to_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(_, k)| k == key)
            .map(|(local, _)| local.as_str())
            .unwrap_or(key)
    }
}

impl Default for CountryKeyMap {
    fn default() -> Self {
        CountryKeyMap::new([
            ("Türkiye", "Turkey"),
            ("Almanya", "Germany"),
            ("İsveç", "Sweden"),
            ("Fransa", "France"),
            ("Hollanda", "Netherlands"),
        ])
    }
}

/// Stretch-goal multipliers applied to KPI totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct KpiTargets {
    pub production: f64,
    pub orders: f64,
    pub revenue: f64,
    pub cost: f64,
}

impl Default for KpiTargets {
    fn default() -> Self {
        KpiTargets {
            production: 1.15,
            orders: 1.10,
            revenue: 1.20,
            cost: 1.05,
        }
    }
}

/// Trend percentages shown on the KPI cards.
///
/// These are display constants; nothing computes them from history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct KpiTrends {
    pub production: i64,
    pub orders: i64,
    pub revenue: i64,
    pub cost: i64,
    pub profit: i64,
}

impl Default for KpiTrends {
    fn default() -> Self {
        KpiTrends {
            production: 12,
            orders: 8,
            revenue: 15,
            cost: -4,
            profit: 22,
        }
    }
}

/// Per-model monthly depletion rate of the stock simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecayRate {
    pub model: String,
    pub rate: f64,
}

/// Constants of the closed-form stock simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockTable {
    /// Capacity when no model is selected (or the model is unknown).
    pub global_capacity: i64,
    /// Capacity of a known model that has no capacity of its own.
    pub model_capacity_fallback: i64,
    /// Country factor for the all-countries scope.
    pub all_countries_factor: f64,
    /// Country factor for the primary country.
    pub primary_country_factor: f64,
    /// Country factor for any other selected country.
    pub other_country_factor: f64,
    pub decay_rates: Vec<DecayRate>,
    /// Rate for models without an entry in `decay_rates`.
    pub default_decay_rate: f64,
    /// Fill ratio at the start of the year.
    pub fill_ratio: f64,
}

impl StockTable {
    pub fn decay_rate(&self, model: Option<&str>) -> f64 {
        model
            .and_then(|m| self.decay_rates.iter().find(|d| d.model == m))
            .map(|d| d.rate)
            .unwrap_or(self.default_decay_rate)
    }
}

impl Default for StockTable {
    fn default() -> Self {
        let rates = [
            ("SUV (T10X)", 0.04),
            ("Sedan (C-Class)", 0.08),
            ("Hatchback", 0.06),
            ("Ticari (Van)", 0.12),
            ("Elektrikli (EV)", 0.05),
        ];
        StockTable {
            global_capacity: 15_000,
            model_capacity_fallback: 2_500,
            all_countries_factor: 1.0,
            primary_country_factor: 0.5,
            other_country_factor: 0.125,
            decay_rates: rates
                .into_iter()
                .map(|(model, rate)| DecayRate { model: model.to_string(), rate })
                .collect(),
            default_decay_rate: 0.08,
            fill_ratio: 0.95,
        }
    }
}

/// Multipliers turning a city's sales weight into chart values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CityMultipliers {
    pub sales: i64,
    pub profit: i64,
}

impl Default for CityMultipliers {
    fn default() -> Self {
        CityMultipliers { sales: 1_000, profit: 500 }
    }
}

/// All tunable constants of the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Country that gets city drilldown and the primary stock factor.
    pub primary_country: String,
    pub country_keys: CountryKeyMap,
    pub kpi_targets: KpiTargets,
    pub kpi_trends: KpiTrends,
    pub stock: StockTable,
    pub city_multipliers: CityMultipliers,
    /// Monthly profit target as a multiple of profit.
    pub profit_target_factor: f64,
    /// Length of the top-sales list when ranking countries.
    pub top_sales_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            primary_country: "Türkiye".to_string(),
            country_keys: CountryKeyMap::default(),
            kpi_targets: KpiTargets::default(),
            kpi_trends: KpiTrends::default(),
            stock: StockTable::default(),
            city_multipliers: CityMultipliers::default(),
            profit_target_factor: 1.2,
            top_sales_limit: 6,
        }
    }
}
