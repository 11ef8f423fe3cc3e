//! Unit economics per (country, month).
//!
//! Demo pricing: the same selection always yields the same price and cost.
//! Sale price lands in 180..=260 and cost at 55%..78% of the sale price.

use serde::{Deserialize, Serialize};

use super::hash_str;

/// Key used when no country or no month is selected.
pub const ALL_KEY: &str = "ALL";

const BASE_PRICE: u32 = 180;
const PRICE_SPREAD: u32 = 81;
const BASE_COST_FACTOR: f64 = 0.55;
const COST_FACTOR_STEPS: u32 = 24;

/// Price and cost of a single vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnitEconomics {
    pub unit_sale_price: i64,
    pub unit_cost: i64,
}

impl UnitEconomics {
    /// The "no filter" pair, `unit_economics("ALL", "ALL")`.
    pub fn reference() -> Self {
        unit_economics(ALL_KEY, ALL_KEY)
    }
}

/// Price and cost seeded by `"<country_key>|<month>"`.
pub fn unit_economics(country_key: &str, month: &str) -> UnitEconomics {
    let seed = hash_str(&format!("{country_key}|{month}"));
    let unit_sale_price = BASE_PRICE + seed % PRICE_SPREAD;
    let cost_factor = BASE_COST_FACTOR + f64::from(seed % COST_FACTOR_STEPS) / 100.0;
    let unit_cost = (f64::from(unit_sale_price) * cost_factor).round() as i64;

    UnitEconomics {
        unit_sale_price: i64::from(unit_sale_price),
        unit_cost,
    }
}
