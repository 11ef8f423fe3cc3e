//! Closed-form stock simulation for the vehicle storage gauge.
//!
//! Not data-driven: capacity comes from the model filter, shrinks with the
//! country factor and depletes linearly with the month index.

use super::config::StockTable;
use super::scope::{MonthScope, Scope};
use crate::models::fixture::Fixture;
use crate::models::series::StockLevel;

/// Simulate stock for the given model, country scope and month scope.
pub fn simulate_stock(
    fixture: &Fixture,
    table: &StockTable,
    model: Option<&str>,
    scope: &Scope<'_>,
    months: &MonthScope<'_>,
) -> StockLevel {
    let base_capacity = match model.and_then(|name| fixture.model(name)) {
        Some(found) => found.capacity.unwrap_or(table.model_capacity_fallback),
        None => table.global_capacity,
    };

    let country_factor = match scope {
        Scope::AllCountries => table.all_countries_factor,
        Scope::SingleCountryWithCityDrilldown(_) => table.primary_country_factor,
        Scope::SingleCountry(_) | Scope::Unmatched(_) => table.other_country_factor,
    };

    let month_factor = match months {
        MonthScope::Single { index, .. } => 1.0 - (*index as f64) * table.decay_rate(model),
        MonthScope::AllMonths | MonthScope::Unmatched(_) => 1.0,
    };

    let capacity = ((base_capacity as f64) * country_factor).floor().max(0.0) as i64;
    let depleted = capacity as f64 * month_factor * table.fill_ratio;
    let value = (capacity as f64).min(depleted).floor().max(0.0) as i64;

    StockLevel { value, capacity }
}
