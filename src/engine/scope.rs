//! Scope resolution: which slice of the fixture the current filters select.
//!
//! Every aggregator consumes the resolved [`Scope`] and [`MonthScope`]
//! instead of comparing country names itself.

use tracing::{debug, warn};

use super::config::EngineConfig;
use crate::models::filter::FilterState;
use crate::models::fixture::{CountryRecord, Fixture};

/// The country slice implied by the country filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Scope<'a> {
    /// No country selected: aggregate over every fixture country.
    AllCountries,
    /// One fixture country.
    SingleCountry(&'a CountryRecord),
    /// The primary country, whose rankings drill down to cities.
    SingleCountryWithCityDrilldown(&'a CountryRecord),
    /// A selected country that the fixture does not contain.
    Unmatched(String),
}

impl<'a> Scope<'a> {
    pub fn is_drilldown(&self) -> bool {
        matches!(self, Scope::SingleCountryWithCityDrilldown(_))
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self, Scope::Unmatched(_))
    }
}

/// Resolve the country filter against the fixture.
pub fn resolve_scope<'a>(
    fixture: &'a Fixture,
    config: &EngineConfig,
    filters: &FilterState,
) -> Scope<'a> {
    let Some(name) = filters.country() else {
        return Scope::AllCountries;
    };
    match fixture.country(name) {
        Some(record) if record.name == config.primary_country => {
            debug!(country = name, "city drilldown scope");
            Scope::SingleCountryWithCityDrilldown(record)
        }
        Some(record) => Scope::SingleCountry(record),
        None => {
            warn!(country = name, "selected country not in fixture");
            Scope::Unmatched(name.to_string())
        }
    }
}

/// The month slice implied by the month filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthScope<'a> {
    /// No month selected: every fixture month, in fixture order.
    AllMonths,
    /// One fixture month and its zero-based index.
    Single { month: &'a str, index: usize },
    /// A selected month that the fixture does not contain.
    Unmatched(String),
}

impl<'a> MonthScope<'a> {
    /// Months to sum over. Empty for an unmatched month.
    pub fn months(&self, fixture: &'a Fixture) -> Vec<&'a str> {
        match self {
            MonthScope::AllMonths => fixture.months().collect(),
            MonthScope::Single { month, .. } => vec![*month],
            MonthScope::Unmatched(_) => Vec::new(),
        }
    }

    /// Whether `month` passes the month filter.
    pub fn includes(&self, month: &str) -> bool {
        match self {
            MonthScope::AllMonths => true,
            MonthScope::Single { month: selected, .. } => *selected == month,
            MonthScope::Unmatched(_) => false,
        }
    }
}

/// Resolve the month filter against the fixture's month domain.
pub fn resolve_months<'a>(fixture: &'a Fixture, filters: &FilterState) -> MonthScope<'a> {
    let Some(month) = filters.month() else {
        return MonthScope::AllMonths;
    };
    match fixture.month_index(month) {
        Some(index) => MonthScope::Single {
            month: fixture.monthly_production[index].month.as_str(),
            index,
        },
        None => {
            warn!(month, "selected month not in fixture");
            MonthScope::Unmatched(month.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_fixture;

    #[test]
    fn test_no_country_is_all_countries() {
        let fixture = sample_fixture();
        let scope = resolve_scope(&fixture, &EngineConfig::default(), &FilterState::all());
        assert_eq!(scope, Scope::AllCountries);
    }

    #[test]
    fn test_primary_country_drills_down() {
        let fixture = sample_fixture();
        let filters = FilterState::all().with_country("Türkiye");
        let scope = resolve_scope(&fixture, &EngineConfig::default(), &filters);
        assert!(scope.is_drilldown());
        assert!(matches!(scope, Scope::SingleCountryWithCityDrilldown(c) if c.name == "Türkiye"));
    }

    #[test]
    fn test_other_country_is_single() {
        let fixture = sample_fixture();
        let filters = FilterState::all().with_country("Fransa");
        let scope = resolve_scope(&fixture, &EngineConfig::default(), &filters);
        assert!(matches!(scope, Scope::SingleCountry(c) if c.name == "Fransa"));
    }

    #[test]
    fn test_primary_country_is_configurable() {
        let fixture = sample_fixture();
        let config = EngineConfig { primary_country: "Fransa".to_string(), ..EngineConfig::default() };
        let fransa = resolve_scope(&fixture, &config, &FilterState::all().with_country("Fransa"));
        let turkiye = resolve_scope(&fixture, &config, &FilterState::all().with_country("Türkiye"));
        assert!(fransa.is_drilldown());
        assert!(!turkiye.is_drilldown());
    }

    #[test]
    fn test_unknown_country_is_unmatched() {
        let fixture = sample_fixture();
        let filters = FilterState::all().with_country("Atlantis");
        let scope = resolve_scope(&fixture, &EngineConfig::default(), &filters);
        assert_eq!(scope, Scope::Unmatched("Atlantis".to_string()));
    }

    #[test]
    fn test_month_resolution() {
        let fixture = sample_fixture();
        assert_eq!(resolve_months(&fixture, &FilterState::all()).months(&fixture).len(), 6);

        let mar = resolve_months(&fixture, &FilterState::all().with_month("Mar"));
        assert_eq!(mar, MonthScope::Single { month: "Mar", index: 2 });
        assert_eq!(mar.months(&fixture), vec!["Mar"]);
        assert!(mar.includes("Mar"));
        assert!(!mar.includes("Nis"));

        let haz = resolve_months(&fixture, &FilterState::all().with_month("Haz"));
        assert_eq!(haz, MonthScope::Single { month: "Haz", index: 5 });
        assert_eq!(fixture.month_index("Haz"), Some(5));

        let unknown = resolve_months(&fixture, &FilterState::all().with_month("Ara"));
        assert!(unknown.months(&fixture).is_empty());
        assert!(!unknown.includes("Oca"));
    }
}
