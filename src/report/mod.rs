/// Dashboard export: flattens the current view into downloadable rows.
///
/// Mirrors the dashboard's "Export CSV" button: one row per displayed
/// production month plus a single KPI summary row.

pub mod csv;

use crate::error::Result;
use crate::models::filter::FilterState;
use crate::models::report::DashboardView;

use self::csv::{to_delimited_text, ExportConfig, ExportRow};

/// Label used for a filter that is not set.
const ALL_LABEL: &str = "All";

/// Build the export rows for a derived view.
pub fn export_rows(view: &DashboardView, filters: &FilterState) -> Vec<ExportRow> {
    let country = filters.country().unwrap_or(ALL_LABEL);

    let mut rows: Vec<ExportRow> = view
        .filtered_production
        .iter()
        .map(|p| {
            ExportRow::new()
                .with("Type", "Production")
                .with("Month", p.month.as_str())
                .with("Value", p.value)
                .with("Country", country)
        })
        .collect();

    rows.push(
        ExportRow::new()
            .with("Type", "KPI_Summary")
            .with("Month", filters.month().unwrap_or(ALL_LABEL))
            .with(
                "Value",
                format!("Rev:{}|Cost:{}", view.kpis.total_revenue, view.kpis.total_cost),
            )
            .with("Country", country),
    );
    rows
}

/// Export the view as delimited text with the given profile.
pub fn export_view(
    view: &DashboardView,
    filters: &FilterState,
    config: &ExportConfig,
) -> Result<String> {
    to_delimited_text(&export_rows(view, filters), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_fixture;
    use crate::engine::DashboardEngine;
    use crate::report::csv::Cell;

    #[test]
    fn test_rows_cover_production_and_summary() {
        let fixture = sample_fixture();
        let engine = DashboardEngine::with_defaults(&fixture);
        let filters = FilterState::all();
        let view = engine.view(&filters);
        let rows = export_rows(&view, &filters);

        assert_eq!(rows.len(), view.filtered_production.len() + 1);
        assert_eq!(rows[0].get("Type"), Some(&Cell::from("Production")));
        assert_eq!(rows[0].get("Country"), Some(&Cell::from("All")));

        let summary = rows.last().unwrap();
        assert_eq!(summary.get("Type"), Some(&Cell::from("KPI_Summary")));
        let expected = format!("Rev:{}|Cost:{}", view.kpis.total_revenue, view.kpis.total_cost);
        assert_eq!(summary.get("Value"), Some(&Cell::from(expected)));
    }

    #[test]
    fn test_filtered_export_text() {
        let fixture = sample_fixture();
        let engine = DashboardEngine::with_defaults(&fixture);
        let filters = FilterState::all().with_country("Almanya").with_month("Mar");
        let view = engine.view(&filters);
        let text = export_view(&view, &filters, &ExportConfig::comma()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Type,Month,Value,Country");
        assert_eq!(lines[1], "\"Production\",\"Mar\",\"112\",\"Almanya\"");
        assert!(lines[2].starts_with("\"KPI_Summary\",\"Mar\",\"Rev:"));
    }

    #[test]
    fn test_unknown_country_still_exports_summary() {
        let fixture = sample_fixture();
        let engine = DashboardEngine::with_defaults(&fixture);
        let filters = FilterState::all().with_country("Atlantis");
        let view = engine.view(&filters);
        let rows = export_rows(&view, &filters);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Value"), Some(&Cell::from("Rev:0|Cost:0")));
    }
}
