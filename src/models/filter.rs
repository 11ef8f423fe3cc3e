use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DashboardError, Result};

/// Current dashboard filter selections.
///
/// All three filters are optional and orthogonal. `None` means "aggregate
/// over everything". Empty or whitespace-only strings are treated as `None`,
/// matching the "Tümü" (all) option of the dashboard selects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default, alias = "country", deserialize_with = "blank_as_none")]
    pub selected_country: Option<String>,
    #[serde(default, alias = "month", deserialize_with = "blank_as_none")]
    pub selected_month: Option<String>,
    #[serde(default, alias = "model", deserialize_with = "blank_as_none")]
    pub selected_model: Option<String>,
}

impl FilterState {
    /// No filters: every country, every month, no model.
    pub fn all() -> Self {
        FilterState::default()
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.selected_country = non_blank(country.into());
        self
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.selected_month = non_blank(month.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.selected_model = non_blank(model.into());
        self
    }

    pub fn country(&self) -> Option<&str> {
        self.selected_country.as_deref()
    }

    pub fn month(&self) -> Option<&str> {
        self.selected_month.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    /// Model filter after a click on `clicked`: clicking the active model clears it.
    pub fn toggle_model(mut self, clicked: &str) -> Self {
        if self.model() == Some(clicked) {
            self.selected_model = None;
        } else {
            self.selected_model = non_blank(clicked.to_string());
        }
        self
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(non_blank))
}

/// API request body for the /api/dashboard endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardRequest {
    #[serde(flatten)]
    pub filters: FilterState,
}

impl DashboardRequest {
    /// Parse a request body. An empty body means "no filters".
    pub fn from_json_bytes(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(DashboardRequest::default());
        }
        serde_json::from_slice(body).map_err(DashboardError::InvalidRequest)
    }
}

/// API request body for the /api/export endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(flatten)]
    pub filters: FilterState,
    /// Export profile name: "csv" (default) or "excel".
    #[serde(default)]
    pub profile: Option<String>,
}

impl ExportRequest {
    pub fn from_json_bytes(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ExportRequest::default());
        }
        serde_json::from_slice(body).map_err(DashboardError::InvalidRequest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_strings_mean_no_filter() {
        let req = DashboardRequest::from_json_bytes(br#"{"country": "", "month": "  ", "model": null}"#)
            .unwrap();
        assert_eq!(req.filters, FilterState::all());
    }

    #[test]
    fn test_accepts_short_and_long_field_names() {
        let short = DashboardRequest::from_json_bytes(br#"{"country": "Almanya", "month": "Mar"}"#).unwrap();
        let long = DashboardRequest::from_json_bytes(
            br#"{"selectedCountry": "Almanya", "selectedMonth": "Mar"}"#,
        )
        .unwrap();
        assert_eq!(short.filters, long.filters);
        assert_eq!(short.filters.country(), Some("Almanya"));
        assert_eq!(short.filters.month(), Some("Mar"));
        assert_eq!(short.filters.model(), None);
    }

    #[test]
    fn test_empty_body_is_default() {
        let req = ExportRequest::from_json_bytes(b"").unwrap();
        assert_eq!(req.filters, FilterState::all());
        assert!(req.profile.is_none());
    }

    #[test]
    fn test_export_request_reads_profile() {
        let req = ExportRequest::from_json_bytes(br#"{"country": "Fransa", "profile": "excel"}"#).unwrap();
        assert_eq!(req.filters.country(), Some("Fransa"));
        assert_eq!(req.profile.as_deref(), Some("excel"));
    }

    #[test]
    fn test_malformed_body_is_invalid_request() {
        let err = DashboardRequest::from_json_bytes(b"{not json").unwrap_err();
        assert_eq!(err.kind(), "invalid_request");
    }

    #[test]
    fn test_toggle_model_clears_on_second_click() {
        let filters = FilterState::all().toggle_model("Hatchback");
        assert_eq!(filters.model(), Some("Hatchback"));
        let filters = filters.toggle_model("Hatchback");
        assert_eq!(filters.model(), None);
        let filters = filters.toggle_model("Hatchback").toggle_model("Ticari (Van)");
        assert_eq!(filters.model(), Some("Ticari (Van)"));
    }

    #[test]
    fn test_builders_normalize_blank() {
        let filters = FilterState::all().with_country("").with_month("Oca");
        assert_eq!(filters.country(), None);
        assert_eq!(filters.month(), Some("Oca"));
    }
}
