//! Error types for the dashboard boundary.
//!
//! The derivation engine itself is total and never returns these; they only
//! surface where external input is parsed (request bodies, fixture JSON,
//! export profiles) or where export text is written.

use thiserror::Error;

/// Errors produced while parsing input at the edges of the crate.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Request body was not valid JSON for the expected shape.
    #[error("invalid request body: {0}")]
    InvalidRequest(#[source] serde_json::Error),
    /// Fixture document could not be deserialized.
    #[error("invalid fixture: {0}")]
    InvalidFixture(#[source] serde_json::Error),
    /// Export profile name is not one of the known presets.
    #[error("unsupported export profile: {0}")]
    UnsupportedProfile(String),
    /// Delimiter is not `,` or `;`.
    #[error("unsupported delimiter: {0:?}")]
    UnsupportedDelimiter(char),
    /// Writing delimited text failed.
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}

impl DashboardError {
    /// Short machine-readable tag used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::InvalidRequest(_) => "invalid_request",
            DashboardError::InvalidFixture(_) => "invalid_fixture",
            DashboardError::UnsupportedProfile(_) => "unsupported_profile",
            DashboardError::UnsupportedDelimiter(_) => "unsupported_delimiter",
            DashboardError::Export(_) => "export_failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
