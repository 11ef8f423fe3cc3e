/// AutoPulse Dashboard: Shared Library
///
/// This crate contains the derivation engine behind the AutoPulse
/// production/sales dashboard: the sample fixture, the deterministic
/// series generators, the aggregation engine and the export formatter.
///
/// Each serverless function in `api/` imports from this library
/// to keep handlers thin and logic reusable.

pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod simulator;

pub use error::{DashboardError, Result};

use tracing_subscriber::EnvFilter;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Install the global `tracing` subscriber used by every binary.
///
/// Honours `RUST_LOG`; falls back to `info`. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
