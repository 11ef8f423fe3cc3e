//! Domain models for the dashboard derivation engine.
//!
//! These types are shared across all modules: data, simulator, engine, and report.

pub mod filter;
pub mod fixture;
pub mod report;
pub mod series;
