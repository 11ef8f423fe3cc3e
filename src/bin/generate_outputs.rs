//! CLI tool to generate the dashboard view and export files.
//!
//! Produces:
//! - `output/dashboard_view.json`: Every derived series for the selected filters
//! - `output/dashboard-data.csv`: The export rows (plain CSV profile)
//!
//! Flags: `--fixture <path>`, `--country <name>`, `--month <label>`,
//! `--model <name>`, `--out <dir>`, `--profile csv|excel`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use autopulse_dashboard::data::sample_fixture;
use autopulse_dashboard::engine::DashboardEngine;
use autopulse_dashboard::models::filter::FilterState;
use autopulse_dashboard::models::fixture::Fixture;
use autopulse_dashboard::report::csv::ExportConfig;
use autopulse_dashboard::report::export_view;
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "generate_outputs")]
#[command(about = "Write the dashboard view and CSV export for one filter combination", long_about = None)]
struct Args {
    /// JSON fixture to load instead of the built-in sample.
    #[arg(long)]
    fixture: Option<PathBuf>,

    #[arg(long)]
    country: Option<String>,

    #[arg(long)]
    month: Option<String>,

    #[arg(long)]
    model: Option<String>,

    /// Output directory.
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// Export profile: "csv" or "excel".
    #[arg(long, default_value = "csv", value_parser = parse_profile)]
    profile: ExportConfig,
}

impl Args {
    fn filters(&self) -> FilterState {
        let mut filters = FilterState::all();
        if let Some(country) = &self.country {
            filters = filters.with_country(country.as_str());
        }
        if let Some(month) = &self.month {
            filters = filters.with_month(month.as_str());
        }
        if let Some(model) = &self.model {
            filters = filters.with_model(model.as_str());
        }
        filters
    }
}

fn parse_profile(s: &str) -> std::result::Result<ExportConfig, String> {
    s.parse().map_err(|e: autopulse_dashboard::DashboardError| e.to_string())
}

fn load_fixture(path: Option<&PathBuf>) -> Result<Fixture> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading fixture {}", path.display()))?;
            Ok(Fixture::from_json(&json)?)
        }
        None => Ok(sample_fixture()),
    }
}

fn main() -> Result<()> {
    autopulse_dashboard::init_tracing();
    let args = Args::parse();

    let fixture = load_fixture(args.fixture.as_ref())?;
    let config = args.profile;
    let out_dir = &args.out;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let engine = DashboardEngine::with_defaults(&fixture);
    let filters = args.filters();
    let view = engine.view(&filters);

    let view_path = out_dir.join("dashboard_view.json");
    std::fs::write(&view_path, serde_json::to_string_pretty(&view)?)
        .with_context(|| format!("writing {}", view_path.display()))?;
    info!(path = %view_path.display(), "wrote dashboard view");

    let csv_path = out_dir.join("dashboard-data.csv");
    std::fs::write(&csv_path, export_view(&view, &filters, &config)?)
        .with_context(|| format!("writing {}", csv_path.display()))?;
    info!(path = %csv_path.display(), "wrote export");

    // Print summary
    let kpis = &view.kpis;
    println!();
    println!("=== DASHBOARD SUMMARY ===");
    println!("Country: {}", filters.country().unwrap_or("Tümü"));
    println!("Month:   {}", filters.month().unwrap_or("Tüm Aylar"));
    println!("Model:   {}", filters.model().unwrap_or("-"));
    println!();
    println!("--- KPIs (value / target / trend) ---");
    println!("  Production:   {:>10} / {:>10} / {:+}%", kpis.total_production, kpis.target_production, kpis.trend_production);
    println!("  Orders:       {:>10} / {:>10} / {:+}%", kpis.total_orders, kpis.target_orders, kpis.trend_orders);
    println!("  Revenue:      {:>10} / {:>10} / {:+}%", kpis.total_revenue, kpis.target_revenue, kpis.trend_revenue);
    println!("  Cost:         {:>10} / {:>10} / {:+}%", kpis.total_cost, kpis.target_cost, kpis.trend_cost);
    println!("  Gross Profit: {:>10} / {:>10} / {:+}%", kpis.total_gross_profit, kpis.target_profit, kpis.trend_profit);
    println!();
    println!("--- Stock ---");
    println!("  {} / {} vehicles", view.stock_value, view.stock_capacity);
    println!();
    println!("--- {} ---", if view.city_drilldown { "Top Cities" } else { "Top Sales" });
    for entry in &view.top_sales_or_cities {
        println!("  {}: {}", entry.name, entry.value);
    }
    println!();
    println!("--- Cumulative Difference ---");
    for step in &view.waterfall_series {
        println!("  {}: {:+} ({} -> {})", step.month, step.diff, step.start, step.end);
    }

    Ok(())
}
