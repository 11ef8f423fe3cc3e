use serde::{Deserialize, Serialize};

/// One day of the 180-day orders/production trend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyOrderPair {
    /// Day label, "1".."180" (not zero-padded).
    pub day: String,
    pub orders: i64,
    pub production: i64,
}

/// A point of the production-vs-orders scatter chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScatterPoint {
    /// Production (x axis).
    pub x: i64,
    /// Production minus orders (y axis).
    pub y: i64,
    pub month: String,
    pub production: i64,
    pub orders: i64,
}

/// A step of the cumulative production-minus-orders waterfall.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaterfallStep {
    pub month: String,
    pub production: i64,
    pub orders: i64,
    /// `production - orders` for this month.
    pub diff: i64,
    /// Cumulative total before this month.
    pub start: i64,
    /// Cumulative total after this month (`start + diff`).
    pub end: i64,
}

/// A named value in a ranked list (countries or cities).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedEntry {
    pub name: String,
    pub value: i64,
}

impl RankedEntry {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        RankedEntry { name: name.into(), value }
    }
}

/// Gross profit against its stretch target for one month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyProfit {
    pub month: String,
    /// Gross profit, floored at zero.
    pub profit: i64,
    /// Profit target, floored at zero.
    pub target: f64,
}

/// Simulated stock level against storage capacity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockLevel {
    pub value: i64,
    pub capacity: i64,
}

/// Donut chart slice for one vehicle model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelShare {
    pub name: String,
    pub value: i64,
    /// Share of total model sales, 0.0–100.0.
    pub share_pct: f64,
    /// True when this model is the active model filter.
    pub selected: bool,
}

/// A shipment arc with both endpoints resolved to map coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRoute {
    pub from: String,
    pub to: String,
    pub value: i64,
    pub from_coordinates: [f64; 2],
    pub to_coordinates: [f64; 2],
}

/// A city marker for the drilldown map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityMarker {
    pub name: String,
    pub value: i64,
    pub coordinates: [f64; 2],
}
