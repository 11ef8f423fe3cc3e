use serde::{Deserialize, Serialize};

use super::filter::FilterState;
use super::fixture::{Customer, DailyOrder, Downtime, MonthValue};
use super::series::{
    CityMarker, DailyOrderPair, ModelShare, MonthlyProfit, RankedEntry, ScatterPoint,
    ShipmentRoute, WaterfallStep,
};

/// Production, orders and money totals for one month (or a sum of months).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthTotals {
    pub production: i64,
    pub orders: i64,
    /// `orders * unit_sale_price`.
    pub revenue: i64,
    /// `production * unit_cost`.
    pub cost: i64,
}

impl MonthTotals {
    pub fn gross_profit(&self) -> i64 {
        self.revenue - self.cost
    }
}

impl std::ops::Add for MonthTotals {
    type Output = MonthTotals;

    fn add(self, rhs: MonthTotals) -> MonthTotals {
        MonthTotals {
            production: self.production + rhs.production,
            orders: self.orders + rhs.orders,
            revenue: self.revenue + rhs.revenue,
            cost: self.cost + rhs.cost,
        }
    }
}

impl std::iter::Sum for MonthTotals {
    fn sum<I: Iterator<Item = MonthTotals>>(iter: I) -> MonthTotals {
        iter.fold(MonthTotals::default(), |acc, t| acc + t)
    }
}

/// KPI card values: totals, synthetic stretch targets and display trends.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KpiBundle {
    pub total_production: i64,
    pub total_orders: i64,
    pub total_revenue: i64,
    pub total_cost: i64,
    /// Always `total_revenue - total_cost`.
    pub total_gross_profit: i64,
    pub target_production: i64,
    pub target_orders: i64,
    pub target_revenue: i64,
    pub target_cost: i64,
    /// `target_revenue - target_cost`.
    pub target_profit: i64,
    pub trend_production: i64,
    pub trend_orders: i64,
    pub trend_revenue: i64,
    pub trend_cost: i64,
    pub trend_profit: i64,
}

/// Every derived value the dashboard renders for one filter combination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub filters: FilterState,
    /// True when the selected country has city-level drilldown.
    pub city_drilldown: bool,
    pub kpis: KpiBundle,
    pub filtered_production: Vec<MonthValue>,
    pub scroll_orders30: Vec<DailyOrder>,
    pub scroll_orders180: Vec<DailyOrderPair>,
    pub scatter_series: Vec<ScatterPoint>,
    pub waterfall_series: Vec<WaterfallStep>,
    pub profit_by_country_or_city: Vec<RankedEntry>,
    pub top_sales_or_cities: Vec<RankedEntry>,
    pub monthly_profit_vs_target: Vec<MonthlyProfit>,
    pub stock_value: i64,
    pub stock_capacity: i64,
    pub downtime_by_reason: Vec<Downtime>,
    pub sales_by_model: Vec<ModelShare>,
    pub city_markers: Vec<CityMarker>,
    pub shipment_routes: Vec<ShipmentRoute>,
    pub filtered_customers: Vec<Customer>,
    pub country_options: Vec<String>,
    pub month_options: Vec<String>,
    pub model_options: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_totals_sum() {
        let a = MonthTotals { production: 10, orders: 8, revenue: 800, cost: 500 };
        let b = MonthTotals { production: 5, orders: 2, revenue: 200, cost: 400 };
        let total: MonthTotals = vec![a, b].into_iter().sum();
        assert_eq!(total, MonthTotals { production: 15, orders: 10, revenue: 1000, cost: 900 });
        assert_eq!(total.gross_profit(), 100);
        assert_eq!(b.gross_profit(), -200);
    }

    #[test]
    fn test_kpi_bundle_serializes_camel_case() {
        let json = serde_json::to_value(KpiBundle::default()).unwrap();
        assert!(json.get("totalGrossProfit").is_some());
        assert!(json.get("trendCost").is_some());
    }
}
