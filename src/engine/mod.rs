/// Aggregation engine: derives every dashboard series from fixture + filters.
///
/// The engine borrows an immutable [`Fixture`] and owns its constant tables
/// ([`EngineConfig`]). All operations are pure and total: an unknown country,
/// month or model degrades to zero/empty output instead of failing.

pub mod config;
pub mod ranking;
pub mod scope;
pub mod stock;

use tracing::debug;

use crate::models::filter::FilterState;
use crate::models::fixture::{CountryRecord, Customer, DailyOrder, Downtime, Fixture, MonthValue};
use crate::models::report::{DashboardView, KpiBundle, MonthTotals};
use crate::models::series::{
    CityMarker, DailyOrderPair, ModelShare, MonthlyProfit, RankedEntry, ScatterPoint,
    ShipmentRoute, StockLevel, WaterfallStep,
};
use crate::simulator::economics::{unit_economics, UnitEconomics, ALL_KEY};
use crate::simulator::{daily_orders_180, daily_orders_30, total_orders};

use self::config::EngineConfig;
use self::ranking::{rank_cities, rank_descending, top_n};
use self::scope::{resolve_months, resolve_scope, MonthScope, Scope};

/// Month key of the 30-day scroll chart when no month is selected.
const ALL_MONTHS_KEY: &str = "ALL_MONTHS";
/// Seed suffix of the 180-day trend, which ignores the month filter.
const YEAR_VIEW_KEY: &str = "view:YEARly";

/// Seed key of a country's 30-day order sequence for one month.
fn order_seed_key(country_key: &str, month: &str) -> String {
    format!("country:{country_key}|month:{month}")
}

/// The derivation engine behind the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardEngine<'a> {
    fixture: &'a Fixture,
    config: EngineConfig,
}

impl<'a> DashboardEngine<'a> {
    /// Creates an engine over `fixture` with the given constant tables.
    pub fn new(fixture: &'a Fixture, config: EngineConfig) -> Self {
        DashboardEngine { fixture, config }
    }

    /// Creates an engine with the default constant tables.
    pub fn with_defaults(fixture: &'a Fixture) -> Self {
        Self::new(fixture, EngineConfig::default())
    }

    pub fn scope(&self, filters: &FilterState) -> Scope<'a> {
        resolve_scope(self.fixture, &self.config, filters)
    }

    pub fn months(&self, filters: &FilterState) -> MonthScope<'a> {
        resolve_months(self.fixture, filters)
    }

    /// Canonical seed key of a fixture country.
    pub fn country_key<'s>(&'s self, record: &'s CountryRecord) -> &'s str {
        self.config.country_keys.to_key(&record.name)
    }

    /// Seed key of a scope: "ALL", the country key, or `None` when unmatched.
    fn scope_key(&self, scope: &Scope<'a>) -> Option<String> {
        match scope {
            Scope::AllCountries => Some(ALL_KEY.to_string()),
            Scope::SingleCountry(record) | Scope::SingleCountryWithCityDrilldown(record) => {
                Some(self.country_key(record).to_string())
            }
            Scope::Unmatched(_) => None,
        }
    }

    /// 30-day order total of one country in one month.
    fn country_orders(&self, record: &CountryRecord, month: &str) -> i64 {
        total_orders(&daily_orders_30(&order_seed_key(self.country_key(record), month)))
    }

    /// Order total for `month` within `scope`.
    ///
    /// All countries sums every fixture country's own sequence; a single
    /// country uses its own key. This is the only place order seed keys are
    /// built for monthly totals.
    pub fn monthly_order_total(&self, month: &str, scope: &Scope<'a>) -> i64 {
        match scope {
            Scope::AllCountries => self
                .fixture
                .by_country
                .iter()
                .map(|record| self.country_orders(record, month))
                .sum(),
            Scope::SingleCountry(record) | Scope::SingleCountryWithCityDrilldown(record) => {
                self.country_orders(record, month)
            }
            Scope::Unmatched(_) => 0,
        }
    }

    /// Production, orders, revenue and cost of one country in one month,
    /// priced with that country's own unit economics.
    pub fn country_month_totals(&self, record: &CountryRecord, month: &str) -> MonthTotals {
        let economics = unit_economics(self.country_key(record), month);
        let production = record.production_for(month);
        let orders = self.country_orders(record, month);
        MonthTotals {
            production,
            orders,
            revenue: orders * economics.unit_sale_price,
            cost: production * economics.unit_cost,
        }
    }

    /// Month totals for `scope`. All countries is the sum over countries.
    pub fn month_totals(&self, month: &str, scope: &Scope<'a>) -> MonthTotals {
        match scope {
            Scope::AllCountries => self
                .fixture
                .by_country
                .iter()
                .map(|record| self.country_month_totals(record, month))
                .sum(),
            Scope::SingleCountry(record) | Scope::SingleCountryWithCityDrilldown(record) => {
                self.country_month_totals(record, month)
            }
            Scope::Unmatched(_) => MonthTotals::default(),
        }
    }

    /// KPI totals with synthetic targets and display trends.
    pub fn kpis(&self, filters: &FilterState) -> KpiBundle {
        let scope = self.scope(filters);
        let totals: MonthTotals = self
            .months(filters)
            .months(self.fixture)
            .into_iter()
            .map(|month| self.month_totals(month, &scope))
            .sum();

        let targets = &self.config.kpi_targets;
        let trends = &self.config.kpi_trends;
        let target = |total: i64, factor: f64| (total as f64 * factor).round() as i64;
        let target_revenue = target(totals.revenue, targets.revenue);
        let target_cost = target(totals.cost, targets.cost);

        KpiBundle {
            total_production: totals.production,
            total_orders: totals.orders,
            total_revenue: totals.revenue,
            total_cost: totals.cost,
            total_gross_profit: totals.gross_profit(),
            target_production: target(totals.production, targets.production),
            target_orders: target(totals.orders, targets.orders),
            target_revenue,
            target_cost,
            target_profit: target_revenue - target_cost,
            trend_production: trends.production,
            trend_orders: trends.orders,
            trend_revenue: trends.revenue,
            trend_cost: trends.cost,
            trend_profit: trends.profit,
        }
    }

    /// Monthly production of the scope before the month filter.
    ///
    /// For all countries, every fixture month re-summed across countries.
    fn scope_production(&self, scope: &Scope<'a>) -> Vec<MonthValue> {
        match scope {
            Scope::AllCountries => self
                .fixture
                .months()
                .map(|month| {
                    let value = self
                        .fixture
                        .by_country
                        .iter()
                        .map(|record| record.production_for(month))
                        .sum();
                    MonthValue::new(month, value)
                })
                .collect(),
            Scope::SingleCountry(record) | Scope::SingleCountryWithCityDrilldown(record) => {
                record.monthly_production.clone()
            }
            Scope::Unmatched(_) => Vec::new(),
        }
    }

    /// Monthly production of the scope, restricted by the month filter.
    pub fn filtered_production(&self, filters: &FilterState) -> Vec<MonthValue> {
        let months = self.months(filters);
        self.scope_production(&self.scope(filters))
            .into_iter()
            .filter(|m| months.includes(&m.month))
            .collect()
    }

    /// 30-day order scroll for the current country and month.
    pub fn scroll_orders_30(&self, filters: &FilterState) -> Vec<DailyOrder> {
        let Some(country_key) = self.scope_key(&self.scope(filters)) else {
            return Vec::new();
        };
        let month_key = match self.months(filters) {
            MonthScope::AllMonths => ALL_MONTHS_KEY,
            MonthScope::Single { month, .. } => month,
            MonthScope::Unmatched(_) => return Vec::new(),
        };
        daily_orders_30(&order_seed_key(&country_key, month_key))
    }

    /// 180-day orders/production trend for the current country.
    pub fn scroll_orders_180(&self, filters: &FilterState) -> Vec<DailyOrderPair> {
        match self.scope_key(&self.scope(filters)) {
            Some(country_key) => daily_orders_180(&format!("country:{country_key}|{YEAR_VIEW_KEY}")),
            None => Vec::new(),
        }
    }

    /// Production vs production-minus-orders, one point per displayed month.
    pub fn scatter_series(&self, filters: &FilterState) -> Vec<ScatterPoint> {
        let scope = self.scope(filters);
        self.filtered_production(filters)
            .into_iter()
            .map(|p| {
                let orders = self.monthly_order_total(&p.month, &scope);
                ScatterPoint {
                    x: p.value,
                    y: p.value - orders,
                    production: p.value,
                    orders,
                    month: p.month,
                }
            })
            .collect()
    }

    /// Cumulative production-minus-orders walk over the displayed months.
    ///
    /// The walk starts at zero at the first displayed month, so a month
    /// filter restricts the cumulative base as well as the rendered steps.
    pub fn waterfall_series(&self, filters: &FilterState) -> Vec<WaterfallStep> {
        let scope = self.scope(filters);
        let mut cumulative = 0;
        self.filtered_production(filters)
            .into_iter()
            .map(|p| {
                let orders = self.monthly_order_total(&p.month, &scope);
                let diff = p.value - orders;
                let start = cumulative;
                cumulative += diff;
                WaterfallStep {
                    month: p.month,
                    production: p.value,
                    orders,
                    diff,
                    start,
                    end: cumulative,
                }
            })
            .collect()
    }

    /// Profit share by country, or by city under drilldown.
    ///
    /// Countries are priced with the reference economics and floored at zero.
    pub fn profit_by_country_or_city(&self, filters: &FilterState) -> Vec<RankedEntry> {
        let scope = self.scope(filters);
        match scope {
            Scope::SingleCountryWithCityDrilldown(record) => {
                rank_cities(&record.cities, self.config.city_multipliers.profit)
            }
            Scope::Unmatched(_) => Vec::new(),
            Scope::AllCountries | Scope::SingleCountry(_) => {
                let reference = UnitEconomics::reference();
                let months = self.months(filters).months(self.fixture);
                let rows = self
                    .fixture
                    .by_country
                    .iter()
                    .map(|record| {
                        let profit: i64 = months
                            .iter()
                            .map(|month| {
                                let orders = self.country_orders(record, month);
                                let production = record.production_for(month);
                                orders * reference.unit_sale_price
                                    - production * reference.unit_cost
                            })
                            .sum();
                        RankedEntry::new(record.name.clone(), profit.max(0))
                    })
                    .collect();
                rank_descending(rows)
            }
        }
    }

    /// Best-selling countries (top N), or every city under drilldown.
    pub fn top_sales_or_cities(&self, filters: &FilterState) -> Vec<RankedEntry> {
        let scope = self.scope(filters);
        match scope {
            Scope::SingleCountryWithCityDrilldown(record) => {
                rank_cities(&record.cities, self.config.city_multipliers.sales)
            }
            Scope::Unmatched(_) => Vec::new(),
            Scope::AllCountries | Scope::SingleCountry(_) => {
                let reference = UnitEconomics::reference();
                let months = self.months(filters).months(self.fixture);
                let rows = self
                    .fixture
                    .by_country
                    .iter()
                    .map(|record| {
                        let orders: i64 =
                            months.iter().map(|month| self.country_orders(record, month)).sum();
                        RankedEntry::new(record.name.clone(), orders * reference.unit_sale_price)
                    })
                    .collect();
                top_n(rows, self.config.top_sales_limit)
            }
        }
    }

    /// Gross profit against target for every fixture month.
    ///
    /// Ignores the month filter so the chart always shows the whole period.
    pub fn monthly_profit_vs_target(&self, filters: &FilterState) -> Vec<MonthlyProfit> {
        let scope = self.scope(filters);
        if scope.is_unmatched() {
            return Vec::new();
        }
        self.fixture
            .months()
            .map(|month| {
                let profit = self.month_totals(month, &scope).gross_profit();
                let target = profit as f64 * self.config.profit_target_factor;
                MonthlyProfit {
                    month: month.to_string(),
                    profit: profit.max(0),
                    target: target.max(0.0),
                }
            })
            .collect()
    }

    /// Simulated stock level for the storage gauge.
    pub fn stock(&self, filters: &FilterState) -> StockLevel {
        stock::simulate_stock(
            self.fixture,
            &self.config.stock,
            filters.model(),
            &self.scope(filters),
            &self.months(filters),
        )
    }

    /// Downtime minutes per reason for the scope.
    ///
    /// All countries re-sums reasons across countries in first-seen order.
    pub fn downtime_by_reason(&self, filters: &FilterState) -> Vec<Downtime> {
        match self.scope(filters) {
            Scope::AllCountries => {
                let mut merged: Vec<Downtime> = Vec::new();
                for entry in self.fixture.by_country.iter().flat_map(|c| &c.downtime_by_reason) {
                    match merged.iter_mut().find(|d| d.reason == entry.reason) {
                        Some(existing) => existing.minutes += entry.minutes,
                        None => merged.push(entry.clone()),
                    }
                }
                merged
            }
            Scope::SingleCountry(record) | Scope::SingleCountryWithCityDrilldown(record) => {
                record.downtime_by_reason.clone()
            }
            Scope::Unmatched(_) => Vec::new(),
        }
    }

    /// Total units sold across every model.
    pub fn total_car_sales(&self) -> i64 {
        self.fixture.sales_by_model.iter().map(|m| m.value).sum()
    }

    /// Donut slices with each model's share and the active model flagged.
    pub fn sales_by_model(&self, filters: &FilterState) -> Vec<ModelShare> {
        let total = self.total_car_sales();
        self.fixture
            .sales_by_model
            .iter()
            .map(|m| ModelShare {
                name: m.name.clone(),
                value: m.value,
                share_pct: if total > 0 {
                    m.value as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
                selected: filters.model() == Some(m.name.as_str()),
            })
            .collect()
    }

    /// City markers of the drilldown map; empty outside drilldown.
    pub fn city_markers(&self, filters: &FilterState) -> Vec<CityMarker> {
        match self.scope(filters) {
            Scope::SingleCountryWithCityDrilldown(record) => record
                .cities
                .iter()
                .map(|c| CityMarker {
                    name: c.name.clone(),
                    value: c.value,
                    coordinates: c.coordinates,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Shipments whose endpoints both have map coordinates.
    pub fn shipment_routes(&self) -> Vec<ShipmentRoute> {
        self.fixture
            .shipments
            .iter()
            .filter_map(|s| {
                let from = self.fixture.country(&s.from)?.coordinates?;
                let to = self.fixture.country(&s.to)?.coordinates?;
                Some(ShipmentRoute {
                    from: s.from.clone(),
                    to: s.to.clone(),
                    value: s.value,
                    from_coordinates: from,
                    to_coordinates: to,
                })
            })
            .collect()
    }

    /// Customers of the selected country; every customer when unfiltered.
    pub fn filtered_customers(&self, filters: &FilterState) -> Vec<Customer> {
        self.fixture
            .customers
            .iter()
            .filter(|c| filters.country().map_or(true, |country| c.country == country))
            .cloned()
            .collect()
    }

    /// Country dropdown options: distinct customer countries, sorted.
    pub fn country_options(&self) -> Vec<String> {
        let mut countries: Vec<String> =
            self.fixture.customers.iter().map(|c| c.country.clone()).collect();
        countries.sort();
        countries.dedup();
        countries
    }

    pub fn month_options(&self) -> Vec<String> {
        self.fixture.months().map(str::to_string).collect()
    }

    pub fn model_options(&self) -> Vec<String> {
        self.fixture.sales_by_model.iter().map(|m| m.name.clone()).collect()
    }

    /// Every derived value for one filter combination.
    pub fn view(&self, filters: &FilterState) -> DashboardView {
        debug!(
            country = filters.country().unwrap_or(ALL_KEY),
            month = filters.month().unwrap_or(ALL_KEY),
            model = filters.model().unwrap_or(""),
            "deriving dashboard view"
        );
        let stock = self.stock(filters);
        DashboardView {
            filters: filters.clone(),
            city_drilldown: self.scope(filters).is_drilldown(),
            kpis: self.kpis(filters),
            filtered_production: self.filtered_production(filters),
            scroll_orders30: self.scroll_orders_30(filters),
            scroll_orders180: self.scroll_orders_180(filters),
            scatter_series: self.scatter_series(filters),
            waterfall_series: self.waterfall_series(filters),
            profit_by_country_or_city: self.profit_by_country_or_city(filters),
            top_sales_or_cities: self.top_sales_or_cities(filters),
            monthly_profit_vs_target: self.monthly_profit_vs_target(filters),
            stock_value: stock.value,
            stock_capacity: stock.capacity,
            downtime_by_reason: self.downtime_by_reason(filters),
            sales_by_model: self.sales_by_model(filters),
            city_markers: self.city_markers(filters),
            shipment_routes: self.shipment_routes(),
            filtered_customers: self.filtered_customers(filters),
            country_options: self.country_options(),
            month_options: self.month_options(),
            model_options: self.model_options(),
        }
    }
}
