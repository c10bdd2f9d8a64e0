use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The aggregate scalars shown as metric cards.
///
/// A snapshot over one table of prepared sales, typically the subset
/// selected by the dashboard filters. Recomputed on every filter change,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    /// Mean revenue per order.
    pub avg_ticket: Decimal,
    pub total_orders: usize,
    pub unique_customers: usize,
    pub unique_products: usize,
    /// Weighted margin: total_profit / total_revenue * 100, NOT the mean of
    /// per-row margins. `None` when total revenue is zero.
    pub avg_margin_pct: Option<Decimal>,
    pub avg_quantity: Decimal,
}

/// One entry of a top-performers ranking: a group label and the metric
/// summed over that group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEntry {
    pub group: String,
    pub total: Decimal,
}

/// The categorical extremes rendered as narrative text.
///
/// `best_month`/`worst_month` are calendar month numbers (1-12) aggregated
/// across the whole table. Months are not year-qualified: a table spanning
/// several years conflates e.g. all Januaries. This mirrors the behavior the
/// dashboard has always had and is documented rather than fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    pub best_category: String,
    pub best_region: String,
    pub best_product: String,
    pub best_customer: String,
    pub best_month: u32,
    pub worst_month: u32,
    /// (max monthly revenue - min monthly revenue) / min * 100.
    /// `None` when the minimum month's revenue is zero.
    pub monthly_variation_pct: Option<Decimal>,
}

/// One point of the monthly evolution series: revenue, profit, order count
/// and margin for a single year-month period.
///
/// Unlike the insight months, periods here are year-qualified, so a table
/// spanning several years yields one point per actual month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub year: i32,
    /// 1-12.
    pub month: u32,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub orders: usize,
    /// profit / revenue * 100. Zero when the period has no revenue,
    /// matching the historical chart rendering.
    pub margin_pct: Decimal,
}

/// Aggregate figures for one region: the regional revenue-vs-profit view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStat {
    pub region: String,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub orders: usize,
}

/// One row of the formatted KPI summary table (label + rendered value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub metric: String,
    pub value: String,
}
