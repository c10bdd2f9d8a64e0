use crate::{AppState, error::AppError, filters::FilterParams};
use analytics::{InsightSet, KpiSet, SummaryRow, format_percentage, summary_table};
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::NaiveDate;
use core_types::{GroupKey, Metric, PreparedSale, TicketCategory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shown whenever the active filters match no rows. The dashboard renders it
/// instead of the metric cards; an empty subset is not an HTTP error.
const EMPTY_SUBSET_WARNING: &str = "No sales match the selected filters";

/// The embedded dashboard page, served at `/`.
const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// ---------------------------------------------------------------------------
// GET /api/filters
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub regions: Vec<String>,
    pub categories: Vec<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// Returns the distinct values that drive the filter widgets.
pub async fn get_filters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FiltersResponse>, AppError> {
    let table = state.prepared_table()?;

    let mut regions: Vec<String> = table.iter().map(|s| s.region.clone()).collect();
    regions.sort();
    regions.dedup();
    let mut categories: Vec<String> = table.iter().map(|s| s.category.clone()).collect();
    categories.sort();
    categories.dedup();

    Ok(Json(FiltersResponse {
        regions,
        categories,
        min_date: table.iter().map(|s| s.order_date).min(),
        max_date: table.iter().map(|s| s.order_date).max(),
    }))
}

// ---------------------------------------------------------------------------
// GET /api/config
// ---------------------------------------------------------------------------

/// Returns the presentation settings (title, palette, metric labels).
pub async fn get_config(
    State(state): State<Arc<AppState>>,
) -> Json<configuration::Dashboard> {
    Json(state.settings.dashboard.clone())
}

// ---------------------------------------------------------------------------
// GET /api/kpis
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct KpisResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpis: Option<KpiSet>,
    pub summary: Vec<SummaryRow>,
}

/// Computes the KPI snapshot over the filtered subset.
pub async fn get_kpis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<KpisResponse>, AppError> {
    let table = state.prepared_table()?;
    let subset = params.apply(&table);

    if subset.is_empty() {
        return Ok(Json(KpisResponse {
            warning: Some(EMPTY_SUBSET_WARNING.to_string()),
            kpis: None,
            summary: Vec::new(),
        }));
    }

    let kpis = analytics::calculate_kpis(&subset)?;
    let summary = summary_table(&kpis);
    Ok(Json(KpisResponse {
        warning: None,
        kpis: Some(kpis),
        summary,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/top
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TopParams {
    /// Grouping column: customer, product, category, region, ticket_category.
    pub by: String,
    /// Summed column: revenue (default), profit or quantity.
    pub metric: Option<String>,
    pub limit: Option<usize>,
    // Filter selection, same as /api/kpis.
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub regions: Option<String>,
    pub categories: Option<String>,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Serialize)]
pub struct TopResponse {
    pub by: GroupKey,
    pub metric: Metric,
    pub entries: Vec<analytics::TopEntry>,
}

/// Returns the top performers ranking for the filtered subset.
pub async fn get_top(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopParams>,
) -> Result<Json<TopResponse>, AppError> {
    let by = parse_group_key(&params.by)?;
    let metric = match params.metric.as_deref() {
        None => Metric::Revenue,
        Some(name) => parse_metric(name)?,
    };
    let limit = params.limit.unwrap_or_else(default_limit);

    let filter = FilterParams {
        start: params.start,
        end: params.end,
        regions: params.regions,
        categories: params.categories,
    };
    let table = state.prepared_table()?;
    let subset = filter.apply(&table);

    let entries = analytics::get_top_performers(&subset, by, metric, limit);
    Ok(Json(TopResponse { by, metric, entries }))
}

fn parse_group_key(name: &str) -> Result<GroupKey, AppError> {
    match name {
        "customer" => Ok(GroupKey::Customer),
        "product" => Ok(GroupKey::Product),
        "category" => Ok(GroupKey::Category),
        "region" => Ok(GroupKey::Region),
        "ticket_category" => Ok(GroupKey::TicketCategory),
        other => Err(AppError::BadRequest(format!(
            "Unknown group key '{other}'"
        ))),
    }
}

fn parse_metric(name: &str) -> Result<Metric, AppError> {
    match name {
        "revenue" => Ok(Metric::Revenue),
        "profit" => Ok(Metric::Profit),
        "quantity" => Ok(Metric::Quantity),
        other => Err(AppError::BadRequest(format!("Unknown metric '{other}'"))),
    }
}

// ---------------------------------------------------------------------------
// GET /api/insights
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<InsightSet>,
    /// Pre-formatted monthly variation (e.g. "300.0%"), "N/A" when undefined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_variation: Option<String>,
}

/// Derives the narrative insights for the filtered subset.
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<InsightsResponse>, AppError> {
    let table = state.prepared_table()?;
    let subset = params.apply(&table);

    if subset.is_empty() {
        return Ok(Json(InsightsResponse {
            warning: Some(EMPTY_SUBSET_WARNING.to_string()),
            insights: None,
            monthly_variation: None,
        }));
    }

    let insights = analytics::generate_insights(&subset)?;
    let monthly_variation = insights
        .monthly_variation_pct
        .map(format_percentage)
        .unwrap_or_else(|| analytics::format::UNDEFINED_PLACEHOLDER.to_string());

    Ok(Json(InsightsResponse {
        warning: None,
        insights: Some(insights),
        monthly_variation: Some(monthly_variation),
    }))
}

// ---------------------------------------------------------------------------
// GET /api/monthly
// ---------------------------------------------------------------------------

/// The monthly evolution series (revenue, profit, orders, margin per
/// year-month) for the filtered subset. An empty subset yields an empty
/// series, which the charts render as "nothing to plot".
pub async fn get_monthly(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<analytics::MonthlyPoint>>, AppError> {
    let table = state.prepared_table()?;
    let subset = params.apply(&table);
    Ok(Json(analytics::monthly_trend(&subset)))
}

// ---------------------------------------------------------------------------
// GET /api/regions
// ---------------------------------------------------------------------------

/// Revenue, profit and order count per region for the filtered subset,
/// backing the revenue-vs-profit regional view.
pub async fn get_regions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<analytics::RegionStat>>, AppError> {
    let table = state.prepared_table()?;
    let subset = params.apply(&table);
    Ok(Json(analytics::region_breakdown(&subset)))
}

// ---------------------------------------------------------------------------
// GET /api/tickets
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TicketBucket {
    pub bucket: TicketCategory,
    pub orders: usize,
}

/// Order counts per ticket bucket, for the order-size distribution chart.
pub async fn get_ticket_distribution(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<TicketBucket>>, AppError> {
    let table = state.prepared_table()?;
    let subset = params.apply(&table);

    let buckets = [
        TicketCategory::Low,
        TicketCategory::Medium,
        TicketCategory::High,
        TicketCategory::Premium,
    ];
    let counts = buckets
        .into_iter()
        .map(|bucket| TicketBucket {
            bucket,
            orders: count_bucket(&subset, bucket),
        })
        .collect();
    Ok(Json(counts))
}

fn count_bucket(sales: &[PreparedSale], bucket: TicketCategory) -> usize {
    sales.iter().filter(|s| s.ticket_category == bucket).count()
}
