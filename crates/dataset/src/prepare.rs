use chrono::{Datelike, NaiveDate};
use core_types::{PreparedSale, TicketCategory};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;

/// A raw CSV row before any cleaning. Every field is optional so that blank
/// cells survive deserialization and can be dropped as missing data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize)]
pub struct RawRow {
    pub order_id: Option<String>,
    pub order_date: Option<String>,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub revenue: Option<String>,
    pub profit: Option<String>,
}

/// Cleans and enriches raw rows into the prepared table.
///
/// Steps, in order, each over the whole table:
/// 1. drop rows with any missing field;
/// 2. drop exact-duplicate rows (full-row equality before derivation; the
///    first occurrence is kept);
/// 3. parse dates and numeric fields, dropping rows that fail to parse
///    (including zero-quantity rows, which the schema forbids);
/// 4. derive the calendar and business features.
///
/// The output contains no missing fields and no duplicates.
pub fn prepare(rows: Vec<RawRow>) -> Vec<PreparedSale> {
    let total = rows.len();

    let complete: Vec<RawRow> = rows.into_iter().filter(is_complete).collect();
    let missing_dropped = total - complete.len();

    let complete_count = complete.len();
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(complete.len());
    for row in complete {
        if seen.insert(row.clone()) {
            unique.push(row);
        }
    }
    let duplicates_dropped = complete_count - unique.len();
    let after_dedup = unique.len();

    let prepared: Vec<PreparedSale> = unique.into_iter().filter_map(derive).collect();
    let unparseable_dropped = after_dedup - prepared.len();

    if missing_dropped + duplicates_dropped + unparseable_dropped > 0 {
        tracing::warn!(
            missing_dropped,
            duplicates_dropped,
            unparseable_dropped,
            kept = prepared.len(),
            "Dropped rows during preparation"
        );
    } else {
        tracing::debug!(kept = prepared.len(), "Prepared sales table");
    }

    prepared
}

fn is_complete(row: &RawRow) -> bool {
    [
        &row.order_id,
        &row.order_date,
        &row.customer,
        &row.product,
        &row.category,
        &row.region,
        &row.quantity,
        &row.price,
        &row.revenue,
        &row.profit,
    ]
    .into_iter()
    .all(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
}

/// Types one complete raw row and computes its derived features.
/// Returns `None` when any field fails to parse.
fn derive(row: RawRow) -> Option<PreparedSale> {
    // `is_complete` ran first, so the `?`s on the raw fields never fire with
    // `None`; they keep this function total anyway.
    let order_date = NaiveDate::parse_from_str(row.order_date.as_deref()?, "%Y-%m-%d").ok()?;
    let quantity: u32 = row.quantity.as_deref()?.parse().ok()?;
    if quantity == 0 {
        return None;
    }
    let price = Decimal::from_str(row.price.as_deref()?).ok()?;
    let revenue = Decimal::from_str(row.revenue.as_deref()?).ok()?;
    let profit = Decimal::from_str(row.profit.as_deref()?).ok()?;

    let margin = if revenue.is_zero() {
        None
    } else {
        Some(profit / revenue)
    };

    let month = order_date.month();
    Some(PreparedSale {
        order_id: row.order_id?,
        customer: row.customer?,
        product: row.product?,
        category: row.category?,
        region: row.region?,
        year: order_date.year(),
        month,
        day_of_week: order_date.weekday().num_days_from_monday(),
        quarter: (month - 1) / 3 + 1,
        margin,
        revenue_per_unit: revenue / Decimal::from(quantity),
        ticket_category: TicketCategory::from_revenue(revenue),
        order_date,
        quantity,
        price,
        revenue,
        profit,
    })
}
