//! # Salesboard Analytics Engine
//!
//! This crate derives everything the dashboard displays: aggregate KPIs,
//! top-performer rankings, narrative insights, and the locale formatting of
//! the resulting numbers.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** a pure logic crate with no knowledge of files or
//!   HTTP. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** every entry point is a pure function of a
//!   `&[PreparedSale]` slice (typically the filter subset selected by the
//!   presentation layer) and returns a structured result record.
//!
//! ## Public API
//!
//! - `calculate_kpis` / `get_top_performers` / `generate_insights` /
//!   `monthly_trend` / `region_breakdown`: the derivation functions.
//! - `KpiSet`, `InsightSet`, `TopEntry`, `MonthlyPoint`, `RegionStat`,
//!   `SummaryRow`: the result records.
//! - `format_currency` / `format_percentage`: locale rendering.
//! - `AnalyticsError`: the specific error types this crate can return.

pub mod engine;
pub mod error;
pub mod format;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{
    calculate_kpis, generate_insights, get_top_performers, monthly_trend, region_breakdown,
};
pub use error::AnalyticsError;
pub use format::{format_count, format_currency, format_percentage, summary_table};
pub use report::{InsightSet, KpiSet, MonthlyPoint, RegionStat, SummaryRow, TopEntry};
