use chrono::NaiveDate;
use core_types::PreparedSale;
use serde::Deserialize;

/// The filter selection sent by the dashboard as query parameters.
///
/// `regions` and `categories` are comma-separated sets; the date range is
/// inclusive on both ends. Absent parameters impose no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub regions: Option<String>,
    pub categories: Option<String>,
}

impl FilterParams {
    /// Returns the subset of `sales` matching this selection, in table order.
    pub fn apply(&self, sales: &[PreparedSale]) -> Vec<PreparedSale> {
        let regions = parse_set(self.regions.as_deref());
        let categories = parse_set(self.categories.as_deref());

        sales
            .iter()
            .filter(|sale| {
                self.start.is_none_or(|start| sale.order_date >= start)
                    && self.end.is_none_or(|end| sale.order_date <= end)
                    && regions
                        .as_ref()
                        .is_none_or(|set| set.iter().any(|r| r == &sale.region))
                    && categories
                        .as_ref()
                        .is_none_or(|set| set.iter().any(|c| c == &sale.category))
            })
            .cloned()
            .collect()
    }
}

/// Splits a comma-separated parameter into a set of trimmed, non-empty
/// values. An absent or blank parameter means "no constraint".
fn parse_set(param: Option<&str>) -> Option<Vec<String>> {
    let values: Vec<String> = param?
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() { None } else { Some(values) }
}
