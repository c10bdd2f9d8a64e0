use crate::report::{KpiSet, SummaryRow};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rendered in place of undefined (zero-division) values.
pub const UNDEFINED_PLACEHOLDER: &str = "N/A";

/// Renders a monetary value in the Brazilian convention: `R$` prefix, two
/// decimals, `.` as thousands separator and `,` as decimal separator.
///
/// `1000.50` becomes exactly `"R$ 1.000,50"`; downstream compatibility
/// tests depend on the precise output.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let mut abs = rounded.abs();
    abs.rescale(2);

    let text = abs.to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + 8);
    out.push_str("R$ ");
    if rounded.is_sign_negative() {
        out.push('-');
    }
    push_grouped(&mut out, whole, '.');
    out.push(',');
    out.push_str(cents);
    out
}

/// Renders a percentage with one decimal place: `25.5` becomes `"25.5%"`.
pub fn format_percentage(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(1);
    format!("{rounded}%")
}

/// Renders a count with thousands grouping, e.g. `1234` becomes `"1,234"`.
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    push_grouped(&mut out, &digits, ',');
    out
}

/// Builds the labelled, formatted summary rows for a KPI snapshot.
/// An undefined margin renders as [`UNDEFINED_PLACEHOLDER`].
pub fn summary_table(kpis: &KpiSet) -> Vec<SummaryRow> {
    let row = |metric: &str, value: String| SummaryRow {
        metric: metric.to_string(),
        value,
    };
    vec![
        row("Total Revenue", format_currency(kpis.total_revenue)),
        row("Total Profit", format_currency(kpis.total_profit)),
        row(
            "Average Margin",
            kpis.avg_margin_pct
                .map(format_percentage)
                .unwrap_or_else(|| UNDEFINED_PLACEHOLDER.to_string()),
        ),
        row("Average Ticket", format_currency(kpis.avg_ticket)),
        row("Total Orders", format_count(kpis.total_orders)),
        row("Unique Customers", format_count(kpis.unique_customers)),
        row("Unique Products", format_count(kpis.unique_products)),
    ]
}

/// Appends `digits` to `out`, inserting `separator` every three digits from
/// the right. `digits` must be ASCII digits only.
fn push_grouped(out: &mut String, digits: &str, separator: char) {
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
}
