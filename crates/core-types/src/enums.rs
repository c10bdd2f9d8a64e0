use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order-size bucket, derived from the revenue of a single sale.
///
/// Buckets are right-closed: a revenue of exactly 1000 is still `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketCategory {
    Low,
    Medium,
    High,
    Premium,
}

impl TicketCategory {
    /// Buckets a sale's revenue. The thresholds are fixed business
    /// constants (1 000 / 5 000 / 10 000).
    pub fn from_revenue(revenue: Decimal) -> Self {
        if revenue <= Decimal::from(1_000) {
            TicketCategory::Low
        } else if revenue <= Decimal::from(5_000) {
            TicketCategory::Medium
        } else if revenue <= Decimal::from(10_000) {
            TicketCategory::High
        } else {
            TicketCategory::Premium
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketCategory::Low => "Low",
            TicketCategory::Medium => "Medium",
            TicketCategory::High => "High",
            TicketCategory::Premium => "Premium",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The column a ranking is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Customer,
    Product,
    Category,
    Region,
    TicketCategory,
}

impl GroupKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Customer => "customer",
            GroupKey::Product => "product",
            GroupKey::Category => "category",
            GroupKey::Region => "region",
            GroupKey::TicketCategory => "ticket_category",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The numeric column a ranking is summed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Revenue,
    Profit,
    Quantity,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::Profit => "profit",
            Metric::Quantity => "quantity",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_buckets_are_right_closed() {
        assert_eq!(
            TicketCategory::from_revenue(Decimal::from(1_000)),
            TicketCategory::Low
        );
        assert_eq!(
            TicketCategory::from_revenue(Decimal::new(100_001, 2)), // 1000.01
            TicketCategory::Medium
        );
        assert_eq!(
            TicketCategory::from_revenue(Decimal::from(10_000)),
            TicketCategory::High
        );
        assert_eq!(
            TicketCategory::from_revenue(Decimal::new(1_000_001, 2)), // 10000.01
            TicketCategory::Premium
        );
    }
}
