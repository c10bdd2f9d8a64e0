use crate::enums::TicketCategory;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single sale after preparation: the raw transaction fields, fully typed,
/// plus the derived analysis features.
///
/// Instances are produced exclusively by the `dataset` crate; everything
/// downstream treats the table as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedSale {
    // Raw transaction fields.
    pub order_id: String,
    pub order_date: NaiveDate,
    pub customer: String,
    pub product: String,
    pub category: String,
    pub region: String,
    pub quantity: u32,
    pub price: Decimal,
    pub revenue: Decimal,
    pub profit: Decimal,

    // Calendar features.
    pub year: i32,
    /// 1-12.
    pub month: u32,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u32,
    /// 1-4.
    pub quarter: u32,

    // Business features.
    /// profit / revenue. `None` when revenue is zero (undefined ratio).
    pub margin: Option<Decimal>,
    pub revenue_per_unit: Decimal,
    pub ticket_category: TicketCategory,
}

impl PreparedSale {
    /// The group label of this record for a given ranking key.
    pub fn group_value(&self, key: crate::enums::GroupKey) -> String {
        use crate::enums::GroupKey;
        match key {
            GroupKey::Customer => self.customer.clone(),
            GroupKey::Product => self.product.clone(),
            GroupKey::Category => self.category.clone(),
            GroupKey::Region => self.region.clone(),
            GroupKey::TicketCategory => self.ticket_category.to_string(),
        }
    }

    /// The numeric value of this record for a given ranking metric.
    pub fn metric_value(&self, metric: crate::enums::Metric) -> Decimal {
        use crate::enums::Metric;
        match metric {
            Metric::Revenue => self.revenue,
            Metric::Profit => self.profit,
            Metric::Quantity => Decimal::from(self.quantity),
        }
    }
}
