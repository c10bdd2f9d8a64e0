use crate::error::AnalyticsError;
use crate::report::{InsightSet, KpiSet, MonthlyPoint, RegionStat, TopEntry};
use core_types::{GroupKey, Metric, PreparedSale};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Computes the KPI snapshot for one table of prepared sales.
///
/// `avg_margin_pct` is the weighted margin (total profit over total
/// revenue), not a mean of per-row margins. The two differ whenever order
/// sizes differ. A zero total revenue leaves it undefined rather than
/// failing.
pub fn calculate_kpis(sales: &[PreparedSale]) -> Result<KpiSet, AnalyticsError> {
    if sales.is_empty() {
        return Err(AnalyticsError::EmptyTable);
    }

    let count = Decimal::from(sales.len());
    let mut total_revenue = Decimal::ZERO;
    let mut total_profit = Decimal::ZERO;
    let mut total_quantity = Decimal::ZERO;
    let mut customers = HashSet::new();
    let mut products = HashSet::new();

    for sale in sales {
        total_revenue += sale.revenue;
        total_profit += sale.profit;
        total_quantity += Decimal::from(sale.quantity);
        customers.insert(sale.customer.as_str());
        products.insert(sale.product.as_str());
    }

    let avg_margin_pct = if total_revenue.is_zero() {
        None
    } else {
        Some(total_profit / total_revenue * Decimal::from(100))
    };

    tracing::debug!(orders = sales.len(), %total_revenue, "Calculated KPI set");

    Ok(KpiSet {
        total_revenue,
        total_profit,
        avg_ticket: total_revenue / count,
        total_orders: sales.len(),
        unique_customers: customers.len(),
        unique_products: products.len(),
        avg_margin_pct,
        avg_quantity: total_quantity / count,
    })
}

/// Groups the table by `key`, sums `metric` per group, and returns the top
/// `limit` groups, best first.
///
/// The sort is stable over first-encounter group order, so exact ties keep
/// the order in which the groups first appear in the table.
pub fn get_top_performers(
    sales: &[PreparedSale],
    key: GroupKey,
    metric: Metric,
    limit: usize,
) -> Vec<TopEntry> {
    let mut ranked = grouped_totals(sales, key, metric);
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked.truncate(limit);
    ranked
}

/// Derives the categorical extremes for the insight panel.
pub fn generate_insights(sales: &[PreparedSale]) -> Result<InsightSet, AnalyticsError> {
    if sales.is_empty() {
        return Err(AnalyticsError::EmptyTable);
    }

    // The table is non-empty, so each ranking has at least one entry.
    let best_of = |key: GroupKey| -> String {
        get_top_performers(sales, key, Metric::Revenue, 1)
            .into_iter()
            .next()
            .map(|entry| entry.group)
            .unwrap_or_default()
    };

    // Revenue per calendar month number, in ascending month order. Months
    // are deliberately not year-qualified (see `InsightSet`).
    let mut by_month: HashMap<u32, Decimal> = HashMap::new();
    for sale in sales {
        *by_month.entry(sale.month).or_insert(Decimal::ZERO) += sale.revenue;
    }
    let mut monthly: Vec<(u32, Decimal)> = by_month.into_iter().collect();
    monthly.sort_by_key(|&(month, _)| month);

    // First-encounter wins on ties, matching the ranking functions.
    let mut best = monthly[0];
    let mut worst = monthly[0];
    for &(month, revenue) in &monthly[1..] {
        if revenue > best.1 {
            best = (month, revenue);
        }
        if revenue < worst.1 {
            worst = (month, revenue);
        }
    }

    let monthly_variation_pct = if worst.1.is_zero() {
        None
    } else {
        Some((best.1 - worst.1) / worst.1 * Decimal::from(100))
    };

    Ok(InsightSet {
        best_category: best_of(GroupKey::Category),
        best_region: best_of(GroupKey::Region),
        best_product: best_of(GroupKey::Product),
        best_customer: best_of(GroupKey::Customer),
        best_month: best.0,
        worst_month: worst.0,
        monthly_variation_pct,
    })
}

/// Aggregates the table into the monthly evolution series: revenue, profit,
/// order count and margin per year-month period, in chronological order.
///
/// An empty table yields an empty series (the charts simply have nothing to
/// plot), so this is infallible.
pub fn monthly_trend(sales: &[PreparedSale]) -> Vec<MonthlyPoint> {
    let mut by_period: BTreeMap<(i32, u32), (Decimal, Decimal, usize)> = BTreeMap::new();
    for sale in sales {
        let entry = by_period
            .entry((sale.year, sale.month))
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0));
        entry.0 += sale.revenue;
        entry.1 += sale.profit;
        entry.2 += 1;
    }

    by_period
        .into_iter()
        .map(|((year, month), (revenue, profit, orders))| MonthlyPoint {
            year,
            month,
            revenue,
            profit,
            orders,
            margin_pct: if revenue.is_zero() {
                Decimal::ZERO
            } else {
                profit / revenue * Decimal::from(100)
            },
        })
        .collect()
}

/// Aggregates revenue, profit and order count per region, in alphabetical
/// region order. Infallible for the same reason as [`monthly_trend`].
pub fn region_breakdown(sales: &[PreparedSale]) -> Vec<RegionStat> {
    let mut by_region: BTreeMap<String, (Decimal, Decimal, usize)> = BTreeMap::new();
    for sale in sales {
        let entry = by_region
            .entry(sale.region.clone())
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0));
        entry.0 += sale.revenue;
        entry.1 += sale.profit;
        entry.2 += 1;
    }

    by_region
        .into_iter()
        .map(|(region, (revenue, profit, orders))| RegionStat {
            region,
            revenue,
            profit,
            orders,
        })
        .collect()
}

/// Sums `metric` per group, preserving the order in which groups first
/// appear in the table.
fn grouped_totals(sales: &[PreparedSale], key: GroupKey, metric: Metric) -> Vec<TopEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<TopEntry> = Vec::new();
    for sale in sales {
        let group = sale.group_value(key);
        match index.get(&group) {
            Some(&i) => totals[i].total += sale.metric_value(metric),
            None => {
                index.insert(group.clone(), totals.len());
                totals.push(TopEntry {
                    group,
                    total: sale.metric_value(metric),
                });
            }
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use core_types::TicketCategory;
    use rust_decimal_macros::dec;

    fn sale(
        order_id: &str,
        date: &str,
        customer: &str,
        product: &str,
        category: &str,
        region: &str,
        quantity: u32,
        price: Decimal,
        revenue: Decimal,
        profit: Decimal,
    ) -> PreparedSale {
        let order_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        PreparedSale {
            order_id: order_id.to_string(),
            customer: customer.to_string(),
            product: product.to_string(),
            category: category.to_string(),
            region: region.to_string(),
            year: order_date.year(),
            month: order_date.month(),
            day_of_week: order_date.weekday().num_days_from_monday(),
            quarter: (order_date.month() - 1) / 3 + 1,
            margin: if revenue.is_zero() { None } else { Some(profit / revenue) },
            revenue_per_unit: revenue / Decimal::from(quantity),
            ticket_category: TicketCategory::from_revenue(revenue),
            order_date,
            quantity,
            price,
            revenue,
            profit,
        }
    }

    /// The canonical 3-row fixture shared across the test suite.
    fn sample_table() -> Vec<PreparedSale> {
        vec![
            sale("ORD-001", "2025-01-01", "Cliente A", "Produto X", "Cat A", "Norte",
                 2, dec!(100), dec!(200), dec!(40)),
            sale("ORD-002", "2025-01-02", "Cliente B", "Produto Y", "Cat B", "Sul",
                 1, dec!(200), dec!(200), dec!(50)),
            sale("ORD-003", "2025-01-03", "Cliente A", "Produto X", "Cat A", "Norte",
                 3, dec!(100), dec!(300), dec!(60)),
        ]
    }

    #[test]
    fn kpis_over_the_sample_table() {
        let kpis = calculate_kpis(&sample_table()).unwrap();
        assert_eq!(kpis.total_revenue, dec!(700));
        assert_eq!(kpis.total_profit, dec!(150));
        assert_eq!(kpis.total_orders, 3);
        assert_eq!(kpis.unique_customers, 2);
        assert_eq!(kpis.unique_products, 2);
        assert_eq!(kpis.avg_quantity, dec!(2));
    }

    #[test]
    fn avg_margin_is_weighted_not_a_mean_of_margins() {
        let table = vec![
            // 50% margin on a tiny order, 10% margin on a large one.
            sale("ORD-001", "2025-01-01", "A", "X", "C", "N", 1, dec!(10), dec!(10), dec!(5)),
            sale("ORD-002", "2025-01-02", "B", "Y", "C", "N", 1, dec!(990), dec!(990), dec!(99)),
        ];
        let kpis = calculate_kpis(&table).unwrap();
        // 104 / 1000 * 100, not (50 + 10) / 2.
        assert_eq!(kpis.avg_margin_pct, Some(dec!(10.4)));
    }

    #[test]
    fn empty_table_is_an_explicit_error() {
        assert_eq!(calculate_kpis(&[]).unwrap_err(), AnalyticsError::EmptyTable);
        assert_eq!(generate_insights(&[]).unwrap_err(), AnalyticsError::EmptyTable);
        assert!(get_top_performers(&[], GroupKey::Customer, Metric::Revenue, 5).is_empty());
    }

    #[test]
    fn kpi_totals_are_linear_over_disjoint_tables() {
        let table = sample_table();
        let (left, right) = table.split_at(1);
        let whole = calculate_kpis(&table).unwrap();
        let a = calculate_kpis(left).unwrap();
        let b = calculate_kpis(right).unwrap();

        assert_eq!(whole.total_revenue, a.total_revenue + b.total_revenue);
        assert_eq!(whole.total_profit, a.total_profit + b.total_profit);
        assert_eq!(whole.total_orders, a.total_orders + b.total_orders);
        // Averages do not add; they must be recomputed over the union.
        assert_ne!(whole.avg_ticket, a.avg_ticket + b.avg_ticket);
    }

    #[test]
    fn top_performers_are_sorted_truncated_and_prefix_stable() {
        let table = sample_table();
        let full = get_top_performers(&table, GroupKey::Customer, Metric::Revenue, usize::MAX);
        assert_eq!(full.len(), 2);
        assert_eq!(full[0].group, "Cliente A");
        assert_eq!(full[0].total, dec!(500));
        assert_eq!(full[1].total, dec!(200));

        for limit in 0..=3 {
            let top = get_top_performers(&table, GroupKey::Customer, Metric::Revenue, limit);
            assert!(top.len() <= limit);
            assert_eq!(top[..], full[..top.len()]);
        }
    }

    #[test]
    fn tied_groups_keep_first_encounter_order() {
        let table = vec![
            sale("ORD-001", "2025-01-01", "A", "X", "C", "Oeste", 1, dec!(100), dec!(100), dec!(10)),
            sale("ORD-002", "2025-01-02", "B", "Y", "C", "Leste", 1, dec!(100), dec!(100), dec!(10)),
        ];
        let top = get_top_performers(&table, GroupKey::Region, Metric::Revenue, 10);
        assert_eq!(top[0].group, "Oeste");
        assert_eq!(top[1].group, "Leste");
    }

    #[test]
    fn insights_over_the_sample_table() {
        let insights = generate_insights(&sample_table()).unwrap();
        assert_eq!(insights.best_category, "Cat A");
        assert_eq!(insights.best_region, "Norte");
        assert_eq!(insights.best_product, "Produto X");
        assert_eq!(insights.best_customer, "Cliente A");
        // A single month is both best and worst, with zero variation.
        assert_eq!(insights.best_month, 1);
        assert_eq!(insights.worst_month, 1);
        assert_eq!(insights.monthly_variation_pct, Some(dec!(0)));
    }

    #[test]
    fn monthly_extremes_and_variation() {
        let table = vec![
            sale("ORD-001", "2025-01-15", "A", "X", "C", "N", 1, dec!(100), dec!(100), dec!(10)),
            sale("ORD-002", "2025-02-15", "A", "X", "C", "N", 1, dec!(400), dec!(400), dec!(40)),
            sale("ORD-003", "2025-03-15", "A", "X", "C", "N", 1, dec!(200), dec!(200), dec!(20)),
        ];
        let insights = generate_insights(&table).unwrap();
        assert_eq!(insights.best_month, 2);
        assert_eq!(insights.worst_month, 1);
        assert_eq!(insights.monthly_variation_pct, Some(dec!(300)));
    }

    #[test]
    fn monthly_trend_aggregates_per_year_month() {
        let table = vec![
            sale("ORD-001", "2024-12-20", "A", "X", "C", "N", 1, dec!(100), dec!(100), dec!(10)),
            sale("ORD-002", "2025-01-05", "A", "X", "C", "N", 1, dec!(400), dec!(400), dec!(40)),
            sale("ORD-003", "2025-01-25", "B", "Y", "C", "N", 1, dec!(200), dec!(200), dec!(60)),
        ];
        let trend = monthly_trend(&table);
        assert_eq!(trend.len(), 2);

        // December 2024 and January 2025 stay separate points, oldest first.
        assert_eq!((trend[0].year, trend[0].month), (2024, 12));
        assert_eq!((trend[1].year, trend[1].month), (2025, 1));
        assert_eq!(trend[1].revenue, dec!(600));
        assert_eq!(trend[1].profit, dec!(100));
        assert_eq!(trend[1].orders, 2);
        // 100 / 600 * 100.
        assert_eq!(trend[1].margin_pct.round_dp(2), dec!(16.67));
    }

    #[test]
    fn monthly_trend_zero_fills_margin_without_revenue() {
        let table = vec![
            sale("ORD-001", "2025-01-05", "A", "X", "C", "N", 1, dec!(0), dec!(0), dec!(0)),
        ];
        let trend = monthly_trend(&table);
        assert_eq!(trend[0].margin_pct, Decimal::ZERO);
        assert!(monthly_trend(&[]).is_empty());
    }

    #[test]
    fn region_breakdown_sums_per_region_alphabetically() {
        let table = vec![
            sale("ORD-001", "2025-01-01", "A", "X", "C", "Sul", 2, dec!(100), dec!(200), dec!(40)),
            sale("ORD-002", "2025-01-02", "B", "Y", "C", "Norte", 1, dec!(200), dec!(200), dec!(50)),
            sale("ORD-003", "2025-01-03", "A", "X", "C", "Sul", 3, dec!(100), dec!(300), dec!(60)),
        ];
        let regions = region_breakdown(&table);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].region, "Norte");
        assert_eq!(regions[0].orders, 1);
        assert_eq!(regions[1].region, "Sul");
        assert_eq!(regions[1].revenue, dec!(500));
        assert_eq!(regions[1].profit, dec!(100));
        assert_eq!(regions[1].orders, 2);
    }

    #[test]
    fn months_are_conflated_across_years() {
        // One January in 2024 and one in 2025 aggregate into month 1.
        let table = vec![
            sale("ORD-001", "2024-01-15", "A", "X", "C", "N", 1, dec!(300), dec!(300), dec!(30)),
            sale("ORD-002", "2025-01-15", "A", "X", "C", "N", 1, dec!(300), dec!(300), dec!(30)),
            sale("ORD-003", "2025-06-15", "A", "X", "C", "N", 1, dec!(500), dec!(500), dec!(50)),
        ];
        let insights = generate_insights(&table).unwrap();
        assert_eq!(insights.best_month, 1);
        assert_eq!(insights.worst_month, 6);
    }
}
