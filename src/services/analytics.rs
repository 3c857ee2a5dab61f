use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::Serialize;
use tracing::error;

use crate::db::Store;
use crate::entities::orders;
use crate::models::order::{parse_line_items, total_amount};
use crate::services::{ServiceError, require_id};

/// Trailing window an aggregation looks back over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Trailing 7 days
    Week,
    /// Trailing 30 days
    Month,
    /// Current calendar year to date
    Year,
}

impl Window {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Week => now - Duration::days(7),
            Self::Month => now - Duration::days(30),
            Self::Year => Utc
                .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
                .single()
                .unwrap_or(now),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Top,
    Bottom,
}

#[derive(Debug, Serialize)]
pub struct ServiceCount {
    pub service: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct ServiceRevenue {
    pub service: String,
    pub cost: f64,
}

#[derive(Debug, Serialize)]
pub struct CustomerSpend {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    pub customername: String,
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct CustomerVisits {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    pub customername: String,
    pub totalcount: u64,
}

#[derive(Debug, Serialize)]
pub struct PeriodCustomers {
    #[serde(rename = "periodStart")]
    pub period_start: String,
    #[serde(rename = "customerCount")]
    pub customer_count: u64,
}

#[derive(Debug, Serialize)]
pub struct BusinessTotals {
    #[serde(rename = "customerCount")]
    pub customer_count: u64,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyComparison {
    #[serde(rename = "totalCustomers")]
    pub total_customers: u64,
    #[serde(rename = "newCustomers")]
    pub new_customers: u64,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct RetentionReport {
    #[serde(rename = "retentionRate")]
    pub retention_rate: f64,
    #[serde(rename = "churnRate")]
    pub churn_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct NewOldRevenueSplit {
    #[serde(rename = "newCustomerRevenue")]
    pub new_customer_revenue: f64,
    #[serde(rename = "oldCustomerRevenue")]
    pub old_customer_revenue: f64,
    #[serde(rename = "newCustomerRevenuePercentage")]
    pub new_customer_revenue_percentage: f64,
    #[serde(rename = "oldCustomerRevenuePercentage")]
    pub old_customer_revenue_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct PastService {
    pub service: String,
    pub date: String,
}

/// Read-only aggregations over one business's order ledger.
///
/// Orders are fetched scoped by business and window, line items decoded,
/// and the aggregation itself is a fold over the rows. Every revenue
/// figure uses the one cost formula from `models::order`; every ranking
/// breaks ties on the name (or id) ascending so results are
/// deterministic.
pub struct AnalyticsService {
    store: Store,
}

impl AnalyticsService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Top or bottom 3 services by booking count over the window.
    pub async fn services_by_count(
        &self,
        business_id: &str,
        window: Window,
        rank: Rank,
    ) -> Result<Vec<ServiceCount>, ServiceError> {
        require_id(business_id, "Business id")?;

        let from = window.start(Utc::now()).to_rfc3339();
        let orders = self
            .store
            .orders()
            .list_in_window(business_id, Some(&from), None)
            .await?;

        Ok(rank_counts(count_service_lines(&orders), rank, 3)
            .into_iter()
            .map(|(service, count)| ServiceCount { service, count })
            .collect())
    }

    /// Top 3 services by revenue over the window.
    pub async fn services_by_revenue(
        &self,
        business_id: &str,
        window: Window,
    ) -> Result<Vec<ServiceRevenue>, ServiceError> {
        require_id(business_id, "Business id")?;

        let from = window.start(Utc::now()).to_rfc3339();
        let orders = self
            .store
            .orders()
            .list_in_window(business_id, Some(&from), None)
            .await?;

        Ok(rank_amounts(revenue_by_service(&orders), Rank::Top, 3)
            .into_iter()
            .map(|(service, cost)| ServiceRevenue { service, cost })
            .collect())
    }

    /// Customers ranked by total spend over the trailing month: top 6 or
    /// bottom 3, joined with the customer display name.
    pub async fn customers_by_spending(
        &self,
        business_id: &str,
        rank: Rank,
    ) -> Result<Vec<CustomerSpend>, ServiceError> {
        require_id(business_id, "Business id")?;

        let limit = match rank {
            Rank::Top => 6,
            Rank::Bottom => 3,
        };

        let from = Window::Month.start(Utc::now()).to_rfc3339();
        let orders = self
            .store
            .orders()
            .list_in_window(business_id, Some(&from), None)
            .await?;
        let names = self.customer_names(business_id).await?;

        // Join before ranking: orders whose customer record is gone drop
        // out, exactly like the inner join they replace.
        let mut spend = spend_by_customer(&orders);
        spend.retain(|customer_id, _| names.contains_key(customer_id));

        Ok(rank_amounts(spend, rank, limit)
            .into_iter()
            .map(|(customer_id, total_cost)| CustomerSpend {
                customername: names.get(&customer_id).cloned().unwrap_or_default(),
                customer_id,
                total_cost,
            })
            .collect())
    }

    /// Top or bottom 3 customers by order count over the trailing month.
    pub async fn customers_by_visits(
        &self,
        business_id: &str,
        rank: Rank,
    ) -> Result<Vec<CustomerVisits>, ServiceError> {
        require_id(business_id, "Business id")?;

        let from = Window::Month.start(Utc::now()).to_rfc3339();
        let orders = self
            .store
            .orders()
            .list_in_window(business_id, Some(&from), None)
            .await?;
        let names = self.customer_names(business_id).await?;

        let mut visits = visits_by_customer(&orders);
        visits.retain(|customer_id, _| names.contains_key(customer_id));

        Ok(rank_counts(visits, rank, 3)
            .into_iter()
            .map(|(customer_id, totalcount)| CustomerVisits {
                customername: names.get(&customer_id).cloned().unwrap_or_default(),
                customer_id,
                totalcount,
            })
            .collect())
    }

    /// Distinct customers per week bucket over the trailing 7 days.
    pub async fn weekly_customer_counts(
        &self,
        business_id: &str,
    ) -> Result<Vec<PeriodCustomers>, ServiceError> {
        require_id(business_id, "Business id")?;

        let from = Window::Week.start(Utc::now()).to_rfc3339();
        let orders = self
            .store
            .orders()
            .list_in_window(business_id, Some(&from), None)
            .await?;

        Ok(bucket_customers(&orders, week_start))
    }

    /// Distinct customers per month bucket over the whole ledger.
    pub async fn monthly_customer_counts(
        &self,
        business_id: &str,
    ) -> Result<Vec<PeriodCustomers>, ServiceError> {
        require_id(business_id, "Business id")?;

        let orders = self.store.orders().list_for_business(business_id).await?;
        Ok(bucket_customers(&orders, month_start))
    }

    /// All-time distinct customer count and total revenue.
    pub async fn business_totals(&self, business_id: &str) -> Result<BusinessTotals, ServiceError> {
        require_id(business_id, "Business id")?;

        let orders = self.store.orders().list_for_business(business_id).await?;

        Ok(BusinessTotals {
            customer_count: distinct_customers(&orders) as u64,
            total_revenue: total_revenue(&orders),
        })
    }

    /// Total revenue across an explicit date range (whole days,
    /// inclusive of both end dates).
    pub async fn revenue_in_range(
        &self,
        business_id: &str,
        from: &str,
        to: &str,
    ) -> Result<f64, ServiceError> {
        require_id(business_id, "Business id")?;

        let (from, to) = day_range(from, to)?;
        let orders = self
            .store
            .orders()
            .list_in_window(business_id, Some(&from), Some(&to))
            .await?;

        Ok(total_revenue(&orders))
    }

    /// Top 10 customers by spend across an explicit date range.
    pub async fn top_customers_in_range(
        &self,
        business_id: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<CustomerSpend>, ServiceError> {
        require_id(business_id, "Business id")?;

        let (from, to) = day_range(from, to)?;
        let orders = self
            .store
            .orders()
            .list_in_window(business_id, Some(&from), Some(&to))
            .await?;
        let names = self.customer_names(business_id).await?;

        let mut spend = spend_by_customer(&orders);
        spend.retain(|customer_id, _| names.contains_key(customer_id));

        Ok(rank_amounts(spend, Rank::Top, 10)
            .into_iter()
            .map(|(customer_id, total_cost)| CustomerSpend {
                customername: names.get(&customer_id).cloned().unwrap_or_default(),
                customer_id,
                total_cost,
            })
            .collect())
    }

    /// Month report combining three independent sub-queries. Each one
    /// degrades to zero on failure instead of aborting the report.
    pub async fn monthly_comparison(
        &self,
        business_id: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthlyComparison, ServiceError> {
        require_id(business_id, "Business id")?;

        let (start, end) = month_window(year, month)
            .ok_or_else(|| ServiceError::validation("Invalid year/month"))?;
        let start = start.to_rfc3339();
        let end = end.to_rfc3339();

        let total_customers = match self
            .store
            .orders()
            .list_in_window(business_id, Some(&start), Some(&end))
            .await
        {
            Ok(orders) => distinct_customers(&orders) as u64,
            Err(e) => {
                error!(business_id, error = %e, "Monthly comparison: customer count failed");
                0
            }
        };

        let new_customers = match self.new_customers_in_month(business_id, &start, &end).await {
            Ok(count) => count,
            Err(e) => {
                error!(business_id, error = %e, "Monthly comparison: new customer count failed");
                0
            }
        };

        let total_revenue = match self
            .store
            .orders()
            .list_in_window(business_id, Some(&start), Some(&end))
            .await
        {
            // Service and product totals computed independently, then
            // summed.
            Ok(orders) => {
                let services: f64 = orders
                    .iter()
                    .map(|o| {
                        parse_line_items(&o.services)
                            .iter()
                            .map(crate::models::order::LineItem::amount)
                            .sum::<f64>()
                    })
                    .sum();
                let products: f64 = orders
                    .iter()
                    .map(|o| {
                        parse_line_items(&o.products)
                            .iter()
                            .map(crate::models::order::LineItem::amount)
                            .sum::<f64>()
                    })
                    .sum();
                services + products
            }
            Err(e) => {
                error!(business_id, error = %e, "Monthly comparison: revenue failed");
                0.0
            }
        };

        Ok(MonthlyComparison {
            total_customers,
            new_customers,
            total_revenue,
        })
    }

    /// Retention/churn for the month against the prior calendar month.
    /// The two sub-queries degrade to zero independently.
    pub async fn retention_and_churn(
        &self,
        business_id: &str,
        year: i32,
        month: u32,
    ) -> Result<RetentionReport, ServiceError> {
        require_id(business_id, "Business id")?;

        let (current_start, current_end) = month_window(year, month)
            .ok_or_else(|| ServiceError::validation("Invalid year/month"))?;
        let (prev_year, prev_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        let (previous_start, previous_end) = month_window(prev_year, prev_month)
            .ok_or_else(|| ServiceError::validation("Invalid year/month"))?;

        let previous = self
            .customers_in_window(business_id, previous_start, previous_end)
            .await
            .unwrap_or_else(|e| {
                error!(business_id, error = %e, "Retention: previous period query failed");
                HashSet::new()
            });

        let current = self
            .customers_in_window(business_id, current_start, current_end)
            .await
            .unwrap_or_else(|e| {
                error!(business_id, error = %e, "Retention: current period query failed");
                HashSet::new()
            });

        let active_previous = previous.len() as u64;
        let retained = previous.intersection(&current).count() as u64;

        let (retention_rate, churn_rate) = retention_rates(active_previous, retained);
        Ok(RetentionReport {
            retention_rate,
            churn_rate,
        })
    }

    /// Revenue split between customers created within the trailing 30
    /// days ("new") and everyone older.
    pub async fn new_old_customer_revenue(
        &self,
        business_id: &str,
    ) -> Result<NewOldRevenueSplit, ServiceError> {
        require_id(business_id, "Business id")?;

        let orders = self.store.orders().list_for_business(business_id).await?;
        let customers = self.store.customers().list_for_business(business_id).await?;

        let cutoff = Utc::now() - Duration::days(30);
        let new_customers: HashSet<&str> = customers
            .iter()
            .filter(|c| is_on_or_after(&c.created_at, cutoff))
            .map(|c| c.cust_id.as_str())
            .collect();
        let known: HashSet<&str> = customers.iter().map(|c| c.cust_id.as_str()).collect();

        let mut new_revenue = 0.0;
        let mut old_revenue = 0.0;
        for order in &orders {
            if !known.contains(order.cust_id.as_str()) {
                continue;
            }
            let amount = total_amount(
                &parse_line_items(&order.services),
                &parse_line_items(&order.products),
            );
            if new_customers.contains(order.cust_id.as_str()) {
                new_revenue += amount;
            } else {
                old_revenue += amount;
            }
        }

        let total = new_revenue + old_revenue;
        let (new_pct, old_pct) = if total > 0.0 {
            (
                round2(new_revenue / total * 100.0),
                round2(old_revenue / total * 100.0),
            )
        } else {
            (0.0, 0.0)
        };

        Ok(NewOldRevenueSplit {
            new_customer_revenue: new_revenue,
            old_customer_revenue: old_revenue,
            new_customer_revenue_percentage: new_pct,
            old_customer_revenue_percentage: old_pct,
        })
    }

    /// Every service a customer has ever booked, with the order date.
    pub async fn past_services(
        &self,
        business_id: &str,
        cust_id: &str,
    ) -> Result<Vec<PastService>, ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(cust_id, "Customer id")?;

        let orders = self
            .store
            .orders()
            .list_for_customer(business_id, cust_id)
            .await?;

        let mut services = Vec::new();
        for order in &orders {
            for line in parse_line_items(&order.services) {
                services.push(PastService {
                    service: line.name,
                    date: order.odate.clone(),
                });
            }
        }

        Ok(services)
    }

    async fn customer_names(
        &self,
        business_id: &str,
    ) -> Result<HashMap<String, String>, ServiceError> {
        let customers = self.store.customers().list_for_business(business_id).await?;
        Ok(customers
            .into_iter()
            .map(|c| (c.cust_id, c.name))
            .collect())
    }

    async fn customers_in_window(
        &self,
        business_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<HashSet<String>, ServiceError> {
        let orders = self
            .store
            .orders()
            .list_in_window(business_id, Some(&from.to_rfc3339()), Some(&to.to_rfc3339()))
            .await?;
        Ok(orders.into_iter().map(|o| o.cust_id).collect())
    }

    /// Distinct customers created in the month who also placed at least
    /// one order in it.
    async fn new_customers_in_month(
        &self,
        business_id: &str,
        start: &str,
        end: &str,
    ) -> Result<u64, ServiceError> {
        let customers = self.store.customers().list_for_business(business_id).await?;
        let orders = self
            .store
            .orders()
            .list_in_window(business_id, Some(start), Some(end))
            .await?;

        let ordered: HashSet<&str> = orders.iter().map(|o| o.cust_id.as_str()).collect();

        let count = customers
            .iter()
            .filter(|c| c.created_at.as_str() >= start && c.created_at.as_str() < end)
            .filter(|c| ordered.contains(c.cust_id.as_str()))
            .count();

        Ok(count as u64)
    }
}

// ---------------------------------------------------------------------------
// Aggregation folds. Pure functions over fetched rows so the arithmetic
// is testable without a database.
// ---------------------------------------------------------------------------

fn count_service_lines(orders: &[orders::Model]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for order in orders {
        for line in parse_line_items(&order.services) {
            *counts.entry(line.name).or_insert(0) += 1;
        }
    }
    counts
}

fn revenue_by_service(orders: &[orders::Model]) -> HashMap<String, f64> {
    let mut revenue = HashMap::new();
    for order in orders {
        for line in parse_line_items(&order.services) {
            *revenue.entry(line.name.clone()).or_insert(0.0) += line.amount();
        }
    }
    revenue
}

fn spend_by_customer(orders: &[orders::Model]) -> HashMap<String, f64> {
    let mut spend = HashMap::new();
    for order in orders {
        let amount = total_amount(
            &parse_line_items(&order.services),
            &parse_line_items(&order.products),
        );
        *spend.entry(order.cust_id.clone()).or_insert(0.0) += amount;
    }
    spend
}

fn visits_by_customer(orders: &[orders::Model]) -> HashMap<String, u64> {
    let mut visits = HashMap::new();
    for order in orders {
        *visits.entry(order.cust_id.clone()).or_insert(0) += 1;
    }
    visits
}

fn distinct_customers(orders: &[orders::Model]) -> usize {
    orders
        .iter()
        .map(|o| o.cust_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

fn total_revenue(orders: &[orders::Model]) -> f64 {
    orders
        .iter()
        .map(|o| {
            total_amount(
                &parse_line_items(&o.services),
                &parse_line_items(&o.products),
            )
        })
        .sum()
}

/// Rank by count, ties broken by name ascending.
fn rank_counts(map: HashMap<String, u64>, rank: Rank, limit: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<_> = map.into_iter().collect();
    entries.sort_by(|(name_a, count_a), (name_b, count_b)| {
        let ordering = match rank {
            Rank::Top => count_b.cmp(count_a),
            Rank::Bottom => count_a.cmp(count_b),
        };
        ordering.then_with(|| name_a.cmp(name_b))
    });
    entries.truncate(limit);
    entries
}

/// Rank by amount, ties broken by name ascending.
fn rank_amounts(map: HashMap<String, f64>, rank: Rank, limit: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<_> = map.into_iter().collect();
    entries.sort_by(|(name_a, amount_a), (name_b, amount_b)| {
        let ordering = match rank {
            Rank::Top => amount_b.total_cmp(amount_a),
            Rank::Bottom => amount_a.total_cmp(amount_b),
        };
        ordering.then_with(|| name_a.cmp(name_b))
    });
    entries.truncate(limit);
    entries
}

fn bucket_customers(
    orders: &[orders::Model],
    bucket: fn(DateTime<Utc>) -> String,
) -> Vec<PeriodCustomers> {
    let mut buckets: HashMap<String, HashSet<&str>> = HashMap::new();
    for order in orders {
        let Ok(date) = DateTime::parse_from_rfc3339(&order.odate) else {
            continue;
        };
        buckets
            .entry(bucket(date.with_timezone(&Utc)))
            .or_default()
            .insert(order.cust_id.as_str());
    }

    let mut periods: Vec<PeriodCustomers> = buckets
        .into_iter()
        .map(|(period_start, customers)| PeriodCustomers {
            period_start,
            customer_count: customers.len() as u64,
        })
        .collect();
    periods.sort_by(|a, b| a.period_start.cmp(&b.period_start));
    periods
}

fn week_start(date: DateTime<Utc>) -> String {
    let days = i64::from(date.weekday().num_days_from_monday());
    (date - Duration::days(days)).format("%Y-%m-%d").to_string()
}

fn month_start(date: DateTime<Utc>) -> String {
    format!("{:04}-{:02}-01", date.year(), date.month())
}

/// Half-open month window `[first of month, first of next month)`.
fn month_window(year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()?;
    Some((start, end))
}

/// Whole-day range: both dates inclusive, as `[from 00:00, to + 1 day)`.
fn day_range(from: &str, to: &str) -> Result<(String, String), ServiceError> {
    let from_date = chrono::NaiveDate::parse_from_str(from, "%Y-%m-%d")
        .map_err(|e| ServiceError::validation(format!("Invalid from date: {e}")))?;
    let to_date = chrono::NaiveDate::parse_from_str(to, "%Y-%m-%d")
        .map_err(|e| ServiceError::validation(format!("Invalid to date: {e}")))?;

    let start = Utc
        .from_utc_datetime(&from_date.and_hms_opt(0, 0, 0).unwrap_or_default())
        .to_rfc3339();
    let end = Utc
        .from_utc_datetime(
            &(to_date + Duration::days(1))
                .and_hms_opt(0, 0, 0)
                .unwrap_or_default(),
        )
        .to_rfc3339();

    Ok((start, end))
}

/// Retention and churn percentages, both rounded to two decimals.
/// An empty previous period means 0% retention and 100% churn rather
/// than a division error.
fn retention_rates(active_previous: u64, retained: u64) -> (f64, f64) {
    let retention = if active_previous > 0 {
        retained as f64 / active_previous as f64 * 100.0
    } else {
        0.0
    };
    let retention = round2(retention);
    (retention, round2(100.0 - retention))
}

fn is_on_or_after(timestamp: &str, cutoff: DateTime<Utc>) -> bool {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|d| d.with_timezone(&Utc) >= cutoff)
        .unwrap_or(false)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(oid: &str, cust_id: &str, odate: &str, services: &str, products: &str) -> orders::Model {
        orders::Model {
            oid: oid.to_string(),
            business_id: "b1".to_string(),
            cust_id: cust_id.to_string(),
            odate: odate.to_string(),
            services: services.to_string(),
            products: products.to_string(),
        }
    }

    #[test]
    fn cost_formula_multiplies_and_sums_both_lists() {
        let orders = vec![order(
            "o1",
            "c1",
            "2024-01-05T10:00:00+00:00",
            r#"[{"name":"haircut","cost":100,"quantity":2}]"#,
            r#"[{"name":"shampoo","cost":50,"quantity":1}]"#,
        )];

        assert!((total_revenue(&orders) - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn service_counts_rank_with_name_tiebreak() {
        let orders = vec![
            order(
                "o1",
                "c1",
                "2024-01-05T10:00:00+00:00",
                r#"[{"name":"beard","cost":10},{"name":"haircut","cost":20}]"#,
                "[]",
            ),
            order(
                "o2",
                "c2",
                "2024-01-06T10:00:00+00:00",
                r#"[{"name":"haircut","cost":20},{"name":"color","cost":30}]"#,
                "[]",
            ),
        ];

        let ranked = rank_counts(count_service_lines(&orders), Rank::Top, 3);
        assert_eq!(ranked[0], ("haircut".to_string(), 2));
        // beard and color tie at 1; name ascending decides.
        assert_eq!(ranked[1].0, "beard");
        assert_eq!(ranked[2].0, "color");

        let bottom = rank_counts(count_service_lines(&orders), Rank::Bottom, 3);
        assert_eq!(bottom[0].0, "beard");
        assert_eq!(bottom[1].0, "color");
        assert_eq!(bottom[2].0, "haircut");
    }

    #[test]
    fn missing_costs_read_as_zero_in_revenue_ranking() {
        let orders = vec![order(
            "o1",
            "c1",
            "2024-01-05T10:00:00+00:00",
            r#"[{"name":"freebie"},{"name":"haircut","cost":20,"quantity":2}]"#,
            "[]",
        )];

        let ranked = rank_amounts(revenue_by_service(&orders), Rank::Top, 3);
        assert_eq!(ranked[0], ("haircut".to_string(), 40.0));
        assert_eq!(ranked[1], ("freebie".to_string(), 0.0));
    }

    #[test]
    fn retention_guards_division_by_zero() {
        let (retention, churn) = retention_rates(0, 0);
        assert!((retention - 0.0).abs() < f64::EPSILON);
        assert!((churn - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn retention_rounds_to_two_decimals() {
        let (retention, churn) = retention_rates(3, 1);
        assert!((retention - 33.33).abs() < f64::EPSILON);
        assert!((churn - 66.67).abs() < f64::EPSILON);
    }

    #[test]
    fn new_customer_classification_uses_30_day_threshold() {
        let now = Utc::now();
        let cutoff = now - Duration::days(30);
        let ten_days_ago = (now - Duration::days(10)).to_rfc3339();
        let forty_days_ago = (now - Duration::days(40)).to_rfc3339();

        assert!(is_on_or_after(&ten_days_ago, cutoff));
        assert!(!is_on_or_after(&forty_days_ago, cutoff));
    }

    #[test]
    fn month_window_is_half_open() {
        let (start, end) = month_window(2024, 1).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-02-01T00:00:00+00:00");

        let (start, end) = month_window(2024, 12).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-12-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-01-01T00:00:00+00:00");

        assert!(month_window(2024, 13).is_none());
    }

    #[test]
    fn buckets_count_distinct_customers() {
        let orders = vec![
            order("o1", "c1", "2024-01-05T10:00:00+00:00", "[]", "[]"),
            order("o2", "c1", "2024-01-20T10:00:00+00:00", "[]", "[]"),
            order("o3", "c2", "2024-02-10T10:00:00+00:00", "[]", "[]"),
        ];

        let periods = bucket_customers(&orders, month_start);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].period_start, "2024-01-01");
        assert_eq!(periods[0].customer_count, 1);
        assert_eq!(periods[1].period_start, "2024-02-01");
        assert_eq!(periods[1].customer_count, 1);
    }

    #[test]
    fn week_start_is_monday() {
        // 2024-01-05 was a Friday.
        let date = DateTime::parse_from_rfc3339("2024-01-05T10:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(week_start(date), "2024-01-01");
    }
}
