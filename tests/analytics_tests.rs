use sea_orm::Set;
use shopdesk::db::Store;
use shopdesk::entities::{customers, orders};
use shopdesk::services::AnalyticsService;
use shopdesk::services::analytics::{Rank, Window};

const BUSINESS: &str = "biz-1";

async fn store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory store")
}

async fn seed_customer(store: &Store, cust_id: &str, name: &str, created_at: &str) {
    store
        .customers()
        .insert(customers::ActiveModel {
            cust_id: Set(cust_id.to_string()),
            business_id: Set(BUSINESS.to_string()),
            name: Set(name.to_string()),
            gmail: Set(None),
            mobile_no: Set(None),
            created_at: Set(created_at.to_string()),
        })
        .await
        .expect("Failed to seed customer");
}

async fn seed_order(store: &Store, oid: &str, cust_id: &str, odate: &str, services: &str, products: &str) {
    store
        .orders()
        .insert(orders::ActiveModel {
            oid: Set(oid.to_string()),
            business_id: Set(BUSINESS.to_string()),
            cust_id: Set(cust_id.to_string()),
            odate: Set(odate.to_string()),
            services: Set(services.to_string()),
            products: Set(products.to_string()),
        })
        .await
        .expect("Failed to seed order");
}

#[tokio::test]
async fn monthly_comparison_scenario() {
    let store = store().await;
    let analytics = AnalyticsService::new(store.clone());

    seed_customer(&store, "c1", "Kiran", "2024-01-01T00:00:00+00:00").await;
    seed_order(
        &store,
        "o1",
        "c1",
        "2024-01-05T10:00:00+00:00",
        r#"[{"name":"haircut","cost":100,"quantity":2}]"#,
        r#"[{"name":"shampoo","cost":50,"quantity":1}]"#,
    )
    .await;
    seed_order(&store, "o2", "c1", "2024-02-10T10:00:00+00:00", "[]", "[]").await;

    let january = analytics
        .monthly_comparison(BUSINESS, 2024, 1)
        .await
        .unwrap();
    assert_eq!(january.total_customers, 1);
    assert_eq!(january.new_customers, 1);
    assert!((january.total_revenue - 250.0).abs() < f64::EPSILON);

    let february = analytics
        .monthly_comparison(BUSINESS, 2024, 2)
        .await
        .unwrap();
    assert_eq!(february.total_customers, 1);
    assert_eq!(february.new_customers, 0);
    assert!((february.total_revenue - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn retention_and_churn_rates() {
    let store = store().await;
    let analytics = AnalyticsService::new(store.clone());

    seed_customer(&store, "c1", "Kiran", "2023-12-01T00:00:00+00:00").await;
    seed_customer(&store, "c2", "Meera", "2023-12-01T00:00:00+00:00").await;

    // January: c1 and c2 active. February: only c1 returns.
    seed_order(&store, "o1", "c1", "2024-01-05T10:00:00+00:00", "[]", "[]").await;
    seed_order(&store, "o2", "c2", "2024-01-10T10:00:00+00:00", "[]", "[]").await;
    seed_order(&store, "o3", "c1", "2024-02-03T10:00:00+00:00", "[]", "[]").await;

    let report = analytics
        .retention_and_churn(BUSINESS, 2024, 2)
        .await
        .unwrap();
    assert!((report.retention_rate - 50.0).abs() < f64::EPSILON);
    assert!((report.churn_rate - 50.0).abs() < f64::EPSILON);

    // December 2023 had an empty previous period: 0% retention, 100%
    // churn, no division error.
    let report = analytics
        .retention_and_churn(BUSINESS, 2023, 12)
        .await
        .unwrap();
    assert!((report.retention_rate - 0.0).abs() < f64::EPSILON);
    assert!((report.churn_rate - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn revenue_in_range_uses_the_cost_formula() {
    let store = store().await;
    let analytics = AnalyticsService::new(store.clone());

    seed_customer(&store, "c1", "Kiran", "2024-01-01T00:00:00+00:00").await;
    seed_order(
        &store,
        "o1",
        "c1",
        "2024-01-05T10:00:00+00:00",
        r#"[{"name":"haircut","cost":100,"quantity":2}]"#,
        r#"[{"name":"shampoo","cost":50,"quantity":1}]"#,
    )
    .await;
    // A malformed cost reads as zero, not an error.
    seed_order(
        &store,
        "o2",
        "c1",
        "2024-01-06T10:00:00+00:00",
        r#"[{"name":"mystery"}]"#,
        "[]",
    )
    .await;

    let revenue = analytics
        .revenue_in_range(BUSINESS, "2024-01-01", "2024-01-31")
        .await
        .unwrap();
    assert!((revenue - 250.0).abs() < f64::EPSILON);

    // Outside the range nothing counts.
    let revenue = analytics
        .revenue_in_range(BUSINESS, "2024-02-01", "2024-02-28")
        .await
        .unwrap();
    assert!((revenue - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn services_rank_by_count_with_deterministic_ties() {
    let store = store().await;
    let analytics = AnalyticsService::new(store.clone());

    let now = chrono::Utc::now();
    let recent = (now - chrono::Duration::days(1)).to_rfc3339();
    let stale = (now - chrono::Duration::days(90)).to_rfc3339();

    seed_customer(&store, "c1", "Kiran", "2024-01-01T00:00:00+00:00").await;
    seed_order(
        &store,
        "o1",
        "c1",
        &recent,
        r#"[{"name":"haircut","cost":100},{"name":"beard","cost":50}]"#,
        "[]",
    )
    .await;
    seed_order(
        &store,
        "o2",
        "c1",
        &recent,
        r#"[{"name":"haircut","cost":100},{"name":"color","cost":200}]"#,
        "[]",
    )
    .await;
    // Old bookings fall outside the trailing month.
    seed_order(
        &store,
        "o3",
        "c1",
        &stale,
        r#"[{"name":"massage","cost":500}]"#,
        "[]",
    )
    .await;

    let top = analytics
        .services_by_count(BUSINESS, Window::Month, Rank::Top)
        .await
        .unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].service, "haircut");
    assert_eq!(top[0].count, 2);
    // beard and color tie at one booking; name ascending breaks the tie.
    assert_eq!(top[1].service, "beard");
    assert_eq!(top[2].service, "color");

    let bottom = analytics
        .services_by_count(BUSINESS, Window::Month, Rank::Bottom)
        .await
        .unwrap();
    assert_eq!(bottom[0].service, "beard");

    // The year window reaches further back only within this calendar
    // year, so the stale order may or may not appear; the week window
    // always excludes it.
    let week = analytics
        .services_by_count(BUSINESS, Window::Week, Rank::Top)
        .await
        .unwrap();
    assert!(week.iter().all(|s| s.service != "massage"));
}

#[tokio::test]
async fn customer_spending_and_visit_rankings_join_names() {
    let store = store().await;
    let analytics = AnalyticsService::new(store.clone());

    let now = chrono::Utc::now();
    let recent = (now - chrono::Duration::days(2)).to_rfc3339();

    seed_customer(&store, "c1", "Kiran", "2024-01-01T00:00:00+00:00").await;
    seed_customer(&store, "c2", "Meera", "2024-01-01T00:00:00+00:00").await;

    seed_order(
        &store,
        "o1",
        "c1",
        &recent,
        r#"[{"name":"haircut","cost":100,"quantity":1}]"#,
        "[]",
    )
    .await;
    seed_order(
        &store,
        "o2",
        "c2",
        &recent,
        r#"[{"name":"color","cost":300,"quantity":1}]"#,
        "[]",
    )
    .await;
    seed_order(
        &store,
        "o3",
        "c2",
        &recent,
        "[]",
        r#"[{"name":"serum","cost":150,"quantity":2}]"#,
    )
    .await;

    let top = analytics
        .customers_by_spending(BUSINESS, Rank::Top)
        .await
        .unwrap();
    assert_eq!(top[0].customer_id, "c2");
    assert_eq!(top[0].customername, "Meera");
    assert!((top[0].total_cost - 600.0).abs() < f64::EPSILON);
    assert_eq!(top[1].customer_id, "c1");

    let bottom = analytics
        .customers_by_spending(BUSINESS, Rank::Bottom)
        .await
        .unwrap();
    assert_eq!(bottom[0].customer_id, "c1");

    let visited = analytics
        .customers_by_visits(BUSINESS, Rank::Top)
        .await
        .unwrap();
    assert_eq!(visited[0].customer_id, "c2");
    assert_eq!(visited[0].totalcount, 2);
}

#[tokio::test]
async fn new_old_revenue_split_classifies_at_30_days() {
    let store = store().await;
    let analytics = AnalyticsService::new(store.clone());

    let now = chrono::Utc::now();
    let ten_days_ago = (now - chrono::Duration::days(10)).to_rfc3339();
    let forty_days_ago = (now - chrono::Duration::days(40)).to_rfc3339();
    let recent = (now - chrono::Duration::days(1)).to_rfc3339();

    seed_customer(&store, "new", "Nia", &ten_days_ago).await;
    seed_customer(&store, "old", "Omar", &forty_days_ago).await;

    seed_order(
        &store,
        "o1",
        "new",
        &recent,
        r#"[{"name":"haircut","cost":100,"quantity":1}]"#,
        "[]",
    )
    .await;
    seed_order(
        &store,
        "o2",
        "old",
        &recent,
        r#"[{"name":"color","cost":300,"quantity":1}]"#,
        "[]",
    )
    .await;

    let split = analytics.new_old_customer_revenue(BUSINESS).await.unwrap();
    assert!((split.new_customer_revenue - 100.0).abs() < f64::EPSILON);
    assert!((split.old_customer_revenue - 300.0).abs() < f64::EPSILON);
    assert!((split.new_customer_revenue_percentage - 25.0).abs() < f64::EPSILON);
    assert!((split.old_customer_revenue_percentage - 75.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn new_old_revenue_split_defaults_to_zero_percentages() {
    let store = store().await;
    let analytics = AnalyticsService::new(store.clone());

    let split = analytics.new_old_customer_revenue(BUSINESS).await.unwrap();
    assert!((split.new_customer_revenue_percentage - 0.0).abs() < f64::EPSILON);
    assert!((split.old_customer_revenue_percentage - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn monthly_customer_counts_bucket_by_month() {
    let store = store().await;
    let analytics = AnalyticsService::new(store.clone());

    seed_customer(&store, "c1", "Kiran", "2024-01-01T00:00:00+00:00").await;
    seed_customer(&store, "c2", "Meera", "2024-01-01T00:00:00+00:00").await;

    seed_order(&store, "o1", "c1", "2024-01-05T10:00:00+00:00", "[]", "[]").await;
    seed_order(&store, "o2", "c1", "2024-01-20T10:00:00+00:00", "[]", "[]").await;
    seed_order(&store, "o3", "c2", "2024-01-25T10:00:00+00:00", "[]", "[]").await;
    seed_order(&store, "o4", "c2", "2024-02-02T10:00:00+00:00", "[]", "[]").await;

    let months = analytics.monthly_customer_counts(BUSINESS).await.unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].period_start, "2024-01-01");
    assert_eq!(months[0].customer_count, 2);
    assert_eq!(months[1].period_start, "2024-02-01");
    assert_eq!(months[1].customer_count, 1);
}

#[tokio::test]
async fn past_services_lists_every_booking_with_its_date() {
    let store = store().await;
    let analytics = AnalyticsService::new(store.clone());

    seed_customer(&store, "c1", "Kiran", "2024-01-01T00:00:00+00:00").await;
    seed_order(
        &store,
        "o1",
        "c1",
        "2024-01-05T10:00:00+00:00",
        r#"[{"name":"haircut","cost":100},{"name":"beard","cost":50}]"#,
        "[]",
    )
    .await;
    seed_order(
        &store,
        "o2",
        "c1",
        "2024-03-05T10:00:00+00:00",
        r#"[{"name":"color","cost":200}]"#,
        "[]",
    )
    .await;

    let services = analytics.past_services(BUSINESS, "c1").await.unwrap();
    assert_eq!(services.len(), 3);
    assert_eq!(services[0].service, "haircut");
    assert_eq!(services[0].date, "2024-01-05T10:00:00+00:00");
    assert_eq!(services[2].service, "color");

    // A business id is required before any I/O happens.
    assert!(analytics.past_services("", "c1").await.is_err());
}

#[tokio::test]
async fn business_totals_count_distinct_customers() {
    let store = store().await;
    let analytics = AnalyticsService::new(store.clone());

    seed_customer(&store, "c1", "Kiran", "2024-01-01T00:00:00+00:00").await;
    seed_order(
        &store,
        "o1",
        "c1",
        "2024-01-05T10:00:00+00:00",
        r#"[{"name":"haircut","cost":100,"quantity":1}]"#,
        "[]",
    )
    .await;
    seed_order(
        &store,
        "o2",
        "c1",
        "2024-02-05T10:00:00+00:00",
        "[]",
        r#"[{"name":"serum","cost":150,"quantity":1}]"#,
    )
    .await;

    let totals = analytics.business_totals(BUSINESS).await.unwrap();
    assert_eq!(totals.customer_count, 1);
    assert!((totals.total_revenue - 250.0).abs() < f64::EPSILON);
}
