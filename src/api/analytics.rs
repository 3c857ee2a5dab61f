use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_month, validate_year};
use super::{ApiError, ApiResponse, AppState};
use crate::services::analytics::{
    BusinessTotals, CustomerSpend, CustomerVisits, MonthlyComparison, NewOldRevenueSplit,
    PastService, PeriodCustomers, Rank, RetentionReport, ServiceCount, ServiceRevenue, Window,
};

#[derive(Deserialize)]
pub struct WindowQuery {
    #[serde(default)]
    pub window: Option<String>,
}

impl WindowQuery {
    fn window(&self) -> Result<Window, ApiError> {
        match &self.window {
            None => Ok(Window::Month),
            Some(value) => Window::parse(value).ok_or_else(|| {
                ApiError::validation(format!(
                    "Invalid window: {value}. Expected week, month or year"
                ))
            }),
        }
    }
}

#[derive(Deserialize)]
pub struct YearMonthQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Deserialize)]
pub struct DateRangeQuery {
    pub from: String,
    pub to: String,
}

/// GET /bs/{business_id}/analytics/top-services
pub async fn top_services(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ApiResponse<Vec<ServiceCount>>>, ApiError> {
    let services = state
        .analytics()
        .services_by_count(&business_id, query.window()?, Rank::Top)
        .await?;
    Ok(Json(ApiResponse::success(services)))
}

/// GET /bs/{business_id}/analytics/bottom-services
pub async fn bottom_services(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ApiResponse<Vec<ServiceCount>>>, ApiError> {
    let services = state
        .analytics()
        .services_by_count(&business_id, query.window()?, Rank::Bottom)
        .await?;
    Ok(Json(ApiResponse::success(services)))
}

/// GET /bs/{business_id}/analytics/top-services-revenue
pub async fn top_services_by_revenue(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ApiResponse<Vec<ServiceRevenue>>>, ApiError> {
    let services = state
        .analytics()
        .services_by_revenue(&business_id, query.window()?)
        .await?;
    Ok(Json(ApiResponse::success(services)))
}

/// GET /bs/{business_id}/analytics/top-customers
pub async fn top_customers(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CustomerSpend>>>, ApiError> {
    let customers = state
        .analytics()
        .customers_by_spending(&business_id, Rank::Top)
        .await?;
    Ok(Json(ApiResponse::success(customers)))
}

/// GET /bs/{business_id}/analytics/bottom-customers
pub async fn bottom_customers(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CustomerSpend>>>, ApiError> {
    let customers = state
        .analytics()
        .customers_by_spending(&business_id, Rank::Bottom)
        .await?;
    Ok(Json(ApiResponse::success(customers)))
}

/// GET /bs/{business_id}/analytics/most-visited-customers
pub async fn most_visited_customers(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CustomerVisits>>>, ApiError> {
    let customers = state
        .analytics()
        .customers_by_visits(&business_id, Rank::Top)
        .await?;
    Ok(Json(ApiResponse::success(customers)))
}

/// GET /bs/{business_id}/analytics/least-visited-customers
pub async fn least_visited_customers(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CustomerVisits>>>, ApiError> {
    let customers = state
        .analytics()
        .customers_by_visits(&business_id, Rank::Bottom)
        .await?;
    Ok(Json(ApiResponse::success(customers)))
}

/// GET /bs/{business_id}/analytics/weekly-customers
pub async fn weekly_customers(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<PeriodCustomers>>>, ApiError> {
    let periods = state.analytics().weekly_customer_counts(&business_id).await?;
    Ok(Json(ApiResponse::success(periods)))
}

/// GET /bs/{business_id}/analytics/monthly-customers
pub async fn monthly_customers(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<PeriodCustomers>>>, ApiError> {
    let periods = state
        .analytics()
        .monthly_customer_counts(&business_id)
        .await?;
    Ok(Json(ApiResponse::success(periods)))
}

/// GET /bs/{business_id}/analytics/totals
pub async fn business_totals(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<BusinessTotals>>, ApiError> {
    let totals = state.analytics().business_totals(&business_id).await?;
    Ok(Json(ApiResponse::success(totals)))
}

/// GET /bs/{business_id}/analytics/revenue?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn revenue_in_range(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let revenue = state
        .analytics()
        .revenue_in_range(&business_id, &query.from, &query.to)
        .await?;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "totalRevenue": revenue }),
    )))
}

/// GET /bs/{business_id}/analytics/top-customers-range?from&to
pub async fn top_customers_in_range(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<CustomerSpend>>>, ApiError> {
    let customers = state
        .analytics()
        .top_customers_in_range(&business_id, &query.from, &query.to)
        .await?;
    Ok(Json(ApiResponse::success(customers)))
}

/// GET /bs/{business_id}/analytics/monthly-comparison?year&month
pub async fn monthly_comparison(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(query): Query<YearMonthQuery>,
) -> Result<Json<ApiResponse<MonthlyComparison>>, ApiError> {
    let year = validate_year(query.year)?;
    let month = validate_month(query.month)?;

    let report = state
        .analytics()
        .monthly_comparison(&business_id, year, month)
        .await?;
    Ok(Json(ApiResponse::success(report)))
}

/// GET /bs/{business_id}/analytics/retention?year&month
pub async fn retention(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(query): Query<YearMonthQuery>,
) -> Result<Json<ApiResponse<RetentionReport>>, ApiError> {
    let year = validate_year(query.year)?;
    let month = validate_month(query.month)?;

    let report = state
        .analytics()
        .retention_and_churn(&business_id, year, month)
        .await?;
    Ok(Json(ApiResponse::success(report)))
}

/// GET /bs/{business_id}/analytics/new-old-customer-revenue
pub async fn new_old_customer_revenue(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<NewOldRevenueSplit>>, ApiError> {
    let split = state
        .analytics()
        .new_old_customer_revenue(&business_id)
        .await?;
    Ok(Json(ApiResponse::success(split)))
}

/// GET /bs/{business_id}/analytics/customers/{cust_id}/past-services
pub async fn past_services(
    State(state): State<Arc<AppState>>,
    Path((business_id, cust_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<PastService>>>, ApiError> {
    let services = state
        .analytics()
        .past_services(&business_id, &cust_id)
        .await?;
    Ok(Json(ApiResponse::success(services)))
}
