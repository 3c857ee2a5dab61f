use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{SearchConfig, UploadConfig};
use crate::state::SharedState;

mod analytics;
pub mod auth;
mod businesses;
mod customers;
mod error;
mod observability;
mod orders;
mod posts;
mod products;
mod search;
mod shop_services;
mod system;
mod types;
mod uploads;
mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<crate::services::AuthService> {
        &self.shared.auth
    }

    #[must_use]
    pub fn users(&self) -> &Arc<crate::services::UserService> {
        &self.shared.users
    }

    #[must_use]
    pub fn businesses(&self) -> &Arc<crate::services::BusinessService> {
        &self.shared.businesses
    }

    #[must_use]
    pub fn customers(&self) -> &Arc<crate::services::CustomerService> {
        &self.shared.customers
    }

    #[must_use]
    pub fn orders(&self) -> &Arc<crate::services::OrderService> {
        &self.shared.orders
    }

    #[must_use]
    pub fn analytics(&self) -> &Arc<crate::services::AnalyticsService> {
        &self.shared.analytics
    }

    #[must_use]
    pub fn posts(&self) -> &Arc<crate::services::PostService> {
        &self.shared.posts
    }

    #[must_use]
    pub fn products(&self) -> &Arc<crate::services::ProductCatalogService> {
        &self.shared.products
    }

    #[must_use]
    pub fn shop_services(&self) -> &Arc<crate::services::ShopServiceCatalogService> {
        &self.shared.shop_services
    }

    #[must_use]
    pub fn search(&self) -> &Arc<crate::services::SearchService> {
        &self.shared.search
    }

    #[must_use]
    pub fn blob_store(&self) -> &Arc<dyn crate::services::BlobStore> {
        &self.shared.blob_store
    }

    #[must_use]
    pub fn search_config(&self) -> &SearchConfig {
        &self.shared.config.search
    }

    #[must_use]
    pub fn upload_config(&self) -> &UploadConfig {
        &self.shared.config.uploads
    }
}

pub async fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: crate::config::Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle).await)
}

pub fn router(state: Arc<AppState>) -> Router {
    let uploads_path = state.upload_config().path.clone();
    let cors_origins = state.shared.config.server.cors_allowed_origins.clone();

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/verify-reset-code", post(auth::verify_reset_code))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/users/register", post(users::register))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .nest_service("/files", tower_http::services::ServeDir::new(uploads_path))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::track_requests))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}", put(users::update_user))
        .route("/users/{id}/name", get(users::get_user_name))
        .route("/users/{id}/password", put(users::update_password))
        .route("/users/{id}/fcm-token", put(users::update_fcm_token))
        .route("/businesses", post(businesses::register_business))
        .route("/businesses", get(businesses::list_businesses))
        .route("/businesses/{id}", get(businesses::get_business))
        .route("/businesses/{id}", put(businesses::update_business))
        .route("/businesses/{id}", delete(businesses::delete_business))
        .route(
            "/bs/{business_id}/customers",
            post(customers::create_customer),
        )
        .route("/bs/{business_id}/customers", get(customers::list_customers))
        .route(
            "/bs/{business_id}/customers/{cust_id}",
            get(customers::get_customer),
        )
        .route(
            "/bs/{business_id}/customers/{cust_id}",
            put(customers::update_customer),
        )
        .route(
            "/bs/{business_id}/customers/{cust_id}",
            delete(customers::delete_customer),
        )
        .route("/bs/{business_id}/orders", post(orders::create_order))
        .route("/bs/{business_id}/orders", get(orders::list_orders))
        .route("/bs/{business_id}/orders/{oid}", get(orders::get_order))
        .route("/bs/{business_id}/orders/{oid}", put(orders::update_order))
        .route(
            "/bs/{business_id}/orders/{oid}",
            delete(orders::delete_order),
        )
        .route(
            "/bs/{business_id}/analytics/top-services",
            get(analytics::top_services),
        )
        .route(
            "/bs/{business_id}/analytics/bottom-services",
            get(analytics::bottom_services),
        )
        .route(
            "/bs/{business_id}/analytics/top-services-revenue",
            get(analytics::top_services_by_revenue),
        )
        .route(
            "/bs/{business_id}/analytics/top-customers",
            get(analytics::top_customers),
        )
        .route(
            "/bs/{business_id}/analytics/bottom-customers",
            get(analytics::bottom_customers),
        )
        .route(
            "/bs/{business_id}/analytics/most-visited-customers",
            get(analytics::most_visited_customers),
        )
        .route(
            "/bs/{business_id}/analytics/least-visited-customers",
            get(analytics::least_visited_customers),
        )
        .route(
            "/bs/{business_id}/analytics/weekly-customers",
            get(analytics::weekly_customers),
        )
        .route(
            "/bs/{business_id}/analytics/monthly-customers",
            get(analytics::monthly_customers),
        )
        .route(
            "/bs/{business_id}/analytics/totals",
            get(analytics::business_totals),
        )
        .route(
            "/bs/{business_id}/analytics/revenue",
            get(analytics::revenue_in_range),
        )
        .route(
            "/bs/{business_id}/analytics/top-customers-range",
            get(analytics::top_customers_in_range),
        )
        .route(
            "/bs/{business_id}/analytics/monthly-comparison",
            get(analytics::monthly_comparison),
        )
        .route(
            "/bs/{business_id}/analytics/retention",
            get(analytics::retention),
        )
        .route(
            "/bs/{business_id}/analytics/new-old-customer-revenue",
            get(analytics::new_old_customer_revenue),
        )
        .route(
            "/bs/{business_id}/analytics/customers/{cust_id}/past-services",
            get(analytics::past_services),
        )
        .route("/bs/{business_id}/posts", post(posts::create_post))
        .route("/bs/{business_id}/posts", get(posts::list_posts))
        .route(
            "/bs/{business_id}/posts/visible",
            get(posts::list_visible_posts),
        )
        .route("/bs/{business_id}/posts/{post_id}", get(posts::get_post))
        .route(
            "/bs/{business_id}/posts/{post_id}/visible",
            get(posts::get_visible_post),
        )
        .route("/bs/{business_id}/posts/{post_id}", put(posts::update_post))
        .route(
            "/bs/{business_id}/posts/{post_id}/archive",
            post(posts::archive_post),
        )
        .route(
            "/bs/{business_id}/posts/{post_id}",
            delete(posts::delete_post),
        )
        .route("/posts/{post_id}/like", post(posts::like_post))
        .route("/posts/{post_id}/unlike", post(posts::unlike_post))
        .route("/posts/{post_id}/comment", post(posts::comment_post))
        .route("/posts/{post_id}/uncomment", post(posts::uncomment_post))
        .route("/bs/{business_id}/products", post(products::create_product))
        .route("/bs/{business_id}/products", get(products::list_products))
        .route(
            "/bs/{business_id}/products/{pid}",
            get(products::get_product),
        )
        .route(
            "/bs/{business_id}/products/{pid}",
            put(products::update_product),
        )
        .route(
            "/bs/{business_id}/products/{pid}/retire",
            post(products::retire_product),
        )
        .route(
            "/bs/{business_id}/products/{pid}",
            delete(products::delete_product),
        )
        .route(
            "/bs/{business_id}/services",
            post(shop_services::create_service),
        )
        .route(
            "/bs/{business_id}/services",
            get(shop_services::list_services),
        )
        .route(
            "/bs/{business_id}/services/{sid}",
            get(shop_services::get_service),
        )
        .route(
            "/bs/{business_id}/services/{sid}",
            put(shop_services::update_service),
        )
        .route(
            "/bs/{business_id}/services/{sid}/retire",
            post(shop_services::retire_service),
        )
        .route(
            "/bs/{business_id}/services/{sid}",
            delete(shop_services::delete_service),
        )
        .route("/search", get(search::search_businesses))
        .route("/search/cache/clear", post(search::clear_search_cache))
        .route("/search/history", get(search::search_history))
        .route("/uploads", post(uploads::upload_file))
        .route("/system/status", get(system::get_status))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
