pub mod analytics;
pub mod auth;
pub mod blob;
pub mod business;
pub mod catalog;
pub mod customers;
pub mod mail;
pub mod orders;
pub mod posts;
pub mod search;
pub mod users;

pub use analytics::AnalyticsService;
pub use auth::{AuthError, AuthService, Claims, TokenPair};
pub use blob::{BlobStore, LocalBlobStore};
pub use business::BusinessService;
pub use catalog::{ProductCatalogService, ShopServiceCatalogService};
pub use customers::CustomerService;
pub use mail::{LogMailer, Mailer};
pub use orders::OrderService;
pub use posts::PostService;
pub use search::SearchService;
pub use users::{PublicUser, UserService};

/// Shared error shape for the CRUD-style services. Validation errors are
/// raised before any I/O; store failures carry their source.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

/// The identifier every business-scoped operation is keyed by; checked
/// before any I/O happens.
pub fn require_id<'a>(value: &'a str, what: &str) -> Result<&'a str, ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(format!("{what} is required")));
    }
    Ok(value)
}
