use anyhow::Context;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::db::Store;
use crate::entities::orders;
use crate::models::order::{LineItem, parse_line_items};
use crate::services::{ServiceError, require_id};

/// Order with its embedded line-item lists decoded. The lists may be
/// empty but are never null.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub oid: String,
    pub business_id: String,
    pub cust_id: String,
    pub odate: String,
    pub services: Vec<LineItem>,
    pub products: Vec<LineItem>,
}

impl From<orders::Model> for OrderView {
    fn from(model: orders::Model) -> Self {
        Self {
            services: parse_line_items(&model.services),
            products: parse_line_items(&model.products),
            oid: model.oid,
            business_id: model.business_id,
            cust_id: model.cust_id,
            odate: model.odate,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub custid: String,
    #[serde(default)]
    pub odate: Option<String>,
    #[serde(default)]
    pub services: Vec<LineItem>,
    #[serde(default)]
    pub products: Vec<LineItem>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub services: Option<Vec<LineItem>>,
    #[serde(default)]
    pub products: Option<Vec<LineItem>>,
}

pub struct OrderService {
    store: Store,
}

impl OrderService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        business_id: &str,
        request: CreateOrderRequest,
    ) -> Result<OrderView, ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(&request.custid, "Customer id")?;

        self.store
            .customers()
            .get(business_id, &request.custid)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer"))?;

        let odate = match request.odate {
            Some(date) => {
                // Normalize to UTC so window filters stay plain string
                // comparisons.
                let parsed = chrono::DateTime::parse_from_rfc3339(&date)
                    .map_err(|e| ServiceError::validation(format!("Invalid order date: {e}")))?;
                parsed.with_timezone(&chrono::Utc).to_rfc3339()
            }
            None => chrono::Utc::now().to_rfc3339(),
        };

        let order = orders::ActiveModel {
            oid: Set(uuid::Uuid::new_v4().to_string()),
            business_id: Set(business_id.to_string()),
            cust_id: Set(request.custid),
            odate: Set(odate),
            services: Set(serde_json::to_string(&request.services)
                .context("Failed to encode service lines")?),
            products: Set(serde_json::to_string(&request.products)
                .context("Failed to encode product lines")?),
        };

        let model = self.store.orders().insert(order).await?;
        Ok(model.into())
    }

    pub async fn list(&self, business_id: &str) -> Result<Vec<OrderView>, ServiceError> {
        require_id(business_id, "Business id")?;
        let orders = self.store.orders().list_for_business(business_id).await?;
        Ok(orders.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, business_id: &str, oid: &str) -> Result<OrderView, ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(oid, "Order id")?;

        let order = self
            .store
            .orders()
            .get(business_id, oid)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order"))?;
        Ok(order.into())
    }

    /// Replaces whichever line-item lists the request carries; an absent
    /// list leaves the stored one untouched.
    pub async fn update(
        &self,
        business_id: &str,
        oid: &str,
        request: UpdateOrderRequest,
    ) -> Result<OrderView, ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(oid, "Order id")?;

        let order = self
            .store
            .orders()
            .get(business_id, oid)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order"))?;

        let mut active: orders::ActiveModel = order.into();
        if let Some(services) = request.services {
            active.services =
                Set(serde_json::to_string(&services).context("Failed to encode service lines")?);
        }
        if let Some(products) = request.products {
            active.products =
                Set(serde_json::to_string(&products).context("Failed to encode product lines")?);
        }

        let model = self.store.orders().update(active).await?;
        Ok(model.into())
    }

    pub async fn delete(&self, business_id: &str, oid: &str) -> Result<(), ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(oid, "Order id")?;

        let deleted = self.store.orders().delete(business_id, oid).await?;
        if !deleted {
            return Err(ServiceError::not_found("Order"));
        }
        Ok(())
    }
}
