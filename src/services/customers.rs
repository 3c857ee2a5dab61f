use sea_orm::Set;
use serde::Deserialize;

use crate::db::Store;
use crate::entities::customers;
use crate::services::{ServiceError, require_id};

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    #[serde(default)]
    pub gmail: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gmail: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
}

pub struct CustomerService {
    store: Store,
}

impl CustomerService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        business_id: &str,
        request: CreateCustomerRequest,
    ) -> Result<customers::Model, ServiceError> {
        require_id(business_id, "Business id")?;
        if request.name.trim().is_empty() {
            return Err(ServiceError::validation("Customer name is required"));
        }

        let customer = customers::ActiveModel {
            cust_id: Set(uuid::Uuid::new_v4().to_string()),
            business_id: Set(business_id.to_string()),
            name: Set(request.name),
            gmail: Set(request.gmail),
            mobile_no: Set(request.mobile_no),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        let model = self.store.customers().insert(customer).await?;
        Ok(model)
    }

    pub async fn list(&self, business_id: &str) -> Result<Vec<customers::Model>, ServiceError> {
        require_id(business_id, "Business id")?;
        let customers = self.store.customers().list_for_business(business_id).await?;
        Ok(customers)
    }

    pub async fn get(
        &self,
        business_id: &str,
        cust_id: &str,
    ) -> Result<customers::Model, ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(cust_id, "Customer id")?;

        let customer = self
            .store
            .customers()
            .get(business_id, cust_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer"))?;
        Ok(customer)
    }

    pub async fn update(
        &self,
        business_id: &str,
        cust_id: &str,
        request: UpdateCustomerRequest,
    ) -> Result<customers::Model, ServiceError> {
        let customer = self.get(business_id, cust_id).await?;

        let mut active: customers::ActiveModel = customer.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(gmail) = request.gmail {
            active.gmail = Set(Some(gmail));
        }
        if let Some(mobile_no) = request.mobile_no {
            active.mobile_no = Set(Some(mobile_no));
        }

        let model = self.store.customers().update(active).await?;
        Ok(model)
    }

    pub async fn delete(&self, business_id: &str, cust_id: &str) -> Result<(), ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(cust_id, "Customer id")?;

        let deleted = self.store.customers().delete(business_id, cust_id).await?;
        if !deleted {
            return Err(ServiceError::not_found("Customer"));
        }
        Ok(())
    }
}
