use anyhow::Context;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::db::Store;
use crate::entities::business_clients;
use crate::models::business::Address;
use crate::services::{ServiceError, require_id};

/// Business client with the JSON columns unpacked; the shape the API and
/// the search results both use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessView {
    pub business_id: String,
    pub client_name: String,
    pub shop_name: String,
    pub domain_name: String,
    pub shop_desc: String,
    pub shop_locations: Vec<String>,
    pub addresses: Vec<Address>,
    pub created_at: String,
}

impl From<business_clients::Model> for BusinessView {
    fn from(model: business_clients::Model) -> Self {
        Self {
            shop_locations: serde_json::from_str(&model.shop_locations).unwrap_or_default(),
            addresses: serde_json::from_str(&model.addresses).unwrap_or_default(),
            business_id: model.business_id,
            client_name: model.client_name,
            shop_name: model.shop_name,
            domain_name: model.domain_name,
            shop_desc: model.shop_desc,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterBusinessRequest {
    pub client_name: String,
    pub shop_name: String,
    pub domain_name: String,
    #[serde(default)]
    pub shop_desc: String,
    #[serde(default)]
    pub shop_locations: Vec<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBusinessRequest {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub shop_desc: Option<String>,
    #[serde(default)]
    pub shop_locations: Option<Vec<String>>,
    #[serde(default)]
    pub addresses: Option<Vec<Address>>,
}

pub struct BusinessService {
    store: Store,
}

impl BusinessService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn register(
        &self,
        request: RegisterBusinessRequest,
    ) -> Result<BusinessView, ServiceError> {
        if request.client_name.trim().is_empty() {
            return Err(ServiceError::validation("Client name is required"));
        }

        let business = business_clients::ActiveModel {
            business_id: Set(uuid::Uuid::new_v4().to_string()),
            client_name: Set(request.client_name),
            shop_name: Set(request.shop_name),
            domain_name: Set(request.domain_name),
            shop_desc: Set(request.shop_desc),
            shop_locations: Set(serde_json::to_string(&request.shop_locations)
                .context("Failed to encode shop locations")?),
            addresses: Set(serde_json::to_string(&request.addresses)
                .context("Failed to encode addresses")?),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        let model = self.store.businesses().insert(business).await?;
        Ok(model.into())
    }

    pub async fn get(&self, business_id: &str) -> Result<BusinessView, ServiceError> {
        require_id(business_id, "Business id")?;

        let business = self
            .store
            .businesses()
            .get(business_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Business"))?;
        Ok(business.into())
    }

    pub async fn list(&self) -> Result<Vec<BusinessView>, ServiceError> {
        let businesses = self.store.businesses().list().await?;
        Ok(businesses.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        business_id: &str,
        request: UpdateBusinessRequest,
    ) -> Result<BusinessView, ServiceError> {
        require_id(business_id, "Business id")?;

        let business = self
            .store
            .businesses()
            .get(business_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Business"))?;

        let mut active: business_clients::ActiveModel = business.into();
        if let Some(client_name) = request.client_name {
            active.client_name = Set(client_name);
        }
        if let Some(shop_name) = request.shop_name {
            active.shop_name = Set(shop_name);
        }
        if let Some(domain_name) = request.domain_name {
            active.domain_name = Set(domain_name);
        }
        if let Some(shop_desc) = request.shop_desc {
            active.shop_desc = Set(shop_desc);
        }
        if let Some(shop_locations) = request.shop_locations {
            active.shop_locations = Set(serde_json::to_string(&shop_locations)
                .context("Failed to encode shop locations")?);
        }
        if let Some(addresses) = request.addresses {
            active.addresses =
                Set(serde_json::to_string(&addresses).context("Failed to encode addresses")?);
        }

        let model = self.store.businesses().update(active).await?;
        Ok(model.into())
    }

    pub async fn delete(&self, business_id: &str) -> Result<(), ServiceError> {
        require_id(business_id, "Business id")?;

        let deleted = self.store.businesses().delete(business_id).await?;
        if !deleted {
            return Err(ServiceError::not_found("Business"));
        }
        Ok(())
    }
}
