use sea_orm::Set;
use serde::Deserialize;

use crate::db::Store;
use crate::entities::{products, shop_services};
use crate::services::{ServiceError, require_id};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub units: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub units: Option<String>,
}

pub struct ProductCatalogService {
    store: Store,
}

impl ProductCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        business_id: &str,
        request: CreateProductRequest,
    ) -> Result<products::Model, ServiceError> {
        require_id(business_id, "Business id")?;
        if request.name.trim().is_empty() {
            return Err(ServiceError::validation("Name and price are required fields"));
        }
        if request.price <= 0.0 {
            return Err(ServiceError::validation("Name and price are required fields"));
        }

        let product = products::ActiveModel {
            pid: Set(uuid::Uuid::new_v4().to_string()),
            business_id: Set(business_id.to_string()),
            name: Set(request.name),
            description: Set(request.description),
            image_url: Set(request.image_url),
            price: Set(request.price),
            quantity: Set(request.quantity),
            units: Set(request.units),
            flag: Set(0),
        };

        let model = self.store.products().insert(product).await?;
        Ok(model)
    }

    pub async fn list(
        &self,
        business_id: &str,
        live_only: bool,
    ) -> Result<Vec<products::Model>, ServiceError> {
        require_id(business_id, "Business id")?;
        let products = self
            .store
            .products()
            .list_for_business(business_id, live_only)
            .await?;
        Ok(products)
    }

    pub async fn get(&self, business_id: &str, pid: &str) -> Result<products::Model, ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(pid, "Product id")?;

        let product = self
            .store
            .products()
            .get(business_id, pid)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product"))?;
        Ok(product)
    }

    pub async fn update(
        &self,
        business_id: &str,
        pid: &str,
        request: UpdateProductRequest,
    ) -> Result<products::Model, ServiceError> {
        let product = self.get(business_id, pid).await?;

        let mut active: products::ActiveModel = product.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(description) = request.description {
            active.description = Set(Some(description));
        }
        if let Some(image_url) = request.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(price) = request.price {
            active.price = Set(price);
        }
        if let Some(quantity) = request.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(units) = request.units {
            active.units = Set(units);
        }

        let model = self.store.products().update(active).await?;
        Ok(model)
    }

    pub async fn retire(&self, business_id: &str, pid: &str) -> Result<(), ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(pid, "Product id")?;

        let found = self.store.products().retire(business_id, pid).await?;
        if !found {
            return Err(ServiceError::not_found("Product"));
        }
        Ok(())
    }

    pub async fn delete(&self, business_id: &str, pid: &str) -> Result<(), ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(pid, "Product id")?;

        let deleted = self.store.products().delete(business_id, pid).await?;
        if !deleted {
            return Err(ServiceError::not_found("Product"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateShopServiceRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateShopServiceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

pub struct ShopServiceCatalogService {
    store: Store,
}

impl ShopServiceCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        business_id: &str,
        request: CreateShopServiceRequest,
    ) -> Result<shop_services::Model, ServiceError> {
        require_id(business_id, "Business id")?;
        if request.name.trim().is_empty() || request.price <= 0.0 {
            return Err(ServiceError::validation("Name and price are required fields"));
        }

        let service = shop_services::ActiveModel {
            sid: Set(uuid::Uuid::new_v4().to_string()),
            business_id: Set(business_id.to_string()),
            name: Set(request.name),
            description: Set(request.description),
            cost: Set(request.price),
            image_url: Set(request.image_url),
            flag: Set(0),
        };

        let model = self.store.shop_services().insert(service).await?;
        Ok(model)
    }

    pub async fn list(
        &self,
        business_id: &str,
        live_only: bool,
    ) -> Result<Vec<shop_services::Model>, ServiceError> {
        require_id(business_id, "Business id")?;
        let services = self
            .store
            .shop_services()
            .list_for_business(business_id, live_only)
            .await?;
        Ok(services)
    }

    pub async fn get(
        &self,
        business_id: &str,
        sid: &str,
    ) -> Result<shop_services::Model, ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(sid, "Service id")?;

        let service = self
            .store
            .shop_services()
            .get(business_id, sid)
            .await?
            .ok_or_else(|| ServiceError::not_found("Service"))?;
        Ok(service)
    }

    pub async fn update(
        &self,
        business_id: &str,
        sid: &str,
        request: UpdateShopServiceRequest,
    ) -> Result<shop_services::Model, ServiceError> {
        let service = self.get(business_id, sid).await?;

        let mut active: shop_services::ActiveModel = service.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(description) = request.description {
            active.description = Set(description);
        }
        if let Some(price) = request.price {
            active.cost = Set(price);
        }
        if let Some(image_url) = request.image_url {
            active.image_url = Set(Some(image_url));
        }

        let model = self.store.shop_services().update(active).await?;
        Ok(model)
    }

    pub async fn retire(&self, business_id: &str, sid: &str) -> Result<(), ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(sid, "Service id")?;

        let found = self.store.shop_services().retire(business_id, sid).await?;
        if !found {
            return Err(ServiceError::not_found("Service"));
        }
        Ok(())
    }

    pub async fn delete(&self, business_id: &str, sid: &str) -> Result<(), ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(sid, "Service id")?;

        let deleted = self.store.shop_services().delete(business_id, sid).await?;
        if !deleted {
            return Err(ServiceError::not_found("Service"));
        }
        Ok(())
    }
}
