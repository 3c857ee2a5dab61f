use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set};

use crate::entities::shop_services;

pub struct ShopServiceRepository {
    conn: DatabaseConnection,
}

impl ShopServiceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, service: shop_services::ActiveModel) -> Result<shop_services::Model> {
        let model = service
            .insert(&self.conn)
            .await
            .context("Failed to insert shop service")?;
        Ok(model)
    }

    pub async fn get(&self, business_id: &str, sid: &str) -> Result<Option<shop_services::Model>> {
        let service = shop_services::Entity::find_by_id(sid)
            .filter(shop_services::Column::BusinessId.eq(business_id))
            .one(&self.conn)
            .await
            .context("Failed to query shop service")?;
        Ok(service)
    }

    pub async fn list_for_business(
        &self,
        business_id: &str,
        live_only: bool,
    ) -> Result<Vec<shop_services::Model>> {
        let mut query =
            shop_services::Entity::find().filter(shop_services::Column::BusinessId.eq(business_id));

        if live_only {
            query = query.filter(shop_services::Column::Flag.eq(0));
        }

        let services = query
            .order_by_asc(shop_services::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list shop services")?;
        Ok(services)
    }

    pub async fn update(&self, service: shop_services::ActiveModel) -> Result<shop_services::Model> {
        let model = service
            .update(&self.conn)
            .await
            .context("Failed to update shop service")?;
        Ok(model)
    }

    pub async fn retire(&self, business_id: &str, sid: &str) -> Result<bool> {
        let Some(service) = self.get(business_id, sid).await? else {
            return Ok(false);
        };

        let flag = service.flag;
        let mut active: shop_services::ActiveModel = service.into();
        active.flag = Set(flag + 1);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, business_id: &str, sid: &str) -> Result<bool> {
        let result = shop_services::Entity::delete_many()
            .filter(shop_services::Column::BusinessId.eq(business_id))
            .filter(shop_services::Column::Sid.eq(sid))
            .exec(&self.conn)
            .await
            .context("Failed to delete shop service")?;
        Ok(result.rows_affected > 0)
    }
}
