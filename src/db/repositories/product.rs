use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set};

use crate::entities::products;

pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, product: products::ActiveModel) -> Result<products::Model> {
        let model = product
            .insert(&self.conn)
            .await
            .context("Failed to insert product")?;
        Ok(model)
    }

    pub async fn get(&self, business_id: &str, pid: &str) -> Result<Option<products::Model>> {
        let product = products::Entity::find_by_id(pid)
            .filter(products::Column::BusinessId.eq(business_id))
            .one(&self.conn)
            .await
            .context("Failed to query product")?;
        Ok(product)
    }

    pub async fn list_for_business(
        &self,
        business_id: &str,
        live_only: bool,
    ) -> Result<Vec<products::Model>> {
        let mut query = products::Entity::find().filter(products::Column::BusinessId.eq(business_id));

        if live_only {
            query = query.filter(products::Column::Flag.eq(0));
        }

        let products = query
            .order_by_asc(products::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list products")?;
        Ok(products)
    }

    pub async fn update(&self, product: products::ActiveModel) -> Result<products::Model> {
        let model = product
            .update(&self.conn)
            .await
            .context("Failed to update product")?;
        Ok(model)
    }

    pub async fn retire(&self, business_id: &str, pid: &str) -> Result<bool> {
        let Some(product) = self.get(business_id, pid).await? else {
            return Ok(false);
        };

        let flag = product.flag;
        let mut active: products::ActiveModel = product.into();
        active.flag = Set(flag + 1);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, business_id: &str, pid: &str) -> Result<bool> {
        let result = products::Entity::delete_many()
            .filter(products::Column::BusinessId.eq(business_id))
            .filter(products::Column::Pid.eq(pid))
            .exec(&self.conn)
            .await
            .context("Failed to delete product")?;
        Ok(result.rows_affected > 0)
    }
}
