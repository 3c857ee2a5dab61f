use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder};

use crate::entities::orders;

pub struct OrderRepository {
    conn: DatabaseConnection,
}

impl OrderRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, order: orders::ActiveModel) -> Result<orders::Model> {
        let model = order
            .insert(&self.conn)
            .await
            .context("Failed to insert order")?;
        Ok(model)
    }

    pub async fn get(&self, business_id: &str, oid: &str) -> Result<Option<orders::Model>> {
        let order = orders::Entity::find_by_id(oid)
            .filter(orders::Column::BusinessId.eq(business_id))
            .one(&self.conn)
            .await
            .context("Failed to query order")?;
        Ok(order)
    }

    pub async fn list_for_business(&self, business_id: &str) -> Result<Vec<orders::Model>> {
        let orders = orders::Entity::find()
            .filter(orders::Column::BusinessId.eq(business_id))
            .order_by_desc(orders::Column::Odate)
            .all(&self.conn)
            .await
            .context("Failed to list orders")?;
        Ok(orders)
    }

    /// Orders for one business inside a half-open `[from, to)` window.
    /// RFC3339 strings compare lexicographically, so the bounds are plain
    /// string comparisons.
    pub async fn list_in_window(
        &self,
        business_id: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<orders::Model>> {
        let mut query = orders::Entity::find().filter(orders::Column::BusinessId.eq(business_id));

        if let Some(from) = from {
            query = query.filter(orders::Column::Odate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(orders::Column::Odate.lt(to));
        }

        let orders = query
            .order_by_asc(orders::Column::Odate)
            .all(&self.conn)
            .await
            .context("Failed to query orders in window")?;
        Ok(orders)
    }

    pub async fn list_for_customer(
        &self,
        business_id: &str,
        cust_id: &str,
    ) -> Result<Vec<orders::Model>> {
        let orders = orders::Entity::find()
            .filter(orders::Column::BusinessId.eq(business_id))
            .filter(orders::Column::CustId.eq(cust_id))
            .order_by_asc(orders::Column::Odate)
            .all(&self.conn)
            .await
            .context("Failed to list orders for customer")?;
        Ok(orders)
    }

    pub async fn update(&self, order: orders::ActiveModel) -> Result<orders::Model> {
        let model = order
            .update(&self.conn)
            .await
            .context("Failed to update order")?;
        Ok(model)
    }

    pub async fn delete(&self, business_id: &str, oid: &str) -> Result<bool> {
        let result = orders::Entity::delete_many()
            .filter(orders::Column::BusinessId.eq(business_id))
            .filter(orders::Column::Oid.eq(oid))
            .exec(&self.conn)
            .await
            .context("Failed to delete order")?;
        Ok(result.rows_affected > 0)
    }
}
