use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder};

use crate::entities::customers;

pub struct CustomerRepository {
    conn: DatabaseConnection,
}

impl CustomerRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, customer: customers::ActiveModel) -> Result<customers::Model> {
        let model = customer
            .insert(&self.conn)
            .await
            .context("Failed to insert customer")?;
        Ok(model)
    }

    pub async fn get(&self, business_id: &str, cust_id: &str) -> Result<Option<customers::Model>> {
        let customer = customers::Entity::find_by_id(cust_id)
            .filter(customers::Column::BusinessId.eq(business_id))
            .one(&self.conn)
            .await
            .context("Failed to query customer")?;
        Ok(customer)
    }

    pub async fn list_for_business(&self, business_id: &str) -> Result<Vec<customers::Model>> {
        let customers = customers::Entity::find()
            .filter(customers::Column::BusinessId.eq(business_id))
            .order_by_asc(customers::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list customers")?;
        Ok(customers)
    }

    pub async fn update(&self, customer: customers::ActiveModel) -> Result<customers::Model> {
        let model = customer
            .update(&self.conn)
            .await
            .context("Failed to update customer")?;
        Ok(model)
    }

    pub async fn delete(&self, business_id: &str, cust_id: &str) -> Result<bool> {
        let result = customers::Entity::delete_many()
            .filter(customers::Column::BusinessId.eq(business_id))
            .filter(customers::Column::CustId.eq(cust_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete customer")?;
        Ok(result.rows_affected > 0)
    }
}
