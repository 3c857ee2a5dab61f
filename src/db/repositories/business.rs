use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect};

use crate::entities::business_clients;
use crate::services::search::SearchFilters;

pub struct BusinessRepository {
    conn: DatabaseConnection,
}

impl BusinessRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(
        &self,
        business: business_clients::ActiveModel,
    ) -> Result<business_clients::Model> {
        let model = business
            .insert(&self.conn)
            .await
            .context("Failed to insert business client")?;
        Ok(model)
    }

    pub async fn get(&self, business_id: &str) -> Result<Option<business_clients::Model>> {
        let business = business_clients::Entity::find_by_id(business_id)
            .one(&self.conn)
            .await
            .context("Failed to query business client")?;
        Ok(business)
    }

    pub async fn list(&self) -> Result<Vec<business_clients::Model>> {
        let businesses = business_clients::Entity::find()
            .order_by_asc(business_clients::Column::ClientName)
            .all(&self.conn)
            .await
            .context("Failed to list business clients")?;
        Ok(businesses)
    }

    pub async fn update(
        &self,
        business: business_clients::ActiveModel,
    ) -> Result<business_clients::Model> {
        let model = business
            .update(&self.conn)
            .await
            .context("Failed to update business client")?;
        Ok(model)
    }

    pub async fn delete(&self, business_id: &str) -> Result<bool> {
        let result = business_clients::Entity::delete_by_id(business_id)
            .exec(&self.conn)
            .await
            .context("Failed to delete business client")?;
        Ok(result.rows_affected > 0)
    }

    /// One filtered, paginated query over the search read model.
    ///
    /// Text and location filters are AND-ed; each filter's sub-conditions
    /// are OR-ed. Matching is a case-insensitive substring test, with the
    /// JSON location/address arrays unpacked through `json_each`.
    /// Returns the page plus the pre-pagination total.
    pub async fn search(
        &self,
        filters: &SearchFilters,
    ) -> Result<(Vec<business_clients::Model>, u64)> {
        let mut condition = Condition::all();

        if let Some(query) = filters.query_string.as_deref().filter(|q| !q.is_empty()) {
            let pattern = like_pattern(query);
            condition = condition.add(
                Condition::any()
                    .add(Expr::cust_with_values(
                        "LOWER(client_name) LIKE ?",
                        [pattern.clone()],
                    ))
                    .add(Expr::cust_with_values(
                        "LOWER(shop_name) LIKE ?",
                        [pattern.clone()],
                    ))
                    .add(Expr::cust_with_values(
                        "LOWER(domain_name) LIKE ?",
                        [pattern.clone()],
                    ))
                    .add(Expr::cust_with_values(
                        "LOWER(shop_desc) LIKE ?",
                        [pattern],
                    )),
            );
        }

        if let Some(location) = filters.location.as_deref().filter(|l| !l.is_empty()) {
            let pattern = like_pattern(location);
            condition = condition.add(
                Condition::any()
                    .add(Expr::cust_with_values(
                        "EXISTS (SELECT 1 FROM json_each(shop_locations) AS loc \
                         WHERE LOWER(loc.value) LIKE ?)",
                        [pattern.clone()],
                    ))
                    .add(Expr::cust_with_values(
                        "EXISTS (SELECT 1 FROM json_each(addresses) AS addr WHERE \
                         LOWER(COALESCE(json_extract(addr.value, '$.street'), '')) LIKE ? OR \
                         LOWER(COALESCE(json_extract(addr.value, '$.city'), '')) LIKE ? OR \
                         LOWER(COALESCE(json_extract(addr.value, '$.district'), '')) LIKE ? OR \
                         LOWER(COALESCE(json_extract(addr.value, '$.state'), '')) LIKE ? OR \
                         LOWER(COALESCE(json_extract(addr.value, '$.pincode'), '')) LIKE ?",
                        vec![
                            pattern.clone(),
                            pattern.clone(),
                            pattern.clone(),
                            pattern.clone(),
                            pattern,
                        ],
                    )),
            );
        }

        let total = business_clients::Entity::find()
            .filter(condition.clone())
            .count(&self.conn)
            .await
            .context("Failed to count search results")?;

        let rows = business_clients::Entity::find()
            .filter(condition)
            .order_by_asc(business_clients::Column::ClientName)
            .order_by_asc(business_clients::Column::BusinessId)
            .offset((filters.page - 1) * filters.limit)
            .limit(filters.limit)
            .all(&self.conn)
            .await
            .context("Failed to run search query")?;

        Ok((rows, total))
    }
}

fn like_pattern(needle: &str) -> String {
    format!("%{}%", needle.to_lowercase())
}
