use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::{prelude::SearchCache, search_cache};

pub struct CacheRepository {
    conn: DatabaseConnection,
}

impl CacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns the cached payload for the key if an unexpired entry exists.
    pub async fn get(&self, cache_key: &str) -> Result<Option<String>> {
        let now = chrono::Utc::now().to_rfc3339();

        // Opportunistic cleanup of expired entries; a background job would
        // also work, but this keeps the table bounded without one.
        let _ = SearchCache::delete_many()
            .filter(search_cache::Column::ExpiresAt.lt(&now))
            .exec(&self.conn)
            .await;

        let entry = SearchCache::find()
            .filter(search_cache::Column::CacheKey.eq(cache_key))
            .filter(search_cache::Column::ExpiresAt.gt(&now))
            .one(&self.conn)
            .await?;

        Ok(entry.map(|e| e.payload))
    }

    /// Stores a payload under the key. Last writer wins on the unique key.
    pub async fn set(&self, cache_key: &str, payload: &str, ttl_seconds: u64) -> Result<()> {
        let now = chrono::Utc::now();
        let expires_at = (now + chrono::Duration::seconds(ttl_seconds.try_into().unwrap_or(300)))
            .to_rfc3339();
        let created_at = now.to_rfc3339();

        let active_model = search_cache::ActiveModel {
            cache_key: Set(cache_key.to_string()),
            payload: Set(payload.to_string()),
            created_at: Set(created_at),
            expires_at: Set(expires_at),
            ..Default::default()
        };

        SearchCache::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(search_cache::Column::CacheKey)
                    .update_columns([
                        search_cache::Column::Payload,
                        search_cache::Column::CreatedAt,
                        search_cache::Column::ExpiresAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    /// Full reset: every cached entry goes, expired or not.
    pub async fn reset(&self) -> Result<u64> {
        let result = SearchCache::delete_many().exec(&self.conn).await?;
        Ok(result.rows_affected)
    }
}
