use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set};

use crate::entities::search_history;

pub struct SearchHistoryRepository {
    conn: DatabaseConnection,
}

impl SearchHistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(
        &self,
        user_id: &str,
        query: Option<&str>,
        location: Option<&str>,
    ) -> Result<()> {
        let entry = search_history::ActiveModel {
            user_id: Set(user_id.to_string()),
            query: Set(query.map(ToString::to_string)),
            location: Set(location.map(ToString::to_string)),
            searched_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        entry
            .insert(&self.conn)
            .await
            .context("Failed to record search history")?;

        Ok(())
    }

    pub async fn recent_for_user(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<search_history::Model>> {
        let entries = search_history::Entity::find()
            .filter(search_history::Column::UserId.eq(user_id))
            .order_by_desc(search_history::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to load search history")?;
        Ok(entries)
    }
}
