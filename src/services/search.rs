use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::db::Store;
use crate::services::ServiceError;
use crate::services::business::BusinessView;

/// Search filters after normalization. Field order matters: the cache
/// key is the serialization of this struct, so identical filters always
/// produce identical keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(rename = "queryString")]
    pub query_string: Option<String>,
    pub location: Option<String>,
    pub page: u64,
    pub limit: u64,
}

impl SearchFilters {
    /// Clamps the page to at least 1 and the page size into
    /// `1..=max_page_size`.
    #[must_use]
    pub fn normalized(
        query_string: Option<String>,
        location: Option<String>,
        page: Option<u64>,
        limit: Option<u64>,
        config: &SearchConfig,
    ) -> Self {
        Self {
            query_string,
            location,
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(10).clamp(1, config.max_page_size),
        }
    }

    /// Deterministic cache key: a fixed prefix plus the stable
    /// serialization of the filters.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!(
            "searchBusinesses:{}",
            serde_json::to_string(self).unwrap_or_default()
        )
    }
}

/// One result page, cached verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub data: Vec<BusinessView>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

/// Cache-aside search over the business-client read model.
pub struct SearchService {
    store: Store,
    config: SearchConfig,
}

impl SearchService {
    #[must_use]
    pub const fn new(store: Store, config: SearchConfig) -> Self {
        Self { store, config }
    }

    /// Runs a search for the given caller.
    ///
    /// The search history write is best-effort: a failure there is
    /// logged and the search proceeds. On a cache hit the stored page is
    /// returned verbatim and no data query runs.
    pub async fn search(
        &self,
        filters: &SearchFilters,
        user_id: &str,
    ) -> Result<SearchPage, ServiceError> {
        if let Err(e) = self
            .store
            .search_history()
            .add(
                user_id,
                filters.query_string.as_deref(),
                filters.location.as_deref(),
            )
            .await
        {
            warn!(user_id, error = %e, "Failed to record search history");
        }

        let cache_key = filters.cache_key();

        if let Some(payload) = self.store.cache().get(&cache_key).await? {
            match serde_json::from_str::<SearchPage>(&payload) {
                Ok(page) => {
                    debug!(cache_key, "Search served from cache");
                    return Ok(page);
                }
                Err(e) => {
                    // A stale or corrupt entry falls through to a fresh
                    // query and gets overwritten below.
                    warn!(cache_key, error = %e, "Discarding undecodable cache entry");
                }
            }
        }

        let (rows, total) = self.store.businesses().search(filters).await?;

        let page = SearchPage {
            data: rows.into_iter().map(Into::into).collect(),
            total,
            page: filters.page,
            limit: filters.limit,
        };

        let payload =
            serde_json::to_string(&page).map_err(|e| ServiceError::Internal(e.into()))?;
        self.store
            .cache()
            .set(&cache_key, &payload, self.config.cache_ttl_seconds)
            .await?;

        Ok(page)
    }

    /// Drops every cached page; the next search of any shape re-queries.
    pub async fn clear_cache(&self) -> Result<u64, ServiceError> {
        let removed = self.store.cache().reset().await?;
        Ok(removed)
    }

    pub async fn history(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<crate::entities::search_history::Model>, ServiceError> {
        let entries = self
            .store
            .search_history()
            .recent_for_user(user_id, limit)
            .await?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_filters_produce_identical_keys() {
        let config = SearchConfig::default();
        let a = SearchFilters::normalized(
            Some("cafe".to_string()),
            Some("park road".to_string()),
            Some(2),
            Some(10),
            &config,
        );
        let b = SearchFilters::normalized(
            Some("cafe".to_string()),
            Some("park road".to_string()),
            Some(2),
            Some(10),
            &config,
        );

        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn different_filters_produce_different_keys() {
        let config = SearchConfig::default();
        let a = SearchFilters::normalized(Some("cafe".to_string()), None, Some(1), Some(10), &config);
        let b = SearchFilters::normalized(Some("cafe".to_string()), None, Some(2), Some(10), &config);

        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn page_and_limit_are_clamped() {
        let config = SearchConfig::default();
        let filters = SearchFilters::normalized(None, None, Some(0), Some(10_000), &config);

        assert_eq!(filters.page, 1);
        assert_eq!(filters.limit, config.max_page_size);
    }
}
