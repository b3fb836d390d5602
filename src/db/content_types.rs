// Process-wide content type lookups

use crate::db::schema::ContentType;
use crate::errors::Result;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type CacheKey = (String, String);

/// Shared cache of `(app_label, model)` to content type rows.
///
/// Content type ids are stable for the lifetime of a database, so lookups are
/// cached for the whole process. Deployments that truncate the database
/// between requests (test runs) must clear the cache, see
/// [`crate::middleware::clear_content_type_cache`].
#[derive(Debug, Clone, Default)]
pub struct ContentTypeCache {
    entries: Arc<RwLock<HashMap<CacheKey, ContentType>>>,
}

impl ContentTypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the content type for a model, creating the row if missing
    pub async fn get_for_model(
        &self,
        pool: &PgPool,
        app_label: &str,
        model: &str,
    ) -> Result<ContentType> {
        if let Some(content_type) = self.get_cached(app_label, model).await {
            return Ok(content_type);
        }

        let content_type = get_or_create(pool, app_label, model).await?;
        self.insert(content_type.clone()).await;

        Ok(content_type)
    }

    pub async fn get_cached(&self, app_label: &str, model: &str) -> Option<ContentType> {
        let entries = self.entries.read().await;
        entries
            .get(&(app_label.to_string(), model.to_string()))
            .cloned()
    }

    pub async fn insert(&self, content_type: ContentType) {
        let key = (content_type.app_label.clone(), content_type.model.clone());
        self.entries.write().await.insert(key, content_type);
    }

    /// Drop every cached entry
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        if !entries.is_empty() {
            tracing::debug!(entries = entries.len(), "Clearing content type cache");
        }
        entries.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

async fn get_or_create(pool: &PgPool, app_label: &str, model: &str) -> Result<ContentType> {
    // The no-op update makes RETURNING yield the row on conflict as well.
    let content_type = sqlx::query_as::<_, ContentType>(
        r#"
        INSERT INTO content_types (app_label, model)
        VALUES ($1, $2)
        ON CONFLICT (app_label, model) DO UPDATE SET model = EXCLUDED.model
        RETURNING id, app_label, model
        "#,
    )
    .bind(app_label)
    .bind(model)
    .fetch_one(pool)
    .await?;

    Ok(content_type)
}
