// Change log for persisted objects

use crate::db::schema::{AuditLogEntry, ContentType};
use crate::errors::Result;
use sqlx::PgPool;

/// Record a change made to an object identified by its content type and id
pub async fn record_change(
    pool: &PgPool,
    content_type: &ContentType,
    object_id: &str,
    action: &str,
    changes: serde_json::Value,
) -> Result<AuditLogEntry> {
    let entry = sqlx::query_as::<_, AuditLogEntry>(
        r#"
        INSERT INTO audit_log_entries (content_type_id, object_id, action, changes)
        VALUES ($1, $2, $3, $4)
        RETURNING id, content_type_id, object_id, action, changes, timestamp
        "#,
    )
    .bind(content_type.id)
    .bind(object_id)
    .bind(action)
    .bind(changes)
    .fetch_one(pool)
    .await?;

    tracing::debug!(
        content_type = %format!("{}.{}", content_type.app_label, content_type.model),
        object_id,
        action,
        "Recorded audit log entry"
    );

    Ok(entry)
}

/// Entries for one object, oldest first
pub async fn list_for_object(
    pool: &PgPool,
    content_type: &ContentType,
    object_id: &str,
) -> Result<Vec<AuditLogEntry>> {
    let entries = sqlx::query_as::<_, AuditLogEntry>(
        r#"
        SELECT id, content_type_id, object_id, action, changes, timestamp
        FROM audit_log_entries
        WHERE content_type_id = $1 AND object_id = $2
        ORDER BY timestamp ASC, id ASC
        "#,
    )
    .bind(content_type.id)
    .bind(object_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
