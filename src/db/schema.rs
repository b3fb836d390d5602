// Database row types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// Project
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    /// Restrict modifications of QGIS/QField projectfiles to managers and
    /// administrators.
    pub has_restricted_projectfiles: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Content Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ContentType {
    pub id: i32,
    pub app_label: String,
    pub model: String,
}

// ============================================================================
// Audit Log
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    pub id: i64,
    pub content_type_id: i32,
    pub object_id: String,
    pub action: String,
    pub changes: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}
