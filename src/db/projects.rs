// Database queries for projects

use crate::db::schema::Project;
use crate::errors::{AppError, Result};
use sqlx::PgPool;
use uuid::Uuid;

const PROJECT_COLUMNS: &str = r#"
    id, owner, name, description, is_public,
    has_restricted_projectfiles, created_at, updated_at
"#;

/// Get a project by ID
pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Project>> {
    let project = sqlx::query_as::<_, Project>(&format!(
        "SELECT {} FROM projects WHERE id = $1",
        PROJECT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

/// Toggle whether projectfile modifications are limited to managers and admins
pub async fn set_restricted_projectfiles(
    pool: &PgPool,
    id: Uuid,
    restricted: bool,
) -> Result<Project> {
    let project = sqlx::query_as::<_, Project>(&format!(
        r#"
        UPDATE projects
        SET has_restricted_projectfiles = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        PROJECT_COLUMNS
    ))
    .bind(id)
    .bind(restricted)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::ProjectNotFound)?;

    tracing::debug!(
        project_id = %id,
        restricted,
        "Updated projectfile restriction"
    );

    Ok(project)
}
