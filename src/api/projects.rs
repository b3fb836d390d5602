use crate::{
    api::routes::AppState,
    db::{self, schema::{AuditLogEntry, Project}},
    domain::ProjectRole,
    errors::{AppError, Result},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

const APP_LABEL: &str = "core";
const MODEL: &str = "project";

#[derive(Debug, Deserialize)]
pub struct RestrictionRequest {
    pub has_restricted_projectfiles: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectfilePermission {
    pub role: ProjectRole,
    pub can_modify_projectfiles: bool,
}

async fn load_project(state: &AppState, id: Uuid) -> Result<Project> {
    db::projects::get_by_id(&state.db_pool, id)
        .await?
        .ok_or(AppError::ProjectNotFound)
}

/// GET /v1/projects/:id
#[tracing::instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>> {
    Ok(Json(load_project(&state, id).await?))
}

/// PUT /v1/projects/:id/restriction
#[tracing::instrument(skip(state))]
pub async fn set_restriction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RestrictionRequest>,
) -> Result<Json<Project>> {
    let before = load_project(&state, id).await?;
    let project = db::projects::set_restricted_projectfiles(
        &state.db_pool,
        id,
        request.has_restricted_projectfiles,
    )
    .await?;

    if before.has_restricted_projectfiles != project.has_restricted_projectfiles {
        let content_type = state
            .content_types
            .get_for_model(&state.db_pool, APP_LABEL, MODEL)
            .await?;
        db::audit::record_change(
            &state.db_pool,
            &content_type,
            &id.to_string(),
            "update",
            json!({
                "has_restricted_projectfiles": [
                    before.has_restricted_projectfiles,
                    project.has_restricted_projectfiles,
                ]
            }),
        )
        .await?;
    }

    Ok(Json(project))
}

/// GET /v1/projects/:id/history
#[tracing::instrument(skip(state))]
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AuditLogEntry>>> {
    load_project(&state, id).await?;
    let content_type = state
        .content_types
        .get_for_model(&state.db_pool, APP_LABEL, MODEL)
        .await?;
    let entries =
        db::audit::list_for_object(&state.db_pool, &content_type, &id.to_string()).await?;
    Ok(Json(entries))
}

/// GET /v1/projects/:id/permissions/:role
#[tracing::instrument(skip(state))]
pub async fn projectfile_permission(
    State(state): State<AppState>,
    Path((id, role)): Path<(Uuid, String)>,
) -> Result<Json<ProjectfilePermission>> {
    let role: ProjectRole = role.parse()?;
    let project = load_project(&state, id).await?;

    Ok(Json(ProjectfilePermission {
        role,
        can_modify_projectfiles: project.can_modify_projectfiles(role),
    }))
}
