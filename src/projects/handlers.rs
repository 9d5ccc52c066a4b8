// src/projects/handlers.rs

use axum::extract::{Extension, Json, Path};
use futures::future::join_all;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::models::{
    BulkDeleteRequest, BulkDeleteResponse, Project, ProjectForm, ProjectStatus, StoredProject,
};
use super::validators::ProjectValidator;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, Validator};
use crate::links::reconcile_on_save;
use crate::store::{server_timestamp, Document, OrderBy};

const COLLECTION: &str = "projects";

fn parse_project(doc: Document) -> Result<Project, ApiError> {
    let stored: StoredProject = doc
        .parse()
        .map_err(|e| ApiError::InternalServer(format!("corrupt project record: {}", e)))?;
    Ok(stored.into_project())
}

fn require_admin(authed: &AuthedUser) -> Result<(), ApiError> {
    if authed.is_admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".to_string()))
    }
}

/// GET /api/projects - published projects, newest first (public)
pub async fn get_public_projects(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let state = state_lock.read().await.clone();

    let docs = state
        .store
        .get_all(
            COLLECTION,
            Some(OrderBy::desc("createdAt")),
            Some(("status", "published")),
        )
        .await
        .map_err(ApiError::DatabaseError)?;

    docs.into_iter().map(parse_project).collect::<Result<Vec<_>, _>>().map(Json)
}

/// GET /api/projects/:id - single published project (public)
pub async fn get_public_project(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(project_id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    let state = state_lock.read().await.clone();

    let doc = state
        .store
        .get_one(COLLECTION, &project_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Project {} not found", project_id)))?;

    let project = parse_project(doc)?;
    if project.status != ProjectStatus::Published {
        return Err(ApiError::NotFound(format!(
            "Project {} not found",
            project_id
        )));
    }

    Ok(Json(project))
}

/// GET /api/admin/projects - all projects, newest first (admin only)
pub async fn get_projects(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<Project>>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let docs = state
        .store
        .get_all(COLLECTION, Some(OrderBy::desc("createdAt")), None)
        .await
        .map_err(ApiError::DatabaseError)?;

    debug!(
        admin_id = %authed.id,
        project_count = docs.len(),
        "Fetched projects"
    );

    docs.into_iter().map(parse_project).collect::<Result<Vec<_>, _>>().map(Json)
}

/// GET /api/admin/projects/:id - single project (admin only)
pub async fn get_project(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(project_id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let doc = state
        .store
        .get_one(COLLECTION, &project_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Project {} not found", project_id)))?;

    Ok(Json(parse_project(doc)?))
}

fn project_fields(form: ProjectForm, created_at: String, updated_at: String, order: i64) -> serde_json::Value {
    let reconciled = reconcile_on_save(form.links);
    json!({
        "title": form.title,
        "description": form.description,
        "longDescription": form.long_description,
        "category": form.category,
        "techStack": form.tech_stack,
        "status": form.status,
        "featured": form.featured,
        "imageUrl": form.image_url,
        "images": form.images,
        "links": reconciled.links,
        "githubUrl": reconciled.github_url,
        "demoUrl": reconciled.demo_url,
        "createdAt": created_at,
        "updatedAt": updated_at,
        "order": order,
    })
}

/// POST /api/admin/projects - create a project (admin only)
pub async fn create_project(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(form): Json<ProjectForm>,
) -> Result<Json<Project>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let validation = ProjectValidator.validate(&form);
    if !validation.is_valid {
        warn!(
            admin_id = %authed.id,
            errors = ?validation.errors,
            "Project creation validation failed"
        );
        return Err(ApiError::from(validation));
    }

    // New entries go to the end of the list
    let order = state
        .store
        .count(COLLECTION)
        .await
        .map_err(ApiError::DatabaseError)?;
    let now = server_timestamp();

    let title = form.title.clone();
    let fields = project_fields(form, now.clone(), now, order);

    let project_id = state
        .store
        .create(COLLECTION, fields)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error creating project");
            ApiError::DatabaseError(e)
        })?;

    let doc = state
        .store
        .get_one(COLLECTION, &project_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::InternalServer("created project vanished".to_string()))?;

    info!(
        admin_id = %authed.id,
        project_id = %project_id,
        title = %title,
        "Project created"
    );

    Ok(Json(parse_project(doc)?))
}

/// PUT /api/admin/projects/:id - update a project (admin only)
///
/// Whole-form resubmit: createdAt and order are preserved from the stored
/// record, updatedAt is restamped.
pub async fn update_project(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(project_id): Path<String>,
    Json(form): Json<ProjectForm>,
) -> Result<Json<Project>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let validation = ProjectValidator.validate(&form);
    if !validation.is_valid {
        warn!(
            admin_id = %authed.id,
            project_id = %project_id,
            errors = ?validation.errors,
            "Project update validation failed"
        );
        return Err(ApiError::from(validation));
    }

    let existing = state
        .store
        .get_one(COLLECTION, &project_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Project {} not found", project_id)))?;
    let existing = parse_project(existing)?;

    let fields = project_fields(form, existing.created_at, server_timestamp(), existing.order);

    state
        .store
        .update(COLLECTION, &project_id, fields)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                ApiError::NotFound(format!("Project {} not found", project_id))
            }
            e => ApiError::DatabaseError(e),
        })?;

    let doc = state
        .store
        .get_one(COLLECTION, &project_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Project {} not found", project_id)))?;

    info!(
        admin_id = %authed.id,
        project_id = %project_id,
        "Project updated"
    );

    Ok(Json(parse_project(doc)?))
}

/// DELETE /api/admin/projects/:id - delete a project (admin only)
pub async fn delete_project(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(project_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    state
        .store
        .delete(COLLECTION, &project_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                ApiError::NotFound(format!("Project {} not found", project_id))
            }
            e => ApiError::DatabaseError(e),
        })?;

    info!(
        admin_id = %authed.id,
        project_id = %project_id,
        "Project deleted"
    );

    Ok(Json(json!({ "message": "Project deleted" })))
}

/// POST /api/admin/projects/bulk-delete - delete a set of projects (admin only)
///
/// Deletes run in parallel; ids that could not be deleted are reported back
/// instead of treating the whole batch as successful.
pub async fn bulk_delete_projects(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    if request.ids.is_empty() {
        return Err(ApiError::BulkOperationError(
            "No project ids provided".to_string(),
        ));
    }

    let deletions = request.ids.iter().map(|id| {
        let store = state.store.clone();
        let id = id.clone();
        async move {
            let outcome = store.delete(COLLECTION, &id).await;
            (id, outcome)
        }
    });

    let mut deleted = Vec::new();
    let mut failed = Vec::new();
    for (id, outcome) in join_all(deletions).await {
        match outcome {
            Ok(()) => deleted.push(id),
            Err(e) => {
                warn!(project_id = %id, error = %e, "Bulk delete failed for project");
                failed.push(id);
            }
        }
    }

    info!(
        admin_id = %authed.id,
        deleted_count = deleted.len(),
        failed_count = failed.len(),
        "Bulk project delete completed"
    );

    Ok(Json(BulkDeleteResponse { deleted, failed }))
}
