// src/experiences/handlers.rs

use axum::extract::{Extension, Json, Path};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::{Experience, ExperienceForm};
use super::validators::ExperienceValidator;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, Validator};
use crate::store::{server_timestamp, Document, OrderBy};

const COLLECTION: &str = "experiences";

fn parse_experience(doc: Document) -> Result<Experience, ApiError> {
    doc.parse()
        .map_err(|e| ApiError::InternalServer(format!("corrupt experience record: {}", e)))
}

fn require_admin(authed: &AuthedUser) -> Result<(), ApiError> {
    if authed.is_admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".to_string()))
    }
}

fn experience_fields(
    form: ExperienceForm,
    created_at: String,
    updated_at: String,
    order: i64,
) -> serde_json::Value {
    json!({
        "position": form.position,
        "type": form.experience_type,
        "company": form.company,
        "startDate": form.start_date,
        "endDate": form.end_date,
        "location": form.location,
        "description": form.description,
        "skills": form.skills,
        "order": order,
        "createdAt": created_at,
        "updatedAt": updated_at,
    })
}

/// GET /api/experiences - all experiences in list order (public)
pub async fn get_experiences(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<Experience>>, ApiError> {
    let state = state_lock.read().await.clone();

    let docs = state
        .store
        .get_all(COLLECTION, Some(OrderBy::asc("order")), None)
        .await
        .map_err(ApiError::DatabaseError)?;

    docs.into_iter()
        .map(parse_experience)
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// POST /api/admin/experiences - create an experience (admin only)
pub async fn create_experience(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(form): Json<ExperienceForm>,
) -> Result<Json<Experience>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let validation = ExperienceValidator.validate(&form);
    if !validation.is_valid {
        warn!(
            admin_id = %authed.id,
            errors = ?validation.errors,
            "Experience creation validation failed"
        );
        return Err(ApiError::from(validation));
    }

    let order = state
        .store
        .count(COLLECTION)
        .await
        .map_err(ApiError::DatabaseError)?;
    let now = server_timestamp();

    let experience_id = state
        .store
        .create(COLLECTION, experience_fields(form, now.clone(), now, order))
        .await
        .map_err(ApiError::DatabaseError)?;

    let doc = state
        .store
        .get_one(COLLECTION, &experience_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::InternalServer("created experience vanished".to_string()))?;

    info!(
        admin_id = %authed.id,
        experience_id = %experience_id,
        "Experience created"
    );

    Ok(Json(parse_experience(doc)?))
}

/// PUT /api/admin/experiences/:id - update an experience (admin only)
pub async fn update_experience(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(experience_id): Path<String>,
    Json(form): Json<ExperienceForm>,
) -> Result<Json<Experience>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let validation = ExperienceValidator.validate(&form);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let existing = state
        .store
        .get_one(COLLECTION, &experience_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Experience {} not found", experience_id)))?;
    let existing = parse_experience(existing)?;

    state
        .store
        .update(
            COLLECTION,
            &experience_id,
            experience_fields(form, existing.created_at, server_timestamp(), existing.order),
        )
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                ApiError::NotFound(format!("Experience {} not found", experience_id))
            }
            e => ApiError::DatabaseError(e),
        })?;

    let doc = state
        .store
        .get_one(COLLECTION, &experience_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Experience {} not found", experience_id)))?;

    info!(
        admin_id = %authed.id,
        experience_id = %experience_id,
        "Experience updated"
    );

    Ok(Json(parse_experience(doc)?))
}

/// DELETE /api/admin/experiences/:id - delete an experience (admin only)
pub async fn delete_experience(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(experience_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    state
        .store
        .delete(COLLECTION, &experience_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                ApiError::NotFound(format!("Experience {} not found", experience_id))
            }
            e => ApiError::DatabaseError(e),
        })?;

    info!(
        admin_id = %authed.id,
        experience_id = %experience_id,
        "Experience deleted"
    );

    Ok(Json(json!({ "message": "Experience deleted" })))
}
