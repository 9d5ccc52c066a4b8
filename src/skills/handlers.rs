// src/skills/handlers.rs

use axum::extract::{Extension, Json, Path};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::{Skill, SkillForm};
use super::validators::SkillValidator;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, Validator};
use crate::store::{Document, OrderBy};

const COLLECTION: &str = "skills";

fn parse_skill(doc: Document) -> Result<Skill, ApiError> {
    doc.parse()
        .map_err(|e| ApiError::InternalServer(format!("corrupt skill record: {}", e)))
}

fn require_admin(authed: &AuthedUser) -> Result<(), ApiError> {
    if authed.is_admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".to_string()))
    }
}

/// Case-insensitive duplicate-name check, run before any write
async fn reject_duplicate_name(
    state: &AppState,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<(), ApiError> {
    let wanted = name.trim().to_lowercase();
    let docs = state
        .store
        .get_all(COLLECTION, None, None)
        .await
        .map_err(ApiError::DatabaseError)?;

    for doc in docs {
        if exclude_id == Some(doc.id.as_str()) {
            continue;
        }
        let skill = parse_skill(doc)?;
        if skill.name.trim().to_lowercase() == wanted {
            return Err(ApiError::ValidationError(format!(
                "A skill named '{}' already exists",
                skill.name
            )));
        }
    }

    Ok(())
}

/// GET /api/skills - all skills in list order (public)
pub async fn get_skills(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<Skill>>, ApiError> {
    let state = state_lock.read().await.clone();

    let docs = state
        .store
        .get_all(COLLECTION, Some(OrderBy::asc("order")), None)
        .await
        .map_err(ApiError::DatabaseError)?;

    docs.into_iter().map(parse_skill).collect::<Result<Vec<_>, _>>().map(Json)
}

/// POST /api/admin/skills - create a skill (admin only)
pub async fn create_skill(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(form): Json<SkillForm>,
) -> Result<Json<Skill>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let validation = SkillValidator.validate(&form);
    if !validation.is_valid {
        warn!(
            admin_id = %authed.id,
            errors = ?validation.errors,
            "Skill creation validation failed"
        );
        return Err(ApiError::from(validation));
    }

    reject_duplicate_name(&state, &form.name, None).await?;

    let order = state
        .store
        .count(COLLECTION)
        .await
        .map_err(ApiError::DatabaseError)?;

    let skill_id = state
        .store
        .create(
            COLLECTION,
            json!({
                "name": form.name,
                "category": form.category,
                "icon": form.icon,
                "level": form.level,
                "order": order,
            }),
        )
        .await
        .map_err(ApiError::DatabaseError)?;

    let doc = state
        .store
        .get_one(COLLECTION, &skill_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::InternalServer("created skill vanished".to_string()))?;

    info!(admin_id = %authed.id, skill_id = %skill_id, "Skill created");

    Ok(Json(parse_skill(doc)?))
}

/// PUT /api/admin/skills/:id - update a skill (admin only)
pub async fn update_skill(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(skill_id): Path<String>,
    Json(form): Json<SkillForm>,
) -> Result<Json<Skill>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let validation = SkillValidator.validate(&form);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let existing = state
        .store
        .get_one(COLLECTION, &skill_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Skill {} not found", skill_id)))?;
    let existing = parse_skill(existing)?;

    reject_duplicate_name(&state, &form.name, Some(&skill_id)).await?;

    state
        .store
        .update(
            COLLECTION,
            &skill_id,
            json!({
                "name": form.name,
                "category": form.category,
                "icon": form.icon,
                "level": form.level,
                "order": existing.order,
            }),
        )
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::NotFound(format!("Skill {} not found", skill_id)),
            e => ApiError::DatabaseError(e),
        })?;

    let doc = state
        .store
        .get_one(COLLECTION, &skill_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Skill {} not found", skill_id)))?;

    info!(admin_id = %authed.id, skill_id = %skill_id, "Skill updated");

    Ok(Json(parse_skill(doc)?))
}

/// DELETE /api/admin/skills/:id - delete a skill (admin only)
pub async fn delete_skill(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(skill_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    state
        .store
        .delete(COLLECTION, &skill_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::NotFound(format!("Skill {} not found", skill_id)),
            e => ApiError::DatabaseError(e),
        })?;

    info!(admin_id = %authed.id, skill_id = %skill_id, "Skill deleted");

    Ok(Json(json!({ "message": "Skill deleted" })))
}
