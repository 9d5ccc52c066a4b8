// src/certifications/handlers.rs

use axum::extract::{Extension, Json, Path};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::{Certification, CertificationForm};
use super::validators::CertificationValidator;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, Validator};
use crate::store::{server_timestamp, Document, OrderBy};

const COLLECTION: &str = "certifications";

fn parse_certification(doc: Document) -> Result<Certification, ApiError> {
    doc.parse()
        .map_err(|e| ApiError::InternalServer(format!("corrupt certification record: {}", e)))
}

fn require_admin(authed: &AuthedUser) -> Result<(), ApiError> {
    if authed.is_admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".to_string()))
    }
}

/// GET /api/certifications - all certifications in list order (public)
pub async fn get_certifications(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<Certification>>, ApiError> {
    let state = state_lock.read().await.clone();

    let docs = state
        .store
        .get_all(COLLECTION, Some(OrderBy::asc("order")), None)
        .await
        .map_err(ApiError::DatabaseError)?;

    docs.into_iter()
        .map(parse_certification)
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// POST /api/admin/certifications - create a certification (admin only)
pub async fn create_certification(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(form): Json<CertificationForm>,
) -> Result<Json<Certification>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let validation = CertificationValidator.validate(&form);
    if !validation.is_valid {
        warn!(
            admin_id = %authed.id,
            errors = ?validation.errors,
            "Certification creation validation failed"
        );
        return Err(ApiError::from(validation));
    }

    let order = state
        .store
        .count(COLLECTION)
        .await
        .map_err(ApiError::DatabaseError)?;
    let now = server_timestamp();

    let certification_id = state
        .store
        .create(
            COLLECTION,
            json!({
                "name": form.name,
                "issuer": form.issuer,
                "imageUrl": form.image_url,
                "credentialUrl": form.credential_url,
                "issueDate": form.issue_date,
                "order": order,
                "createdAt": now,
                "updatedAt": now,
            }),
        )
        .await
        .map_err(ApiError::DatabaseError)?;

    let doc = state
        .store
        .get_one(COLLECTION, &certification_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::InternalServer("created certification vanished".to_string()))?;

    info!(
        admin_id = %authed.id,
        certification_id = %certification_id,
        "Certification created"
    );

    Ok(Json(parse_certification(doc)?))
}

/// PUT /api/admin/certifications/:id - update a certification (admin only)
pub async fn update_certification(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(certification_id): Path<String>,
    Json(form): Json<CertificationForm>,
) -> Result<Json<Certification>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let validation = CertificationValidator.validate(&form);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let existing = state
        .store
        .get_one(COLLECTION, &certification_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Certification {} not found", certification_id))
        })?;
    let existing = parse_certification(existing)?;

    state
        .store
        .update(
            COLLECTION,
            &certification_id,
            json!({
                "name": form.name,
                "issuer": form.issuer,
                "imageUrl": form.image_url,
                "credentialUrl": form.credential_url,
                "issueDate": form.issue_date,
                "order": existing.order,
                "createdAt": existing.created_at,
                "updatedAt": server_timestamp(),
            }),
        )
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                ApiError::NotFound(format!("Certification {} not found", certification_id))
            }
            e => ApiError::DatabaseError(e),
        })?;

    let doc = state
        .store
        .get_one(COLLECTION, &certification_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Certification {} not found", certification_id))
        })?;

    info!(
        admin_id = %authed.id,
        certification_id = %certification_id,
        "Certification updated"
    );

    Ok(Json(parse_certification(doc)?))
}

/// DELETE /api/admin/certifications/:id - delete a certification (admin only)
pub async fn delete_certification(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(certification_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    state
        .store
        .delete(COLLECTION, &certification_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                ApiError::NotFound(format!("Certification {} not found", certification_id))
            }
            e => ApiError::DatabaseError(e),
        })?;

    info!(
        admin_id = %authed.id,
        certification_id = %certification_id,
        "Certification deleted"
    );

    Ok(Json(json!({ "message": "Certification deleted" })))
}
