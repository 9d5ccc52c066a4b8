// src/settings/handlers.rs

use axum::extract::{Extension, Json};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::{ProfileSettings, ProfileSettingsForm};
use super::validators::ProfileSettingsValidator;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, Validator};
use crate::store::server_timestamp;

const COLLECTION: &str = "settings";
const PROFILE_DOC: &str = "profile";

fn require_admin(authed: &AuthedUser) -> Result<(), ApiError> {
    if authed.is_admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".to_string()))
    }
}

/// GET /api/profile - the site-wide profile (public)
pub async fn get_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<ProfileSettings>, ApiError> {
    let state = state_lock.read().await.clone();

    let doc = state
        .store
        .get_one(COLLECTION, PROFILE_DOC)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Profile not configured".to_string()))?;

    doc.parse()
        .map(Json)
        .map_err(|e| ApiError::InternalServer(format!("corrupt profile record: {}", e)))
}

/// PUT /api/admin/profile - replace the profile singleton (admin only)
pub async fn update_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(form): Json<ProfileSettingsForm>,
) -> Result<Json<ProfileSettings>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let validation = ProfileSettingsValidator.validate(&form);
    if !validation.is_valid {
        warn!(
            admin_id = %authed.id,
            errors = ?validation.errors,
            "Profile update validation failed"
        );
        return Err(ApiError::from(validation));
    }

    let fields = json!({
        "displayName": form.display_name,
        "title": form.title,
        "location": form.location,
        "bio": form.bio,
        "heroTagline": form.hero_tagline,
        "bioExtended": form.bio_extended,
        "bioPassion": form.bio_passion,
        "cvUrl": form.cv_url,
        "heroImage": form.hero_image,
        "aboutImage": form.about_image,
        "education": form.education,
        "socialLinks": form.social_links,
        "updatedAt": server_timestamp(),
    });

    state
        .store
        .upsert(COLLECTION, PROFILE_DOC, fields)
        .await
        .map_err(ApiError::DatabaseError)?;

    let doc = state
        .store
        .get_one(COLLECTION, PROFILE_DOC)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::InternalServer("profile upsert vanished".to_string()))?;

    info!(admin_id = %authed.id, "Profile settings updated");

    doc.parse()
        .map(Json)
        .map_err(|e| ApiError::InternalServer(format!("corrupt profile record: {}", e)))
}
