//! Authentication handlers

use axum::extract::{Extension, Json};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::extractors::AuthedUser;
use super::models::{Claims, LoginRequest, LoginResponse, PublicUser, User};
use crate::common::{safe_email_log, ApiError, AppState};

/// POST /api/auth/login - email/password sign-in, issues a bearer token
pub async fn login_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let matches = state
        .store
        .get_all("users", None, Some(("email", email.as_str())))
        .await
        .map_err(ApiError::DatabaseError)?;

    let user: User = match matches.first().map(|d| d.parse()) {
        Some(Ok(user)) => user,
        Some(Err(e)) => {
            return Err(ApiError::InternalServer(format!(
                "corrupt user record: {}",
                e
            )))
        }
        None => {
            warn!(email = %safe_email_log(&email), "Login failed: unknown email");
            return Err(ApiError::Unauthorized("invalid credentials".to_string()));
        }
    };

    let verified = bcrypt::verify(&payload.password, &user.password_hash)
        .map_err(|_| ApiError::InternalServer("password verification failed".to_string()))?;
    if !verified {
        warn!(
            user_id = %user.id,
            email = %safe_email_log(&email),
            "Login failed: wrong password"
        );
        return Err(ApiError::Unauthorized("invalid credentials".to_string()));
    }

    let claims = Claims {
        sub: user.id.clone(),
        exp: (Utc::now() + Duration::hours(24)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|_| ApiError::InternalServer("failed to sign token".to_string()))?;

    let is_admin = state.admin_emails.contains(&user.email.to_lowercase());

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        is_admin = is_admin,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
            is_admin,
        },
    }))
}

/// GET /api/auth/me - current user, 401 when the token is absent/invalid
pub async fn me_handler(authed: AuthedUser) -> Result<Json<PublicUser>, ApiError> {
    Ok(Json(PublicUser {
        id: authed.id,
        email: authed.email,
        is_admin: authed.is_admin,
    }))
}

/// POST /api/auth/logout - stateless acknowledgement; clients drop the token
pub async fn logout_handler(authed: AuthedUser) -> Result<Json<serde_json::Value>, ApiError> {
    info!(user_id = %authed.id, "User logged out");
    Ok(Json(json!({ "message": "Logged out" })))
}
