// src/messages/handlers.rs

use axum::extract::{Extension, Json, Path};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::{Message, MessageForm, MessageSubmitResponse, ReadFlagUpdate};
use super::validators::MessageValidator;
use crate::auth::AuthedUser;
use crate::common::{safe_email_log, ApiError, AppState, Validator};
use crate::store::{server_timestamp, Document, OrderBy};

const COLLECTION: &str = "messages";

fn parse_message(doc: Document) -> Result<Message, ApiError> {
    doc.parse()
        .map_err(|e| ApiError::InternalServer(format!("corrupt message record: {}", e)))
}

fn require_admin(authed: &AuthedUser) -> Result<(), ApiError> {
    if authed.is_admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".to_string()))
    }
}

/// POST /api/contact - submit a contact message (public)
pub async fn submit_message(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(form): Json<MessageForm>,
) -> Result<Json<MessageSubmitResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = MessageValidator.validate(&form);
    if !validation.is_valid {
        warn!(errors = ?validation.errors, "Contact form validation failed");
        return Err(ApiError::from(validation));
    }

    let message_id = state
        .store
        .create(
            COLLECTION,
            json!({
                "name": form.name.trim(),
                "email": form.email.trim(),
                "subject": form.subject.trim(),
                "message": form.message,
                "read": false,
                "createdAt": server_timestamp(),
            }),
        )
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        message_id = %message_id,
        from_email = %safe_email_log(form.email.trim()),
        "Contact message received"
    );

    Ok(Json(MessageSubmitResponse {
        success: true,
        message: "Thank you for your message! I'll get back to you soon.".to_string(),
    }))
}

/// GET /api/admin/messages - newest first (admin only)
pub async fn get_messages(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<Message>>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let docs = state
        .store
        .get_all(COLLECTION, Some(OrderBy::desc("createdAt")), None)
        .await
        .map_err(ApiError::DatabaseError)?;

    docs.into_iter()
        .map(parse_message)
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// PUT /api/admin/messages/:id/read - flip the read flag (admin only)
pub async fn set_read_flag(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(message_id): Path<String>,
    Json(update): Json<ReadFlagUpdate>,
) -> Result<Json<Message>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    let doc = state
        .store
        .get_one(COLLECTION, &message_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Message {} not found", message_id)))?;

    let mut fields = doc.fields;
    fields["read"] = json!(update.read);

    state
        .store
        .update(COLLECTION, &message_id, fields)
        .await
        .map_err(ApiError::DatabaseError)?;

    let doc = state
        .store
        .get_one(COLLECTION, &message_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Message {} not found", message_id)))?;

    info!(
        admin_id = %authed.id,
        message_id = %message_id,
        read = update.read,
        "Message read flag updated"
    );

    Ok(Json(parse_message(doc)?))
}

/// DELETE /api/admin/messages/:id (admin only)
pub async fn delete_message(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(message_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&authed)?;
    let state = state_lock.read().await.clone();

    state
        .store
        .delete(COLLECTION, &message_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                ApiError::NotFound(format!("Message {} not found", message_id))
            }
            e => ApiError::DatabaseError(e),
        })?;

    info!(
        admin_id = %authed.id,
        message_id = %message_id,
        "Message deleted"
    );

    Ok(Json(json!({ "message": "Message deleted" })))
}
