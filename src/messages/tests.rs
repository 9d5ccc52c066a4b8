//! Tests for the messages module

#[cfg(test)]
mod tests {
    use axum::extract::{Extension, Json, Path};
    use sqlx::sqlite::SqlitePoolOptions;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use super::super::handlers;
    use super::super::models::{MessageForm, ReadFlagUpdate};
    use super::super::validators::MessageValidator;
    use crate::auth::AuthedUser;
    use crate::common::{ApiError, AppState, Validator};

    async fn test_state() -> Arc<RwLock<AppState>> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        crate::common::migrations::run_migrations(&pool)
            .await
            .expect("migrations");
        let mut admins = HashSet::new();
        admins.insert("admin@example.com".to_string());
        Arc::new(RwLock::new(AppState::new(
            pool,
            "test-secret".to_string(),
            admins,
        )))
    }

    fn admin() -> AuthedUser {
        AuthedUser {
            id: "U_TEST01".to_string(),
            email: "admin@example.com".to_string(),
            is_admin: true,
        }
    }

    fn non_admin() -> AuthedUser {
        AuthedUser {
            id: "U_TEST02".to_string(),
            email: "viewer@example.com".to_string(),
            is_admin: false,
        }
    }

    fn form(subject: &str) -> MessageForm {
        MessageForm {
            name: "Visitor".to_string(),
            email: "visitor@example.com".to_string(),
            subject: subject.to_string(),
            message: "Hello there".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_stores_unread_message() {
        let state = test_state().await;

        let Json(response) =
            handlers::submit_message(Extension(state.clone()), Json(form("Hi")))
                .await
                .unwrap();
        assert!(response.success);

        let Json(listed) = handlers::get_messages(Extension(state.clone()), admin())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].subject, "Hi");
        assert!(!listed[0].read);
        assert!(!listed[0].created_at.is_empty());
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let state = test_state().await;

        let Json(first) = handlers::submit_message(Extension(state.clone()), Json(form("First")))
            .await
            .unwrap();
        assert!(first.success);
        // Distinct timestamps for a deterministic ordering
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let _ = handlers::submit_message(Extension(state.clone()), Json(form("Second")))
            .await
            .unwrap();

        let Json(listed) = handlers::get_messages(Extension(state.clone()), admin())
            .await
            .unwrap();
        assert_eq!(listed[0].subject, "Second");
        assert_eq!(listed[1].subject, "First");
    }

    #[tokio::test]
    async fn test_read_flag_round_trip() {
        let state = test_state().await;

        let _ = handlers::submit_message(Extension(state.clone()), Json(form("Hi")))
            .await
            .unwrap();
        let Json(listed) = handlers::get_messages(Extension(state.clone()), admin())
            .await
            .unwrap();
        let id = listed[0].id.clone();

        let Json(marked) = handlers::set_read_flag(
            Extension(state.clone()),
            admin(),
            Path(id.clone()),
            Json(ReadFlagUpdate { read: true }),
        )
        .await
        .unwrap();
        assert!(marked.read);
        assert_eq!(marked.subject, "Hi");

        let Json(unmarked) = handlers::set_read_flag(
            Extension(state.clone()),
            admin(),
            Path(id),
            Json(ReadFlagUpdate { read: false }),
        )
        .await
        .unwrap();
        assert!(!unmarked.read);
    }

    #[tokio::test]
    async fn test_delete_and_missing() {
        let state = test_state().await;

        let _ = handlers::submit_message(Extension(state.clone()), Json(form("Hi")))
            .await
            .unwrap();
        let Json(listed) = handlers::get_messages(Extension(state.clone()), admin())
            .await
            .unwrap();

        let Json(ack) =
            handlers::delete_message(Extension(state.clone()), admin(), Path(listed[0].id.clone()))
                .await
                .unwrap();
        assert_eq!(ack["message"], "Message deleted");

        let err = handlers::delete_message(
            Extension(state.clone()),
            admin(),
            Path("M_MISSING".to_string()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_admin_listing_rejects_non_admin() {
        let state = test_state().await;

        let err = handlers::get_messages(Extension(state.clone()), non_admin())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_validator_rejects_malformed_email() {
        let mut bad = form("Hi");
        bad.email = "not-an-email".to_string();
        let result = MessageValidator.validate(&bad);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "email"));

        bad.email = "a@b".to_string();
        assert!(!MessageValidator.validate(&bad).is_valid);

        bad.email = "a@b.co".to_string();
        assert!(MessageValidator.validate(&bad).is_valid);
    }

    #[test]
    fn test_validator_requires_all_fields() {
        let empty = MessageForm {
            name: String::new(),
            email: String::new(),
            subject: String::new(),
            message: "  ".to_string(),
        };
        let result = MessageValidator.validate(&empty);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"subject"));
        assert!(fields.contains(&"message"));
    }
}
