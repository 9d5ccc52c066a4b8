// src/common/migrations.rs
//! Database schema management and admin-user seeding

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

use crate::store::DocumentStore;

/// Create the document store schema.
///
/// All application data lives in a single schemaless table addressed by
/// (collection, id); record shape is enforced at the write boundary by the
/// per-module validators, not by the database.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            fields TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents (collection)",
    )
    .execute(pool)
    .await?;

    info!("Database migration completed");

    Ok(())
}

/// Seed the admin user from ADMIN_EMAIL / ADMIN_PASSWORD.
///
/// Create-if-absent: module initialization can run more than once (restarts,
/// test harnesses), so an existing user is left untouched.
pub async fn seed_admin_user(pool: &SqlitePool) -> anyhow::Result<()> {
    let email = match env::var("ADMIN_EMAIL") {
        Ok(e) if !e.trim().is_empty() => e.trim().to_lowercase(),
        _ => {
            warn!("ADMIN_EMAIL not set, skipping admin user seed");
            return Ok(());
        }
    };
    let password = match env::var("ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ => {
            warn!("ADMIN_PASSWORD not set, skipping admin user seed");
            return Ok(());
        }
    };

    let store = DocumentStore::new(pool.clone());

    let existing = store.get_all("users", None, Some(("email", email.as_str()))).await?;
    if !existing.is_empty() {
        info!(email = %crate::common::safe_email_log(&email), "Admin user already seeded");
        return Ok(());
    }

    let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;
    let now = chrono::Utc::now().to_rfc3339();

    let user_id = store
        .create(
            "users",
            serde_json::json!({
                "email": email,
                "passwordHash": password_hash,
                "createdAt": now,
            }),
        )
        .await?;

    info!(
        user_id = %user_id,
        email = %crate::common::safe_email_log(&email),
        "Admin user seeded"
    );

    Ok(())
}
