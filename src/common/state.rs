// Application state shared across all modules

use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::store::DocumentStore;

/// Application state: the document store (which owns the pool) and
/// configuration
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub jwt_secret: String,
    pub admin_emails: HashSet<String>,
}

impl AppState {
    pub fn new(db: SqlitePool, jwt_secret: String, admin_emails: HashSet<String>) -> Self {
        Self {
            store: DocumentStore::new(db),
            jwt_secret,
            admin_emails,
        }
    }
}
