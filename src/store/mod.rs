// src/store/mod.rs
//! Schemaless document store over SQLite
//!
//! All persisted state is addressed by collection name + document id and
//! stored as a JSON blob, queried with single-field ordering and equality
//! filters via json_extract. Consistency is last-write-wins per document;
//! there are no cross-document transactions.

use serde_json::Value;
use sqlx::SqlitePool;

use crate::common::id_generator::{generate_id, EntityPrefix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Single-field ordering for collection reads
#[derive(Debug, Clone, Copy)]
pub struct OrderBy {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// A stored document: its id plus the JSON field map (which also carries
/// the id under the "id" key)
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

impl Document {
    /// Deserialize the field map into a typed record
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.fields.clone())
    }
}

#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

// Field names are code constants; reject anything that could smuggle SQL
// into the json_extract path expression.
fn assert_plain_field(field: &str) {
    debug_assert!(
        field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
        "field name must be a plain identifier: {}",
        field
    );
}

impl DocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read every document in a collection, optionally ordered by one field
    /// and filtered by one field-equals-value predicate.
    pub async fn get_all(
        &self,
        collection: &str,
        order_by: Option<OrderBy>,
        where_equals: Option<(&str, &str)>,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let mut sql = String::from("SELECT id, fields FROM documents WHERE collection = ?");

        if let Some((field, _)) = where_equals {
            assert_plain_field(field);
            sql.push_str(&format!(" AND json_extract(fields, '$.{}') = ?", field));
        }

        if let Some(order) = order_by {
            assert_plain_field(order.field);
            let dir = match order.direction {
                SortDirection::Ascending => "ASC",
                SortDirection::Descending => "DESC",
            };
            sql.push_str(&format!(
                " ORDER BY json_extract(fields, '$.{}') {}",
                order.field, dir
            ));
        }

        let mut query = sqlx::query_as::<_, (String, String)>(&sql).bind(collection);
        if let Some((_, value)) = where_equals {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|(id, fields)| {
                let fields: Value =
                    serde_json::from_str(&fields).map_err(|e| sqlx::Error::Decode(e.into()))?;
                Ok(Document { id, fields })
            })
            .collect()
    }

    /// Read a single document by id
    pub async fn get_one(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, sqlx::Error> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT id, fields FROM documents WHERE collection = ? AND id = ?",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((id, fields)) => {
                let fields: Value =
                    serde_json::from_str(&fields).map_err(|e| sqlx::Error::Decode(e.into()))?;
                Ok(Some(Document { id, fields }))
            }
            None => Ok(None),
        }
    }

    /// Create a new document; generates a prefixed id, injects it into the
    /// stored fields, and returns it.
    pub async fn create(&self, collection: &str, mut fields: Value) -> Result<String, sqlx::Error> {
        let id = generate_id(EntityPrefix::for_collection(collection));

        let map = fields
            .as_object_mut()
            .ok_or_else(|| sqlx::Error::Decode("document fields must be a JSON object".into()))?;
        map.insert("id".to_string(), Value::String(id.clone()));

        let serialized =
            serde_json::to_string(&fields).map_err(|e| sqlx::Error::Decode(e.into()))?;

        sqlx::query("INSERT INTO documents (collection, id, fields) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(&id)
            .bind(&serialized)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    /// Replace a document's fields wholesale (last write wins)
    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        mut fields: Value,
    ) -> Result<(), sqlx::Error> {
        let map = fields
            .as_object_mut()
            .ok_or_else(|| sqlx::Error::Decode("document fields must be a JSON object".into()))?;
        map.insert("id".to_string(), Value::String(id.to_string()));

        let serialized =
            serde_json::to_string(&fields).map_err(|e| sqlx::Error::Decode(e.into()))?;

        let result =
            sqlx::query("UPDATE documents SET fields = ? WHERE collection = ? AND id = ?")
                .bind(&serialized)
                .bind(collection)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    /// Create or replace a document at a fixed id (singleton documents)
    pub async fn upsert(
        &self,
        collection: &str,
        id: &str,
        mut fields: Value,
    ) -> Result<(), sqlx::Error> {
        let map = fields
            .as_object_mut()
            .ok_or_else(|| sqlx::Error::Decode("document fields must be a JSON object".into()))?;
        map.insert("id".to_string(), Value::String(id.to_string()));

        let serialized =
            serde_json::to_string(&fields).map_err(|e| sqlx::Error::Decode(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, fields) VALUES (?, ?, ?)
            ON CONFLICT (collection, id) DO UPDATE SET fields = excluded.fields
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(&serialized)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a document by id
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    /// Number of documents in a collection (used to stamp list positions
    /// on create)
    pub async fn count(&self, collection: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = ?")
            .bind(collection)
            .fetch_one(&self.pool)
            .await
    }
}

/// Current server time in RFC 3339, stamped onto createdAt/updatedAt at
/// write time
pub fn server_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
