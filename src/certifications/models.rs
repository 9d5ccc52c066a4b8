// src/certifications/models.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    /// Inline data URL produced by the image pipeline
    pub image_url: String,
    pub credential_url: Option<String>,
    pub issue_date: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Full-form submit payload, shared by create and update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationForm {
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub image_url: String,
    pub credential_url: Option<String>,
    pub issue_date: Option<String>,
}
