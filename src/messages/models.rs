// src/messages/models.rs

use serde::{Deserialize, Serialize};

/// A contact form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ReadFlagUpdate {
    pub read: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageSubmitResponse {
    pub success: bool,
    pub message: String,
}
