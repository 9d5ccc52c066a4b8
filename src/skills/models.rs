// src/skills/models.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub icon: Option<String>,
    pub level: i64,
    #[serde(default)]
    pub order: i64,
}

/// Full-form submit payload, shared by create and update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillForm {
    pub name: String,
    pub category: String,
    pub icon: Option<String>,
    pub level: i64,
}
