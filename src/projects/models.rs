// src/projects/models.rs

use serde::{Deserialize, Serialize};

use crate::links::{reconcile_on_load, Link};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Published,
}

/// Project as exposed over the wire: the links list is always present and
/// coherent with the legacy scalar fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub category: String,
    pub tech_stack: Vec<String>,
    pub status: ProjectStatus,
    pub featured: bool,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub links: Vec<Link>,
    pub github_url: String,
    pub demo_url: String,
    pub created_at: String,
    pub updated_at: String,
    pub order: i64,
}

/// Project as it may exist in the store, including legacy records written
/// before the generalized links list existed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProject {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub long_description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub featured: bool,
    pub image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub links: Option<Vec<Link>>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub order: i64,
}

impl StoredProject {
    /// Reconcile the stored representation into the wire shape, synthesizing
    /// the links list from legacy scalars when needed.
    pub fn into_project(self) -> Project {
        let links = reconcile_on_load(
            self.links,
            self.github_url.as_deref(),
            self.demo_url.as_deref(),
        );
        Project {
            id: self.id,
            title: self.title,
            description: self.description,
            long_description: self.long_description,
            category: self.category,
            tech_stack: self.tech_stack,
            status: self.status,
            featured: self.featured,
            image_url: self.image_url,
            images: self.images,
            links,
            github_url: self.github_url.unwrap_or_default(),
            demo_url: self.demo_url.unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            order: self.order,
        }
    }
}

/// Full-form submit payload, shared by create and update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub long_description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub featured: bool,
    pub image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

/// Bulk deletes can partially fail; both outcomes are reported so callers
/// only prune the ids that actually went away.
#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}
