// src/projects/validators.rs

use super::models::ProjectForm;
use crate::common::{ValidationResult, Validator};

pub struct ProjectValidator;

impl Validator<ProjectForm> for ProjectValidator {
    fn validate(&self, data: &ProjectForm) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.title.trim().is_empty() {
            result.add_error("title", "Title is required");
        } else if data.title.len() > 255 {
            result.add_error("title", "Title must be less than 255 characters");
        }

        if data.category.trim().is_empty() {
            result.add_error("category", "Category is required");
        } else if data.category.len() > 100 {
            result.add_error("category", "Category must be less than 100 characters");
        }

        if data.description.len() > 2000 {
            result.add_error(
                "description",
                "Description must be less than 2000 characters",
            );
        }

        if let Some(long_description) = &data.long_description {
            if long_description.len() > 20000 {
                result.add_error(
                    "longDescription",
                    "Long description must be less than 20000 characters",
                );
            }
        }

        if data.tech_stack.iter().any(|t| t.trim().is_empty()) {
            result.add_error("techStack", "Tech stack entries cannot be empty");
        }

        result
    }
}
