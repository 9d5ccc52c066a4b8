// src/skills/validators.rs

use super::models::SkillForm;
use crate::common::{ValidationResult, Validator};

pub struct SkillValidator;

impl Validator<SkillForm> for SkillValidator {
    fn validate(&self, data: &SkillForm) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.trim().is_empty() {
            result.add_error("name", "Skill name is required");
        } else if data.name.len() > 100 {
            result.add_error("name", "Skill name must be less than 100 characters");
        }

        if data.category.trim().is_empty() {
            result.add_error("category", "Category is required");
        }

        if !(0..=100).contains(&data.level) {
            result.add_error("level", "Level must be between 0 and 100");
        }

        result
    }
}
