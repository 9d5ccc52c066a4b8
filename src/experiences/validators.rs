// src/experiences/validators.rs

use super::models::ExperienceForm;
use crate::common::{ValidationResult, Validator};

pub struct ExperienceValidator;

impl Validator<ExperienceForm> for ExperienceValidator {
    fn validate(&self, data: &ExperienceForm) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.position.trim().is_empty() {
            result.add_error("position", "Position is required");
        } else if data.position.len() > 255 {
            result.add_error("position", "Position must be less than 255 characters");
        }

        if data.company.trim().is_empty() {
            result.add_error("company", "Company name is required");
        } else if data.company.len() > 255 {
            result.add_error("company", "Company name must be less than 255 characters");
        }

        // Dates are display strings ("Jan 2024", "Present"), only presence
        // of a start is enforced
        if data.start_date.trim().is_empty() {
            result.add_error("startDate", "Start date is required");
        }

        if data.description.len() > 2000 {
            result.add_error(
                "description",
                "Description must be less than 2000 characters",
            );
        }

        if data.skills.iter().any(|s| s.trim().is_empty()) {
            result.add_error("skills", "Skill entries cannot be empty");
        }

        result
    }
}
