// src/settings/validators.rs

use super::models::ProfileSettingsForm;
use crate::common::{ValidationResult, Validator};

pub struct ProfileSettingsValidator;

impl Validator<ProfileSettingsForm> for ProfileSettingsValidator {
    fn validate(&self, data: &ProfileSettingsForm) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.display_name.trim().is_empty() {
            result.add_error("displayName", "Display name is required");
        } else if data.display_name.len() > 255 {
            result.add_error("displayName", "Display name must be less than 255 characters");
        }

        if data.title.trim().is_empty() {
            result.add_error("title", "Title is required");
        } else if data.title.len() > 255 {
            result.add_error("title", "Title must be less than 255 characters");
        }

        if data.bio.len() > 5000 {
            result.add_error("bio", "Bio must be less than 5000 characters");
        }
        if data.bio_extended.len() > 5000 {
            result.add_error("bioExtended", "Extended bio must be less than 5000 characters");
        }

        result
    }
}
