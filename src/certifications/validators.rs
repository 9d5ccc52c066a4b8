// src/certifications/validators.rs

use chrono::NaiveDate;

use super::models::CertificationForm;
use crate::common::{ValidationResult, Validator};

pub struct CertificationValidator;

impl Validator<CertificationForm> for CertificationValidator {
    fn validate(&self, data: &CertificationForm) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.trim().is_empty() {
            result.add_error("name", "Certification name is required");
        } else if data.name.len() > 255 {
            result.add_error("name", "Certification name must be less than 255 characters");
        }

        if data.issuer.trim().is_empty() {
            result.add_error("issuer", "Issuer is required");
        } else if data.issuer.len() > 255 {
            result.add_error("issuer", "Issuer must be less than 255 characters");
        }

        if let Some(issue_date) = &data.issue_date {
            if !issue_date.is_empty()
                && NaiveDate::parse_from_str(issue_date, "%Y-%m-%d").is_err()
            {
                result.add_error("issueDate", "Issue date must be in YYYY-MM-DD format");
            }
        }

        result
    }
}
