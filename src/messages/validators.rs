// src/messages/validators.rs

use regex::Regex;
use std::sync::OnceLock;

use super::models::MessageForm;
use crate::common::{ValidationResult, Validator};

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

pub struct MessageValidator;

impl Validator<MessageForm> for MessageValidator {
    fn validate(&self, data: &MessageForm) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.trim().is_empty() {
            result.add_error("name", "Name is required");
        } else if data.name.len() > 255 {
            result.add_error("name", "Name must be less than 255 characters");
        }

        if data.email.trim().is_empty() {
            result.add_error("email", "Email is required");
        } else if !email_pattern().is_match(data.email.trim()) {
            result.add_error("email", "Email format is invalid");
        }

        if data.subject.trim().is_empty() {
            result.add_error("subject", "Subject is required");
        } else if data.subject.len() > 255 {
            result.add_error("subject", "Subject must be less than 255 characters");
        }

        if data.message.trim().is_empty() {
            result.add_error("message", "Message is required");
        } else if data.message.len() > 10000 {
            result.add_error("message", "Message exceeds maximum length of 10000 characters");
        }

        result
    }
}
