// Common validation types and traits
//
// Validators run before any store write; a failed result converts into a
// 400 ApiError and the handler returns without touching the database.

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_result_is_valid() {
        assert!(ValidationResult::new().is_valid);
        assert!(ValidationResult::default().errors.is_empty());
    }

    #[test]
    fn test_adding_an_error_invalidates() {
        let mut result = ValidationResult::new();
        result.add_error("level", "Level must be between 0 and 100");
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "level");
    }
}
