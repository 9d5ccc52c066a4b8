// src/images/guard.rs
//! Upload size/type guard
//!
//! Runs before any decode work so oversized or non-image payloads are
//! rejected cheaply. Checks the declared content type, the byte ceiling,
//! and the sniffed magic bytes, in that order.

use crate::common::ApiError;

/// Guard configuration: a byte ceiling and the accepted MIME prefix
#[derive(Debug, Clone, Copy)]
pub struct GuardConfig {
    pub max_bytes: usize,
    pub accepted_prefix: &'static str,
}

impl GuardConfig {
    pub fn image(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            accepted_prefix: "image/",
        }
    }
}

/// Accept or reject a candidate upload. No side effects; the data is never
/// mutated.
pub fn check_upload(
    data: &[u8],
    declared_content_type: Option<&str>,
    config: &GuardConfig,
) -> Result<(), ApiError> {
    if let Some(declared) = declared_content_type {
        if !declared.starts_with(config.accepted_prefix) {
            return Err(ApiError::ValidationError(format!(
                "Unsupported file type '{}'. Only images are accepted",
                declared
            )));
        }
    }

    if data.len() > config.max_bytes {
        return Err(ApiError::ValidationError(format!(
            "File size exceeds the {} MB limit",
            config.max_bytes / (1024 * 1024)
        )));
    }

    // Trust magic bytes over the declared type
    let sniffed = infer::Infer::new().get(data);
    match sniffed {
        Some(info) if info.mime_type().starts_with(config.accepted_prefix) => Ok(()),
        _ => Err(ApiError::ValidationError(
            "File content is not a recognized image format".to_string(),
        )),
    }
}
