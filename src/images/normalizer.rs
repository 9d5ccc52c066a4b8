// src/images/normalizer.rs
//! Image decoder/normalizer
//!
//! Decodes an accepted upload, downscales it to a bounded resolution while
//! preserving aspect ratio, and re-encodes it as a base64 JPEG data URL
//! suitable for inline storage in a document field. Output is always JPEG
//! regardless of the source format, and never upscaled.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
}

/// Which dimension drives the downscale decision.
///
/// Gallery and profile photos only scale when the width exceeds the bound;
/// certificate/skill images scale whichever edge exceeds it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePriority {
    Width,
    LongestEdge,
}

#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    pub max_dimension: u32,
    /// JPEG quality, 0-100
    pub quality: u8,
    pub priority: ScalePriority,
}

/// A complete, independently decodable encoded image payload
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data_url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// True when decoding failed and the payload is the original bytes,
    /// base64-encoded without downscaling
    pub fallback: bool,
}

/// Call-site families of the pipeline, each with its own resolution bound,
/// quality factor, scale mode, and byte ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePreset {
    ProjectGallery,
    ProfilePhoto,
    CertificateBadge,
    SkillIcon,
}

impl ImagePreset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "project" => Some(ImagePreset::ProjectGallery),
            "profile" => Some(ImagePreset::ProfilePhoto),
            "certificate" => Some(ImagePreset::CertificateBadge),
            "skill" => Some(ImagePreset::SkillIcon),
            _ => None,
        }
    }

    pub fn max_bytes(&self) -> usize {
        match self {
            ImagePreset::ProjectGallery | ImagePreset::ProfilePhoto => 5 * 1024 * 1024,
            ImagePreset::CertificateBadge | ImagePreset::SkillIcon => 2 * 1024 * 1024,
        }
    }

    pub fn options(&self) -> NormalizeOptions {
        match self {
            ImagePreset::ProjectGallery => NormalizeOptions {
                max_dimension: 800,
                quality: 70,
                priority: ScalePriority::Width,
            },
            ImagePreset::ProfilePhoto => NormalizeOptions {
                max_dimension: 600,
                quality: 80,
                priority: ScalePriority::Width,
            },
            ImagePreset::CertificateBadge | ImagePreset::SkillIcon => NormalizeOptions {
                max_dimension: 800,
                quality: 60,
                priority: ScalePriority::LongestEdge,
            },
        }
    }
}

/// Compute the bounded target resolution, preserving aspect ratio.
/// Never upscales.
fn target_dimensions(width: u32, height: u32, opts: &NormalizeOptions) -> (u32, u32) {
    if width > opts.max_dimension {
        let scale = opts.max_dimension as f64 / width as f64;
        let scaled_height = ((height as f64 * scale).round() as u32).max(1);
        return (opts.max_dimension, scaled_height);
    }

    if opts.priority == ScalePriority::LongestEdge && height > opts.max_dimension {
        let scale = opts.max_dimension as f64 / height as f64;
        let scaled_width = ((width as f64 * scale).round() as u32).max(1);
        return (scaled_width, opts.max_dimension);
    }

    (width, height)
}

/// Decode, downscale, and re-encode as a JPEG data URL
pub fn normalize(data: &[u8], opts: &NormalizeOptions) -> Result<EncodedImage, NormalizeError> {
    let decoded = image::load_from_memory(data).map_err(NormalizeError::Decode)?;

    let (width, height) = (decoded.width(), decoded.height());
    let (target_width, target_height) = target_dimensions(width, height, opts);

    let scaled = if (target_width, target_height) == (width, height) {
        decoded
    } else {
        decoded.resize_exact(target_width, target_height, FilterType::Triangle)
    };

    // JPEG has no alpha channel; flatten before encoding
    let rgb = scaled.to_rgb8();

    let mut jpeg_bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg_bytes, opts.quality);
    rgb.write_with_encoder(encoder)
        .map_err(NormalizeError::Encode)?;

    Ok(EncodedImage {
        data_url: format!("data:image/jpeg;base64,{}", BASE64.encode(&jpeg_bytes)),
        width: Some(target_width),
        height: Some(target_height),
        fallback: false,
    })
}

/// Normalize, falling back to the original bytes when the pipeline fails.
///
/// The fallback payload is the untouched input, base64-encoded under its
/// sniffed MIME type, so a failed decode never blocks the caller's workflow
/// and never yields an empty result.
pub fn normalize_or_original(data: &[u8], opts: &NormalizeOptions) -> EncodedImage {
    match normalize(data, opts) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!(error = %e, "Image normalization failed, falling back to original bytes");
            let mime = infer::Infer::new()
                .get(data)
                .map(|info| info.mime_type())
                .unwrap_or("application/octet-stream");
            EncodedImage {
                data_url: format!("data:{};base64,{}", mime, BASE64.encode(data)),
                width: None,
                height: None,
                fallback: true,
            }
        }
    }
}
