//! Tests for the image pipeline
//!
//! These verify the normalizer's downscale geometry, the no-upscaling
//! pass-through, the JPEG re-encode, and the original-bytes fallback.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::normalizer::{
    normalize, normalize_or_original, ImagePreset, NormalizeOptions, ScalePriority,
};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([120, 40, 200]),
    ));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn decode_data_url(data_url: &str) -> image::DynamicImage {
    let encoded = data_url
        .strip_prefix("data:image/jpeg;base64,")
        .expect("output must be a JPEG data URL");
    let bytes = BASE64.decode(encoded).expect("valid base64");
    image::load_from_memory(&bytes).expect("output must be independently decodable")
}

fn width_priority(max_dimension: u32, quality: u8) -> NormalizeOptions {
    NormalizeOptions {
        max_dimension,
        quality,
        priority: ScalePriority::Width,
    }
}

#[test]
fn test_width_priority_downscale_preserves_aspect_ratio() {
    let input = png_bytes(1600, 1200);
    let out = normalize(&input, &width_priority(800, 70)).unwrap();

    assert_eq!(out.width, Some(800));
    assert_eq!(out.height, Some(600)); // round(1200 * 800 / 1600)
    assert!(!out.fallback);

    let decoded = decode_data_url(&out.data_url);
    assert_eq!(decoded.width(), 800);
    assert_eq!(decoded.height(), 600);
}

#[test]
fn test_width_priority_ignores_tall_images() {
    // Width within bounds: width-priority mode leaves the geometry alone
    // even though the height exceeds the limit
    let input = png_bytes(400, 1000);
    let out = normalize(&input, &width_priority(800, 70)).unwrap();

    assert_eq!(out.width, Some(400));
    assert_eq!(out.height, Some(1000));
}

#[test]
fn test_longest_edge_scales_by_height() {
    let input = png_bytes(400, 1000);
    let opts = NormalizeOptions {
        max_dimension: 800,
        quality: 60,
        priority: ScalePriority::LongestEdge,
    };
    let out = normalize(&input, &opts).unwrap();

    assert_eq!(out.height, Some(800));
    assert_eq!(out.width, Some(320)); // round(400 * 800 / 1000)
}

#[test]
fn test_longest_edge_width_rule_takes_precedence() {
    let input = png_bytes(1000, 900);
    let opts = NormalizeOptions {
        max_dimension: 800,
        quality: 60,
        priority: ScalePriority::LongestEdge,
    };
    let out = normalize(&input, &opts).unwrap();

    assert_eq!(out.width, Some(800));
    assert_eq!(out.height, Some(720));
}

#[test]
fn test_pass_through_never_upscales() {
    let input = png_bytes(300, 200);
    let out = normalize(&input, &width_priority(800, 70)).unwrap();

    assert_eq!(out.width, Some(300));
    assert_eq!(out.height, Some(200));

    // Re-encoded as JPEG even at original size
    let decoded = decode_data_url(&out.data_url);
    assert_eq!(decoded.width(), 300);
}

#[test]
fn test_output_is_always_jpeg() {
    let input = png_bytes(50, 50);
    let out = normalize(&input, &width_priority(800, 70)).unwrap();
    assert!(out.data_url.starts_with("data:image/jpeg;base64,"));
}

#[test]
fn test_fallback_yields_original_bytes() {
    let garbage = b"definitely not an image".to_vec();
    let out = normalize_or_original(&garbage, &width_priority(800, 70));

    assert!(out.fallback);
    assert!(out.width.is_none());
    assert!(!out.data_url.is_empty());

    // The payload is the untouched input, base64-encoded
    let encoded = out.data_url.split(',').nth(1).unwrap();
    assert_eq!(BASE64.decode(encoded).unwrap(), garbage);
}

#[test]
fn test_normalize_or_original_passes_through_success() {
    let input = png_bytes(1600, 400);
    let out = normalize_or_original(&input, &width_priority(800, 70));
    assert!(!out.fallback);
    assert_eq!(out.width, Some(800));
    assert_eq!(out.height, Some(200));
}

#[test]
fn test_preset_parameters() {
    assert_eq!(
        ImagePreset::from_name("project"),
        Some(ImagePreset::ProjectGallery)
    );
    assert_eq!(ImagePreset::from_name("bogus"), None);

    let gallery = ImagePreset::ProjectGallery.options();
    assert_eq!(gallery.max_dimension, 800);
    assert_eq!(gallery.priority, ScalePriority::Width);
    assert_eq!(ImagePreset::ProjectGallery.max_bytes(), 5 * 1024 * 1024);

    let profile = ImagePreset::ProfilePhoto.options();
    assert_eq!(profile.max_dimension, 600);

    let badge = ImagePreset::CertificateBadge.options();
    assert_eq!(badge.priority, ScalePriority::LongestEdge);
    assert_eq!(ImagePreset::CertificateBadge.max_bytes(), 2 * 1024 * 1024);
}

mod upload_endpoint {
    use axum::extract::Extension;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::sync::RwLock;

    use crate::auth::models::Claims;
    use crate::common::AppState;
    use crate::images::images_routes;
    use crate::images::normalizer::ImagePreset;
    use crate::images::routes::MAX_REQUEST_BYTES;

    async fn serve_images_router() -> (std::net::SocketAddr, String) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        crate::common::migrations::run_migrations(&pool)
            .await
            .expect("migrations");

        let mut admins = HashSet::new();
        admins.insert("admin@example.com".to_string());
        let state = Arc::new(RwLock::new(AppState::new(
            pool,
            "test-secret".to_string(),
            admins,
        )));

        let user_id = state
            .read()
            .await
            .store
            .create(
                "users",
                json!({
                    "email": "admin@example.com",
                    "passwordHash": "unused",
                    "createdAt": "2024-01-01T00:00:00Z",
                }),
            )
            .await
            .expect("seed user");

        let token = encode(
            &Header::default(),
            &Claims {
                sub: user_id,
                exp: 9999999999,
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("sign token");

        let app = images_routes().layer(Extension(state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service())
                .await
                .expect("serve");
        });

        (addr, token)
    }

    fn multipart_body(boundary: &str, filename: &str, payload: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"preset\"\r\n\r\nproject\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        body
    }

    async fn post_upload(addr: std::net::SocketAddr, token: &str, body: &[u8]) -> (u16, String) {
        let boundary = "bXYZtestboundary";
        let mut stream = tokio::net::TcpStream::connect(addr)
            .await
            .expect("connect server");
        let head = format!(
            "POST /api/admin/images HTTP/1.1\r\nHost: {addr}\r\n\
             Authorization: Bearer {token}\r\n\
             Content-Type: multipart/form-data; boundary={boundary}\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).await.expect("write head");
        stream.write_all(body).await.expect("write body");

        let mut response = String::new();
        stream
            .read_to_string(&mut response)
            .await
            .expect("read response");
        let status = response
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .and_then(|s| s.parse::<u16>().ok())
            .expect("http status");
        (status, response)
    }

    #[test]
    fn test_request_cap_exceeds_every_preset_ceiling() {
        // The per-file ceilings must be the binding check, not the
        // request-body cap
        for preset in [
            ImagePreset::ProjectGallery,
            ImagePreset::ProfilePhoto,
            ImagePreset::CertificateBadge,
            ImagePreset::SkillIcon,
        ] {
            assert!(MAX_REQUEST_BYTES > preset.max_bytes());
        }
    }

    #[tokio::test]
    async fn test_three_megabyte_upload_reaches_guard() {
        let (addr, token) = serve_images_router().await;

        // Over the framework's 2 MB default but under the 5 MB preset
        // ceiling. The payload is not decodable, so reaching the guard is
        // visible as a per-file error in a 200 response rather than a
        // request-level 400.
        let payload = vec![0xA5u8; 3 * 1024 * 1024];
        let body = multipart_body("bXYZtestboundary", "big.png", &payload);
        let (status, response) = post_upload(addr, &token, &body).await;

        assert_eq!(status, 200, "upload must not be cut off before the guard");
        assert!(response.contains("big.png"));
        assert!(response.contains("not a recognized image format"));
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected_by_guard_reason() {
        let (addr, token) = serve_images_router().await;

        // Over the 5 MB project ceiling but under the request cap: the
        // guard's own user-facing reason comes back, not a framework error
        let payload = vec![0xA5u8; 6 * 1024 * 1024];
        let body = multipart_body("bXYZtestboundary", "huge.png", &payload);
        let (status, response) = post_upload(addr, &token, &body).await;

        assert_eq!(status, 200);
        assert!(response.contains("File size exceeds the 5 MB limit"));
    }
}
