//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - JWT token encode/decode round trip
//! - User record wire shapes
//! - Password hash verification

#[cfg(test)]
mod tests {
    use super::super::*;
    use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

    #[test]
    fn test_claims_structure() {
        let claims = models::Claims {
            sub: "U_K7NP3X".to_string(),
            exp: 1234567890,
        };

        assert_eq!(claims.sub, "U_K7NP3X");
        assert_eq!(claims.exp, 1234567890);
    }

    #[test]
    fn test_jwt_encoding_and_decoding() {
        let secret = "test_secret_key";
        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            exp: 9999999999, // Far future
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let decoded = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .expect("Failed to decode token");

        assert_eq!(decoded.claims.sub, "U_TEST01");
        assert_eq!(decoded.claims.exp, 9999999999);
    }

    #[test]
    fn test_jwt_validation_fails_with_wrong_secret() {
        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            exp: 9999999999,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"right_secret"),
        )
        .unwrap();

        let result = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(b"wrong_secret"),
            &Validation::new(Algorithm::HS256),
        );

        assert!(result.is_err(), "Decoding with wrong secret must fail");
    }

    #[test]
    fn test_user_record_wire_shape() {
        let user: models::User = serde_json::from_value(serde_json::json!({
            "id": "U_TEST01",
            "email": "admin@example.com",
            "passwordHash": "$2b$12$abcdefghijklmnopqrstuv",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.email, "admin@example.com");
        assert!(user.password_hash.starts_with("$2b$"));
    }

    #[test]
    fn test_public_user_never_carries_password_hash() {
        let public = models::PublicUser {
            id: "U_TEST01".to_string(),
            email: "admin@example.com".to_string(),
            is_admin: true,
        };

        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_bcrypt_round_trip() {
        // Low cost keeps the test fast
        let hash = bcrypt::hash("hunter2", 4).unwrap();
        assert!(bcrypt::verify("hunter2", &hash).unwrap());
        assert!(!bcrypt::verify("wrong", &hash).unwrap());
    }
}
