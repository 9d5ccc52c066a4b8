// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates human-readable, prefixed IDs using Crockford Base32 encoding.
//! Format: PREFIX_XXXXXX (e.g., P_K7NP3X for projects)
//!
//! Benefits:
//! - No ambiguous characters (excludes I, L, O, U)
//! - Case-insensitive
//! - ~1 billion combinations per entity type (32^6)
//! - Easy to read, type, and communicate verbally

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// Project (P_)
    Project,
    /// Skill (S_)
    Skill,
    /// Certification (C_)
    Certification,
    /// Experience (X_)
    Experience,
    /// Message (M_)
    Message,
    /// User (U_)
    User,
    /// Generic document (D_) for collections without a dedicated prefix
    Document,
}

impl EntityPrefix {
    /// Get the string prefix for this entity type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Project => "P",
            EntityPrefix::Skill => "S",
            EntityPrefix::Certification => "C",
            EntityPrefix::Experience => "X",
            EntityPrefix::Message => "M",
            EntityPrefix::User => "U",
            EntityPrefix::Document => "D",
        }
    }

    /// Map a collection name to its entity prefix
    pub fn for_collection(collection: &str) -> EntityPrefix {
        match collection {
            "projects" => EntityPrefix::Project,
            "skills" => EntityPrefix::Skill,
            "certifications" => EntityPrefix::Certification,
            "experiences" => EntityPrefix::Experience,
            "messages" => EntityPrefix::Message,
            "users" => EntityPrefix::User,
            _ => EntityPrefix::Document,
        }
    }
}

/// Generate a random Crockford Base32 string of specified length
fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID using Crockford Base32 encoding
///
/// Returns a string in format "PREFIX_XXXXXX" (e.g., "P_K7NP3X")
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(6))
}
