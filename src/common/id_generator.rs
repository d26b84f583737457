// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates human-readable, prefixed IDs using Crockford Base32 encoding.
//! Format: PREFIX_XXXXXX (e.g., J_K7NP3X for jobs)
//!
//! Benefits:
//! - No ambiguous characters (excludes I, L, O, U)
//! - Case-insensitive
//! - Easy to read, type, and communicate verbally

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// User account (U_)
    User,
    /// Job posting (J_)
    Job,
    /// Payment transaction (T_)
    Transaction,
}

impl EntityPrefix {
    /// Get the string prefix for this entity type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::User => "U",
            EntityPrefix::Job => "J",
            EntityPrefix::Transaction => "T",
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
/// # Example
/// ```
/// let job_id = generate_id(EntityPrefix::Job);
/// // Returns something like "J_K7NP3X"
/// ```
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(6))
}

/// Generate a prefixed ID with custom length
pub fn generate_id_with_length(prefix: EntityPrefix, length: usize) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(length))
}

// ============================================================================
// Convenience functions for each entity type
// ============================================================================

/// Generate a User ID (U_XXXXXX)
pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

/// Generate a Job ID (J_XXXXXX)
pub fn generate_job_id() -> String {
    generate_id(EntityPrefix::Job)
}

/// Generate a payment reference (T_XXXXXXXXXXXX)
///
/// References are shared with the payment gateway and must stay unique far
/// longer than internal rows, so they carry a 12-character random part.
pub fn generate_transaction_reference() -> String {
    generate_id_with_length(EntityPrefix::Transaction, 12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_format() {
        let id = generate_user_id();
        assert!(id.starts_with("U_"));
        assert_eq!(id.len(), 8); // "U_" + 6 chars

        let id = generate_job_id();
        assert!(id.starts_with("J_"));

        let reference = generate_transaction_reference();
        assert!(reference.starts_with("T_"));
        assert_eq!(reference.len(), 14); // "T_" + 12 chars
    }

    #[test]
    fn test_id_charset_excludes_ambiguous_characters() {
        for _ in 0..100 {
            let id = generate_id_with_length(EntityPrefix::Job, 16);
            let random_part = &id[2..];
            for c in random_part.chars() {
                assert!(
                    CROCKFORD_ALPHABET.contains(&(c as u8)),
                    "unexpected character '{}' in id {}",
                    c,
                    id
                );
            }
        }
    }

    #[test]
    fn test_references_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_transaction_reference()));
        }
    }
}
