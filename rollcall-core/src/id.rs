//! Identifier generation with prefix support
//!
//! Token and presence identifiers share one scheme: a short human-typeable
//! prefix, a dash, and a fixed-length uppercase suffix taken from a v4 UUID.
//! The suffix lengths are sized for negligible collision probability at
//! classroom volumes, not for cryptographic uniqueness.

use uuid::Uuid;

/// Prefix for issued QR token identifiers, e.g. `TKN-9F3A1C`.
pub const TOKEN_PREFIX: &str = "TKN";

/// Prefix for presence record identifiers, e.g. `PR-4B7D90E2`.
pub const PRESENCE_PREFIX: &str = "PR";

/// Suffix length of a token identifier.
pub const TOKEN_SUFFIX_LEN: usize = 6;

/// Suffix length of a presence identifier.
pub const PRESENCE_SUFFIX_LEN: usize = 8;

/// Generate a prefixed identifier
///
/// The format is `{prefix}-{suffix}`, where the suffix is the first
/// `suffix_len` hex characters of a random UUID, uppercased.
pub fn generate_prefixed_id(prefix: &str, suffix_len: usize) -> String {
    debug_assert!(suffix_len <= 32, "suffix cannot exceed a UUID's hex length");

    let hex = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, hex[..suffix_len].to_uppercase())
}

/// Validate that an identifier has the expected prefix and suffix shape
pub fn validate_prefixed_id(id: &str, expected_prefix: &str, suffix_len: usize) -> bool {
    match id.split_once('-') {
        Some((prefix, suffix)) => {
            prefix == expected_prefix
                && suffix.len() == suffix_len
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_prefixed_id() {
        let id = generate_prefixed_id(TOKEN_PREFIX, TOKEN_SUFFIX_LEN);
        assert!(id.starts_with("TKN-"));
        assert_eq!(id.len(), TOKEN_PREFIX.len() + 1 + TOKEN_SUFFIX_LEN);

        // Ensure uniqueness
        let id2 = generate_prefixed_id(TOKEN_PREFIX, TOKEN_SUFFIX_LEN);
        assert_ne!(id, id2);
    }

    #[test]
    fn test_suffix_is_uppercase_alphanumeric() {
        let id = generate_prefixed_id(PRESENCE_PREFIX, PRESENCE_SUFFIX_LEN);
        let suffix = &id[PRESENCE_PREFIX.len() + 1..];
        assert_eq!(suffix.len(), PRESENCE_SUFFIX_LEN);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_validate_prefixed_id() {
        let id = generate_prefixed_id(TOKEN_PREFIX, TOKEN_SUFFIX_LEN);
        assert!(validate_prefixed_id(&id, TOKEN_PREFIX, TOKEN_SUFFIX_LEN));
        assert!(!validate_prefixed_id(&id, PRESENCE_PREFIX, TOKEN_SUFFIX_LEN));
        assert!(!validate_prefixed_id(&id, TOKEN_PREFIX, PRESENCE_SUFFIX_LEN));

        // Invalid shapes
        assert!(!validate_prefixed_id("TKN", TOKEN_PREFIX, TOKEN_SUFFIX_LEN));
        assert!(!validate_prefixed_id("TKN-", TOKEN_PREFIX, TOKEN_SUFFIX_LEN));
        assert!(!validate_prefixed_id(
            "TKN-abc123",
            TOKEN_PREFIX,
            TOKEN_SUFFIX_LEN
        ));
    }
}
