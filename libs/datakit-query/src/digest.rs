//! Stable restriction digests.
//!
//! A cursor token minted for one query must not be replayed against a
//! different restriction. The digest of a restriction is a short stable
//! fingerprint of its normalized rendering, carried inside cursor tokens and
//! compared on resume.

use sha2::{Digest, Sha256};

use crate::restriction::Restriction;

/// Length of the short hash in hex characters.
const SHORT_HASH_LEN: usize = 16;

/// The canonical text a restriction hashes over.
///
/// The rendered form is deterministic for structurally equal trees, which
/// is all the fingerprint requires; semantically equivalent but
/// structurally different trees hash differently by design.
#[must_use]
pub fn normalize_restriction(restriction: &Restriction) -> String {
    restriction.to_string()
}

/// Short stable hash of a restriction (SHA-256, hex, truncated).
///
/// Returns `None` for an absent restriction so that "no restriction" and
/// "restriction that renders to an empty string" cannot collide.
#[must_use]
pub fn short_restriction_hash(restriction: Option<&Restriction>) -> Option<String> {
    restriction.map(|r| {
        let normalized = normalize_restriction(r);
        let digest = Sha256::digest(normalized.as_bytes());
        let mut hash = hex::encode(digest);
        hash.truncate(SHORT_HASH_LEN);
        hash
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::restrict;

    #[test]
    fn equal_trees_hash_identically() {
        let a = restrict::equal_to("name", "x");
        let b = restrict::equal_to("name", "x");
        assert_eq!(
            short_restriction_hash(Some(&a)),
            short_restriction_hash(Some(&b))
        );
    }

    #[test]
    fn different_trees_hash_differently() {
        let a = restrict::equal_to("name", "x");
        let b = restrict::greater_than("age", 1);
        assert_ne!(
            short_restriction_hash(Some(&a)),
            short_restriction_hash(Some(&b))
        );
    }

    #[test]
    fn absent_restriction_has_no_hash() {
        assert_eq!(short_restriction_hash(None), None);
    }

    #[test]
    fn hash_is_short_hex() {
        let r = restrict::is_null("deleted_at");
        let hash = short_restriction_hash(Some(&r)).unwrap();
        assert_eq!(hash.len(), SHORT_HASH_LEN);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
