//! # Request Key Derivation
//!
//! Two calls are "the same request" when endpoint, path, and query parameters
//! match; which API key ends up on the wire is a rotation detail and never
//! feeds the digest. Credentials travel as a header selected separately from
//! the query map, so exclusion is structural rather than a filtering rule.

use sha2::{Digest, Sha256};

/// Derive the deterministic identity of a logical request.
///
/// Query pairs are sorted before hashing so parameter order cannot split the
/// cache, and every component is length-prefixed so adjacent fields cannot
/// collide by concatenation.
pub(crate) fn request_key(base_url: &str, path: &str, query: &[(String, String)]) -> String {
    let mut pairs: Vec<&(String, String)> = query.iter().collect();
    pairs.sort();

    let mut hasher = Sha256::new();
    for part in [base_url, path] {
        hasher.update(part.len().to_le_bytes());
        hasher.update(part);
    }
    for (name, value) in pairs {
        hasher.update(name.len().to_le_bytes());
        hasher.update(name);
        hasher.update(value.len().to_le_bytes());
        hasher.update(value);
    }

    format!("req:{:x}", hasher.finalize())
}
