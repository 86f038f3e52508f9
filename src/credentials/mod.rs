//! # API Key Pool
//!
//! Holds the ordered, immutable set of API keys supplied at construction and
//! hands them out in strict round-robin order. The cursor advance is a single
//! atomic step, so no two concurrent callers can observe the same position
//! through a lost update.
//!
//! Keys are opaque to the rest of the client except for two operations:
//! structural validation against the upstream's hyphenated format, and masking
//! for display in logs and error messages.

use crate::core::error::{ClientError, ClientResult};
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Structural format of an API key: hyphenated hex groups with a fixed
/// version nibble in the third group.
pub const KEY_FORMAT: &str = r"^[a-z0-9]{8}-[a-z0-9]{4}-4[a-z0-9]{3}-[a-z0-9]{4}-[a-z0-9]{12}$";

/// A validated, immutable pool of API keys with a round-robin cursor.
pub struct KeyPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
    format: Regex,
}

impl KeyPool {
    /// Build a pool from one or more keys.
    ///
    /// Fails atomically: an empty pool or any key that does not match
    /// [`KEY_FORMAT`] rejects the whole construction.
    pub fn new(keys: Vec<String>) -> ClientResult<Self> {
        let format = Regex::new(KEY_FORMAT)
            .map_err(|e| ClientError::config(format!("Key format pattern failed to compile: {e}")))?;

        if keys.is_empty() {
            return Err(ClientError::config("No API keys provided"));
        }

        for key in &keys {
            if !format.is_match(key) {
                return Err(ClientError::config(format!(
                    "Invalid API key provided: {key}"
                )));
            }
        }

        Ok(Self {
            keys,
            cursor: AtomicUsize::new(0),
            format,
        })
    }

    /// Convenience constructor for a single-key pool.
    pub fn single(key: impl Into<String>) -> ClientResult<Self> {
        Self::new(vec![key.into()])
    }

    /// Return the next key in cyclic order.
    ///
    /// The fetch-and-increment is one atomic step; the wrap is a modulo on the
    /// loaded value, so concurrent callers each get a distinct position.
    pub fn rotate(&self) -> &str {
        let position = self.cursor.fetch_add(1, Ordering::Relaxed);
        &self.keys[position % self.keys.len()]
    }

    /// Whether a key matches the structural format.
    pub fn is_valid(&self, key: &str) -> bool {
        self.format.is_match(key)
    }

    /// Number of keys in the pool.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false: construction rejects empty pools.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl std::fmt::Debug for KeyPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked: Vec<String> = self.keys.iter().map(|k| mask(k)).collect();
        f.debug_struct("KeyPool")
            .field("keys", &masked)
            .field("cursor", &self.cursor.load(Ordering::Relaxed))
            .finish()
    }
}

/// Produce a display-safe form of a key: every group but the last is replaced
/// with masking characters of the same width.
pub fn mask(key: &str) -> String {
    let tail: String = key.chars().rev().take(12).collect::<Vec<_>>().into_iter().rev().collect();
    format!("********-****-****-****-{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 3] = [
        "2931ba88-3ccd-4504-9d53-94021c723e06",
        "4ccbc899-71c7-4554-994d-05638279e4a7",
        "00000000-0000-4000-0000-000000000000",
    ];

    fn pool() -> KeyPool {
        KeyPool::new(KEYS.iter().map(|k| k.to_string()).collect()).unwrap()
    }

    #[test]
    fn rotation_is_cyclic() {
        let pool = pool();
        for round in 0..2 {
            for expected in KEYS {
                assert_eq!(pool.rotate(), expected, "round {round}");
            }
        }
        // The (K+1)th call returned the same key as the 1st above.
    }

    #[test]
    fn empty_pool_is_rejected() {
        assert!(matches!(
            KeyPool::new(vec![]),
            Err(ClientError::Configuration { .. })
        ));
    }

    #[test]
    fn malformed_key_rejects_whole_pool() {
        let keys = vec![KEYS[0].to_string(), "abc".to_string()];
        assert!(KeyPool::new(keys).is_err());
    }

    #[test]
    fn wrong_version_nibble_is_rejected() {
        // Third group must start with '4'.
        assert!(KeyPool::single("2931ba88-3ccd-5504-9d53-94021c723e06").is_err());
    }

    #[test]
    fn masking_preserves_only_the_tail() {
        let masked = mask("2931ba88-3ccd-4504-9d53-94021c723e06");
        let shape = Regex::new(r"^\*{8}-\*{4}-\*{4}-\*{4}-[a-z0-9]{12}$").unwrap();
        assert!(shape.is_match(&masked));
        assert!(masked.ends_with("94021c723e06"));
    }

    #[test]
    fn debug_output_never_leaks_keys() {
        let rendered = format!("{:?}", pool());
        for key in KEYS {
            assert!(!rendered.contains(key));
        }
        assert!(rendered.contains("94021c723e06"));
    }
}
