//! # Shared Types
//!
//! The two response shapes that cross module boundaries: the raw transport
//! output before classification, and the uniform envelope every dispatched
//! request resolves to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw output of a single transport call, before classification.
///
/// The transport never fails on a non-2xx status; it hands the status code,
/// decoded body, and headers to the dispatch layer, which owns all
/// interpretation. Header names are lower-cased so lookups like `retry-after`
/// are case-insensitive.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Decoded JSON body (`null` when the body was empty or not JSON)
    pub body: serde_json::Value,

    /// HTTP status code
    pub status: u16,

    /// Response headers, keys lower-cased
    pub headers: HashMap<String, String>,
}

impl RawResponse {
    /// Look up a header by its lower-cased name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Uniform result of a dispatched request.
///
/// `cached_at` is set only when the envelope was served from the response
/// cache; a fresh transport completion leaves it `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Decoded JSON body of the upstream response
    pub data: serde_json::Value,

    /// HTTP status code of the upstream response
    pub status: u16,

    /// When the response was inserted into the cache, if served from it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
}

impl ResponseEnvelope {
    /// Whether this envelope was served from the response cache
    pub fn is_cached(&self) -> bool {
        self.cached_at.is_some()
    }
}
