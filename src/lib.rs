//! # Hypixel Client Library
//!
//! An async client for the Hypixel public API (player, guild, economy, and
//! marketplace data). The interesting machinery lives in the dispatch layer:
//! every logical request is multiplexed across a rotating pool of API keys,
//! deduplicated against identical in-flight requests, cached for a TTL window,
//! and transparently retried on rate-limit responses with server-directed
//! backoff. The typed accessor catalog on top of it is thin mapping code.
//!
//! ## Key Features
//! - Round-robin API key rotation with structural validation and masking
//! - In-memory response cache with per-entry TTL (successes only)
//! - Concurrent identical requests collapse onto one upstream call
//! - Automatic retry on rate limiting, honoring `Retry-After`
//! - Pluggable transport seam for testing without a network
//!
//! ## Usage Example
//! ```rust,no_run
//! use hypixel_client::HypixelClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HypixelClient::new(vec![
//!         "2931ba88-3ccd-4504-9d53-94021c723e06".to_string(),
//!     ])?;
//!
//!     let player = client.player("GoogleSites").await?;
//!     println!("stats: {player}");
//!     Ok(())
//! }
//! ```

/// Core functionality: error types, configuration, and shared data structures
pub mod core;

/// API key pool with round-robin rotation, validation, and masking
pub mod credentials;

/// Transport seam: the HTTP GET collaborator and its reqwest implementation
pub mod transport;

/// The dispatch layer: cache lookup, in-flight deduplication, response
/// classification, and the rate-limit retry loop
pub mod dispatch;

/// Typed accessor catalog over the dispatch layer
pub mod api;

// Re-export the types callers need for everyday use so they don't have to
// know the module layout.

/// Main error type and result alias used throughout the client
pub use crate::core::error::{ClientError, ClientResult};

/// Client configuration (base URL, cache TTL, retry behavior)
pub use crate::core::config::ClientConfig;

/// Uniform result envelope returned by the dispatch layer
pub use crate::core::types::{RawResponse, ResponseEnvelope};

/// The validated key pool
pub use crate::credentials::KeyPool;

/// Per-call credential selection for the dispatch layer
pub use crate::dispatch::{KeySelection, RequestDispatcher};

/// The accessor catalog client
pub use crate::api::HypixelClient;

/// Transport seam for injecting test doubles
pub use crate::transport::{HttpTransport, Transport};
