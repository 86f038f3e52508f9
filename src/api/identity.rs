//! # Username and UUID Lookups
//!
//! The upstream keys player endpoints by undashed UUID, so every by-name
//! accessor first resolves the query through a public lookup service. Lookups
//! flow through the same dispatch layer as everything else, which means
//! repeated resolutions of one player are cached and concurrent ones collapse
//! onto a single call.

use super::HypixelClient;
use crate::core::error::{ClientError, ClientResult};
use crate::dispatch::KeySelection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A resolved player identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinecraftIdentity {
    /// Undashed UUID
    pub uuid: String,
    /// Current username
    pub username: String,
}

impl HypixelClient {
    /// Resolve a username or undashed UUID into both forms.
    pub async fn identity(&self, query: &str) -> ClientResult<MinecraftIdentity> {
        if !self.patterns.username.is_match(query) && !self.patterns.uuid.is_match(query) {
            return Err(ClientError::invalid_argument(
                "Invalid username or UUID provided",
            ));
        }
        self.lookup(query).await
    }

    /// Resolve a username into its UUID.
    pub async fn uuid_of(&self, username: &str) -> ClientResult<String> {
        if !self.patterns.username.is_match(username) {
            return Err(ClientError::invalid_argument("Invalid username provided"));
        }
        Ok(self.lookup(username).await?.uuid)
    }

    /// Resolve an undashed UUID into its current username.
    pub async fn username_of(&self, uuid: &str) -> ClientResult<String> {
        if !self.patterns.uuid.is_match(uuid) {
            return Err(ClientError::invalid_argument("Invalid UUID provided"));
        }
        Ok(self.lookup(uuid).await?.username)
    }

    /// Shared lookup against the resolver. Callers have already validated the
    /// query, so it is safe to splice into the path.
    async fn lookup(&self, query: &str) -> ClientResult<MinecraftIdentity> {
        let lookup_url = &self.dispatcher.config().lookup_url;
        let envelope = self
            .dispatcher
            .request_with(
                &format!("{lookup_url}/{query}"),
                &[],
                KeySelection::Anonymous,
                false,
            )
            .await?;

        let resolved = envelope.data.get("status").and_then(Value::as_str) == Some("OK");
        if envelope.status != 200 || !resolved {
            return Err(ClientError::invalid_argument(
                "Invalid username or UUID provided",
            ));
        }

        let field = |name: &str| {
            envelope
                .data
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    ClientError::decode(format!("Lookup response is missing '{name}'"))
                })
        };

        Ok(MinecraftIdentity {
            uuid: field("id")?,
            username: field("name")?,
        })
    }
}
