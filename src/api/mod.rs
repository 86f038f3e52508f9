//! # Accessor Catalog
//!
//! Typed entry points over the dispatch layer, one thin method per upstream
//! endpoint. Each accessor validates its arguments structurally, dispatches
//! through the shared cache/dedup/retry machinery, and extracts the one
//! payload field callers care about. Endpoint families with several operations
//! (`/resources/*`, `/skyblock/*`) are grouped behind accessor structs.

mod identity;
pub mod inventory;
mod resources;
mod skyblock;
pub mod types;

pub use identity::MinecraftIdentity;
pub use resources::Resources;
pub use skyblock::{AuctionQuery, Skyblock};

use crate::core::config::ClientConfig;
use crate::core::error::{ClientError, ClientResult};
use crate::dispatch::{KeySelection, RequestDispatcher};
use crate::transport::Transport;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use types::{KeyInfo, PlayerCounts, PunishmentStats};

/// Structural patterns for accessor arguments, compiled once at construction.
#[derive(Debug, Clone)]
pub(crate) struct Patterns {
    pub(crate) username: Regex,
    pub(crate) uuid: Regex,
    guild_id: Regex,
}

impl Patterns {
    fn new() -> ClientResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| ClientError::config(format!("Pattern failed to compile: {e}")))
        };

        Ok(Self {
            username: compile(r"^\w{1,16}$")?,
            // Undashed UUID with the version nibble in place.
            uuid: compile(r"^[a-z0-9]{8}[a-z0-9]{4}4[a-z0-9]{3}[a-z0-9]{4}[a-z0-9]{12}$")?,
            guild_id: compile(r"^[a-z0-9]{24}$")?,
        })
    }
}

/// How a guild lookup identifies its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuildQuery<'a> {
    /// By guild name (at most 32 characters)
    Name(&'a str),
    /// By the undashed UUID of any member
    Player(&'a str),
    /// By the guild's 24-hex object id
    Id(&'a str),
}

/// The Hypixel API client: the accessor catalog over a shared dispatcher.
#[derive(Debug, Clone)]
pub struct HypixelClient {
    pub(crate) dispatcher: RequestDispatcher,
    pub(crate) patterns: Patterns,
}

impl HypixelClient {
    /// Build a client with default configuration.
    pub fn new(keys: Vec<String>) -> ClientResult<Self> {
        Self::with_config(keys, ClientConfig::default())
    }

    /// Build a client around a single API key.
    pub fn single(key: impl Into<String>) -> ClientResult<Self> {
        Self::new(vec![key.into()])
    }

    /// Build a client with custom configuration.
    pub fn with_config(keys: Vec<String>, config: ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            dispatcher: RequestDispatcher::new(keys, config)?,
            patterns: Patterns::new()?,
        })
    }

    /// Build a client over a custom transport (test doubles, middleware).
    pub fn with_transport(
        keys: Vec<String>,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> ClientResult<Self> {
        Ok(Self {
            dispatcher: RequestDispatcher::with_transport(keys, config, transport)?,
            patterns: Patterns::new()?,
        })
    }

    /// The underlying dispatch layer, for callers that need raw envelopes.
    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    /// Retrieve information about a specific API key.
    ///
    /// The key itself issues the request, bypassing rotation; the cache read
    /// is skipped so one key can never answer for another.
    pub async fn key_info(&self, key: &str) -> ClientResult<KeyInfo> {
        let envelope = self
            .dispatcher
            .request_with("/key", &[], KeySelection::Pinned(key.to_string()), true)
            .await?;
        parse(extract(envelope.data, "record"), "/key record")
    }

    /// Retrieve a player's statistics by username or undashed UUID.
    pub async fn player(&self, query: &str) -> ClientResult<Value> {
        let id = self.identity(query).await?;
        let envelope = self.dispatcher.request("/player", &[("uuid", &id.uuid)]).await?;
        Ok(extract(envelope.data, "player"))
    }

    /// Retrieve a player's friend list by username or undashed UUID.
    pub async fn friends(&self, query: &str) -> ClientResult<Value> {
        let id = self.identity(query).await?;
        let envelope = self
            .dispatcher
            .request("/friends", &[("uuid", &id.uuid)])
            .await?;
        Ok(extract(envelope.data, "records"))
    }

    /// Retrieve a player's recent games by username or undashed UUID.
    pub async fn recent_games(&self, query: &str) -> ClientResult<Value> {
        let id = self.identity(query).await?;
        let envelope = self
            .dispatcher
            .request("/recentgames", &[("uuid", &id.uuid)])
            .await?;
        Ok(extract(envelope.data, "games"))
    }

    /// Retrieve a player's session status by username or undashed UUID.
    pub async fn status(&self, query: &str) -> ClientResult<Value> {
        let id = self.identity(query).await?;
        let envelope = self.dispatcher.request("/status", &[("uuid", &id.uuid)]).await?;
        Ok(extract(envelope.data, "session"))
    }

    /// Retrieve a guild by name, member UUID, or object id.
    pub async fn guild(&self, query: GuildQuery<'_>) -> ClientResult<Value> {
        let (field, value) = match query {
            GuildQuery::Name(name) => {
                if name.is_empty() || name.len() > 32 {
                    return Err(ClientError::invalid_argument("Invalid guild name"));
                }
                ("name", name)
            }
            GuildQuery::Player(uuid) => {
                if !self.patterns.uuid.is_match(uuid) {
                    return Err(ClientError::invalid_argument("Invalid player UUID"));
                }
                ("player", uuid)
            }
            GuildQuery::Id(id) => {
                if !self.patterns.guild_id.is_match(id) {
                    return Err(ClientError::invalid_argument(
                        "Invalid guild identification key",
                    ));
                }
                ("id", id)
            }
        };

        let envelope = self.dispatcher.request("/guild", &[(field, value)]).await?;
        Ok(extract(envelope.data, "guild"))
    }

    /// The resource catalog endpoints (no API key attached).
    pub fn resources(&self) -> Resources<'_> {
        Resources::new(self)
    }

    /// The SkyBlock endpoints.
    pub fn skyblock(&self) -> Skyblock<'_> {
        Skyblock::new(self)
    }

    /// Retrieve the list of active boosters.
    pub async fn boosters(&self) -> ClientResult<Value> {
        let envelope = self.dispatcher.request("/boosters", &[]).await?;
        Ok(extract(envelope.data, "boosters"))
    }

    /// Retrieve player counts, per game and in total.
    pub async fn counts(&self) -> ClientResult<PlayerCounts> {
        let envelope = self.dispatcher.request("/counts", &[]).await?;
        parse(envelope.data, "/counts")
    }

    /// Retrieve all leaderboards.
    pub async fn leaderboards(&self) -> ClientResult<Value> {
        let envelope = self.dispatcher.request("/leaderboards", &[]).await?;
        Ok(extract(envelope.data, "leaderboards"))
    }

    /// Retrieve current punishment statistics.
    pub async fn punishment_stats(&self) -> ClientResult<PunishmentStats> {
        let envelope = self.dispatcher.request("/punishmentstats", &[]).await?;
        parse(envelope.data, "/punishmentstats")
    }
}

/// Pull one field out of a payload, `null` when absent.
pub(crate) fn extract(data: Value, field: &str) -> Value {
    data.get(field).cloned().unwrap_or(Value::Null)
}

/// Deserialize a payload into its typed shape.
pub(crate) fn parse<T: DeserializeOwned>(value: Value, what: &str) -> ClientResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::decode(format!("Unexpected {what} payload: {e}")))
}
