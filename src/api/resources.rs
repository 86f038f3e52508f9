//! # Resource Catalog
//!
//! Static game metadata: achievements, challenges, quests, guild metadata, and
//! SkyBlock collections/skills. These endpoints are public, so every request
//! here is sent without an API key header.

use super::{extract, HypixelClient};
use crate::core::error::ClientResult;
use crate::dispatch::KeySelection;
use serde_json::Value;

/// Accessors for the `/resources/*` endpoint family.
#[derive(Debug, Clone, Copy)]
pub struct Resources<'a> {
    client: &'a HypixelClient,
}

impl<'a> Resources<'a> {
    pub(crate) fn new(client: &'a HypixelClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, path: &str) -> ClientResult<Value> {
        let envelope = self
            .client
            .dispatcher
            .request_with(path, &[], KeySelection::Anonymous, false)
            .await?;
        Ok(envelope.data)
    }

    /// All possible achievements, keyed by game.
    pub async fn achievements(&self) -> ClientResult<Value> {
        Ok(extract(self.fetch("/resources/achievements").await?, "achievements"))
    }

    /// All possible challenges, keyed by game.
    pub async fn challenges(&self) -> ClientResult<Value> {
        Ok(extract(self.fetch("/resources/challenges").await?, "challenges"))
    }

    /// All possible quests, keyed by game.
    pub async fn quests(&self) -> ClientResult<Value> {
        Ok(extract(self.fetch("/resources/quests").await?, "quests"))
    }

    /// All possible guild achievements (`one_time` and `tiered`).
    pub async fn guild_achievements(&self) -> ClientResult<Value> {
        self.fetch("/resources/guilds/achievements").await
    }

    /// All possible guild permissions.
    pub async fn guild_permissions(&self) -> ClientResult<Value> {
        Ok(extract(
            self.fetch("/resources/guilds/permissions").await?,
            "permissions",
        ))
    }

    /// All SkyBlock collections.
    pub async fn skyblock_collections(&self) -> ClientResult<Value> {
        Ok(extract(
            self.fetch("/resources/skyblock/collections").await?,
            "collections",
        ))
    }

    /// All SkyBlock skills.
    pub async fn skyblock_skills(&self) -> ClientResult<Value> {
        let data = self.fetch("/resources/skyblock/skills").await?;
        // The skills payload was briefly published under "collections"
        // upstream; accept either field.
        if data.get("skills").is_some() {
            Ok(extract(data, "skills"))
        } else {
            Ok(extract(data, "collections"))
        }
    }
}
