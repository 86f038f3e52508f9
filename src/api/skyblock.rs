//! # SkyBlock Endpoints
//!
//! Economy and marketplace data: news, the auction house, the bazaar, and
//! player profiles.

use super::types::{AuctionsPage, EndedAuctions, NewsItem};
use super::{extract, parse, HypixelClient};
use crate::core::error::{ClientError, ClientResult};
use serde_json::Value;

/// How an auction lookup identifies its target. All variants carry an
/// undashed UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionQuery<'a> {
    /// By the auction's own UUID
    Auction(&'a str),
    /// By the auctioning player's UUID
    Player(&'a str),
    /// By the auctioning profile's UUID
    Profile(&'a str),
}

/// Accessors for the `/skyblock/*` endpoint family.
#[derive(Debug, Clone, Copy)]
pub struct Skyblock<'a> {
    client: &'a HypixelClient,
}

impl<'a> Skyblock<'a> {
    pub(crate) fn new(client: &'a HypixelClient) -> Self {
        Self { client }
    }

    /// Current SkyBlock news entries.
    pub async fn news(&self) -> ClientResult<Vec<NewsItem>> {
        let envelope = self.client.dispatcher.request("/skyblock/news", &[]).await?;
        parse(extract(envelope.data, "items"), "/skyblock/news items")
    }

    /// Auctions matching a player, profile, or auction UUID.
    pub async fn auction(&self, query: AuctionQuery<'_>) -> ClientResult<Value> {
        let (field, uuid) = match query {
            AuctionQuery::Auction(uuid) => ("uuid", uuid),
            AuctionQuery::Player(uuid) => ("player", uuid),
            AuctionQuery::Profile(uuid) => ("profile", uuid),
        };

        if !self.client.patterns.uuid.is_match(uuid) {
            return Err(ClientError::invalid_argument("Invalid UUID provided"));
        }

        let envelope = self
            .client
            .dispatcher
            .request("/skyblock/auction", &[(field, uuid)])
            .await?;
        Ok(extract(envelope.data, "auctions"))
    }

    /// One page of the active auction listing.
    pub async fn auctions(&self, page: i64) -> ClientResult<AuctionsPage> {
        let envelope = self
            .client
            .dispatcher
            .request("/skyblock/auctions", &[("page", &page.to_string())])
            .await?;
        parse(envelope.data, "/skyblock/auctions")
    }

    /// Auctions that ended in the last minute.
    pub async fn auctions_ended(&self) -> ClientResult<EndedAuctions> {
        let envelope = self
            .client
            .dispatcher
            .request("/skyblock/auctions_ended", &[])
            .await?;
        parse(envelope.data, "/skyblock/auctions_ended")
    }

    /// Every product listed on the bazaar.
    pub async fn bazaar(&self) -> ClientResult<Value> {
        let envelope = self.client.dispatcher.request("/skyblock/bazaar", &[]).await?;
        Ok(extract(envelope.data, "products"))
    }

    /// A single profile by its profile UUID.
    pub async fn profile(&self, profile_id: &str) -> ClientResult<Value> {
        let envelope = self
            .client
            .dispatcher
            .request("/skyblock/profile", &[("profile", profile_id)])
            .await?;
        Ok(extract(envelope.data, "profile"))
    }

    /// All profiles attached to a player, by username or undashed UUID.
    pub async fn profiles(&self, query: &str) -> ClientResult<Value> {
        let id = self.client.identity(query).await?;
        let envelope = self
            .client
            .dispatcher
            .request("/skyblock/profiles", &[("uuid", &id.uuid)])
            .await?;
        Ok(extract(envelope.data, "profiles"))
    }
}
