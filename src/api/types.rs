//! # Typed Payloads
//!
//! Lightweight structs for the small aggregate responses. The deep payloads
//! (player statistics, guilds, auctions, bazaar products) stay
//! `serde_json::Value` — their schemas run to hundreds of optional fields and
//! modeling them is out of scope.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Information about an API key, from `/key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInfo {
    /// The key itself
    pub key: String,
    /// UUID of the key's owner
    pub owner: String,
    /// Request ceiling per minute
    pub limit: i64,
    /// Requests made in the past minute
    pub queries_in_past_min: i64,
    /// Requests made over the key's lifetime
    pub total_queries: i64,
}

/// Per-game player counts, from `/counts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCounts {
    /// Total players online
    #[serde(rename = "playerCount")]
    pub player_count: i64,
    /// Counts per game type
    #[serde(default)]
    pub games: HashMap<String, GameCount>,
}

/// Player count for one game type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCount {
    /// Players in this game
    pub players: i64,
    /// Players per sub-mode, when the game reports them
    #[serde(default)]
    pub modes: Option<HashMap<String, i64>>,
}

/// Current punishment statistics, from `/punishmentstats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunishmentStats {
    /// Watchdog bans in the past minute
    #[serde(rename = "watchdog_lastMinute")]
    pub watchdog_last_minute: i64,
    /// Staff bans in the past day
    #[serde(rename = "staff_rollingDaily")]
    pub staff_rolling_daily: i64,
    /// Total Watchdog bans
    pub watchdog_total: i64,
    /// Watchdog bans in the past day
    #[serde(rename = "watchdog_rollingDaily")]
    pub watchdog_rolling_daily: i64,
    /// Total staff bans
    pub staff_total: i64,
}

/// One page of active auctions, from `/skyblock/auctions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionsPage {
    /// Page number of this response
    pub page: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Total number of active auctions
    pub total_auctions: i64,
    /// When the listing snapshot was taken (UNIX milliseconds)
    pub last_updated: i64,
    /// The auctions on this page
    pub auctions: Vec<serde_json::Value>,
}

/// Recently ended auctions, from `/skyblock/auctions_ended`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndedAuctions {
    /// When the listing snapshot was taken (UNIX milliseconds)
    pub last_updated: i64,
    /// The ended auctions
    pub auctions: Vec<serde_json::Value>,
}

/// A SkyBlock news entry, from `/skyblock/news`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Inventory item shown next to the entry
    pub item: serde_json::Value,
    /// Link to the news thread
    pub link: String,
    /// Date line of the entry
    pub text: String,
    /// Title of the entry
    pub title: String,
}
