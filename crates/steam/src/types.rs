//! Steam Web API response types.

use serde::{Deserialize, Serialize};

/// Most Steam methods wrap their payload in `{"response": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerSummaries {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub steamid: String,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub profileurl: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    /// 0 offline, 1 online, 2 busy, 3 away, 4 snooze, 5 looking to trade, 6 looking to play
    #[serde(default)]
    pub personastate: Option<u32>,
}

/// `GetOwnedGames`; the response is empty for private profiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnedGames {
    #[serde(default)]
    pub game_count: Option<u32>,
    #[serde(default)]
    pub games: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SteamLevel {
    #[serde(default)]
    pub player_level: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentPlayers {
    #[serde(default)]
    pub player_count: Option<u64>,
    #[serde(default)]
    pub result: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VanityResolution {
    /// 1 on success, 42 when no match
    pub success: u32,
    #[serde(default)]
    pub steamid: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
