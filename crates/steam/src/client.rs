//! Steam Web API methods.

use crate::types::*;
use rest_client::{AuthMode, ConfigError, Request, RequestError, RestClient};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::ApiConfig;
use tracing::debug;

/// Steam Web API client
pub struct SteamClient {
    client: RestClient,
}

/// Request for `/{interface}/{method}/{version}/`
fn method_request(interface: &str, method: &str, version: &str) -> Request {
    Request::get(format!("/{interface}/{method}/{version}/"))
}

impl SteamClient {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Create a client that sends `key` as a query parameter. Fails when the
    /// key is absent or empty.
    pub fn configure(api: &ApiConfig, api_key: Option<String>) -> Result<Self, ConfigError> {
        let auth = AuthMode::QueryParam("key".to_string());
        let client = RestClient::configure(api.client_config(auth, api_key))?;
        Ok(Self::new(client))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T, RequestError> {
        debug!(path = request.path(), "Calling Steam method");
        self.client.call(&request).await?.decode()
    }

    /// Profiles for up to 100 comma-separated Steam IDs
    pub async fn player_summaries(&self, steamids: &str) -> Result<PlayerSummaries, RequestError> {
        let request =
            method_request("ISteamUser", "GetPlayerSummaries", "v2").query("steamids", steamids);
        let envelope: Envelope<PlayerSummaries> = self.fetch(request).await?;
        Ok(envelope.response)
    }

    pub async fn owned_games(
        &self,
        steamid: &str,
        include_appinfo: bool,
    ) -> Result<OwnedGames, RequestError> {
        let request = method_request("IPlayerService", "GetOwnedGames", "v1")
            .query("steamid", steamid)
            .query("include_appinfo", include_appinfo)
            .query("include_played_free_games", true);
        let envelope: Envelope<OwnedGames> = self.fetch(request).await?;
        Ok(envelope.response)
    }

    pub async fn recently_played_games(&self, steamid: &str, count: u32) -> Result<Value, RequestError> {
        self.fetch(
            method_request("IPlayerService", "GetRecentlyPlayedGames", "v1")
                .query("steamid", steamid)
                .query("count", count),
        )
        .await
    }

    pub async fn steam_level(&self, steamid: &str) -> Result<SteamLevel, RequestError> {
        let request = method_request("IPlayerService", "GetSteamLevel", "v1").query("steamid", steamid);
        let envelope: Envelope<SteamLevel> = self.fetch(request).await?;
        Ok(envelope.response)
    }

    /// Resolve a vanity URL name (e.g. `gaben`) to a Steam ID
    pub async fn resolve_vanity_url(&self, vanity: &str) -> Result<VanityResolution, RequestError> {
        let request = method_request("ISteamUser", "ResolveVanityURL", "v1").query("vanityurl", vanity);
        let envelope: Envelope<VanityResolution> = self.fetch(request).await?;
        Ok(envelope.response)
    }

    /// `relationship` is `all` or `friend`
    pub async fn friend_list(&self, steamid: &str, relationship: &str) -> Result<Value, RequestError> {
        self.fetch(
            method_request("ISteamUser", "GetFriendList", "v1")
                .query("steamid", steamid)
                .query("relationship", relationship),
        )
        .await
    }

    pub async fn player_bans(&self, steamids: &str) -> Result<Value, RequestError> {
        self.fetch(method_request("ISteamUser", "GetPlayerBans", "v1").query("steamids", steamids))
            .await
    }

    pub async fn global_achievement_percentages(&self, gameid: u32) -> Result<Value, RequestError> {
        self.fetch(
            method_request("ISteamUserStats", "GetGlobalAchievementPercentagesForApp", "v2")
                .query("gameid", gameid),
        )
        .await
    }

    pub async fn current_players(&self, appid: u32) -> Result<CurrentPlayers, RequestError> {
        let request =
            method_request("ISteamUserStats", "GetNumberOfCurrentPlayers", "v1").query("appid", appid);
        let envelope: Envelope<CurrentPlayers> = self.fetch(request).await?;
        Ok(envelope.response)
    }

    pub async fn news_for_app(
        &self,
        appid: u32,
        count: u32,
        maxlength: u32,
    ) -> Result<Value, RequestError> {
        self.fetch(
            method_request("ISteamNews", "GetNewsForApp", "v2")
                .query("appid", appid)
                .query("count", count)
                .query("maxlength", maxlength),
        )
        .await
    }
}
