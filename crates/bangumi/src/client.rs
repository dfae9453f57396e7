//! Bangumi API v0 endpoints.

use crate::types::*;
use rest_client::{AuthMode, ConfigError, Request, RequestError, RestClient};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shared::ApiConfig;
use tracing::{debug, info};

/// Bangumi API v0 client
pub struct BangumiClient {
    client: RestClient,
}

impl BangumiClient {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Create a client with bearer-token auth. Fails when `token` is absent
    /// or empty.
    pub fn configure(api: &ApiConfig, token: Option<String>) -> Result<Self, ConfigError> {
        let client = RestClient::configure(api.client_config(AuthMode::Bearer, token))?;
        Ok(Self::new(client))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T, RequestError> {
        self.client.call(&request).await?.decode()
    }

    async fn raw(&self, request: Request) -> Result<Value, RequestError> {
        Ok(self.client.call(&request).await?.into_body())
    }

    /// Fetch the user the token belongs to
    pub async fn me(&self) -> Result<User, RequestError> {
        info!("Fetching current user");
        self.fetch(Request::get("/v0/me")).await
    }

    pub async fn user(&self, username: &str) -> Result<User, RequestError> {
        debug!(username = username, "Fetching user");
        self.fetch(Request::get("/v0/users").segment(username)).await
    }

    /// Broadcast calendar; public, sent without the token
    pub async fn calendar(&self) -> Result<Vec<CalendarDay>, RequestError> {
        info!("Fetching broadcast calendar");
        self.fetch(Request::get("/calendar").unauthenticated()).await
    }

    /// Search subjects (anime, books, games, ...)
    ///
    /// `sort` is one of `match`, `heat`, `rank`, `score`.
    pub async fn search_subjects(
        &self,
        keyword: &str,
        sort: &str,
        filter: Option<Value>,
        limit: u32,
    ) -> Result<Paged<SubjectSummary>, RequestError> {
        info!(keyword = keyword, sort = sort, limit = limit, "Searching subjects");
        let mut body = json!({"keyword": keyword, "sort": sort, "limit": limit});
        if let Some(filter) = filter {
            body["filter"] = filter;
        }
        self.fetch(Request::post("/v0/search/subjects", body)).await
    }

    pub async fn search_characters(&self, keyword: &str, limit: u32) -> Result<Value, RequestError> {
        info!(keyword = keyword, "Searching characters");
        self.raw(Request::post(
            "/v0/search/characters",
            json!({"keyword": keyword, "limit": limit}),
        ))
        .await
    }

    pub async fn search_persons(&self, keyword: &str, limit: u32) -> Result<Value, RequestError> {
        info!(keyword = keyword, "Searching persons");
        self.raw(Request::post(
            "/v0/search/persons",
            json!({"keyword": keyword, "limit": limit}),
        ))
        .await
    }

    pub async fn subject(&self, subject_id: u64) -> Result<Subject, RequestError> {
        debug!(subject_id = subject_id, "Fetching subject");
        self.fetch(Request::get(format!("/v0/subjects/{subject_id}"))).await
    }

    /// Browse subjects of one type
    pub async fn subjects(
        &self,
        subject_type: SubjectType,
        limit: u32,
        offset: u32,
    ) -> Result<Paged<Value>, RequestError> {
        self.fetch(
            Request::get("/v0/subjects")
                .query("type", subject_type.id())
                .query("limit", limit)
                .query("offset", offset),
        )
        .await
    }

    pub async fn subject_characters(&self, subject_id: u64) -> Result<Vec<Value>, RequestError> {
        self.fetch(Request::get(format!("/v0/subjects/{subject_id}/characters")))
            .await
    }

    pub async fn subject_persons(&self, subject_id: u64) -> Result<Vec<Value>, RequestError> {
        self.fetch(Request::get(format!("/v0/subjects/{subject_id}/persons")))
            .await
    }

    pub async fn subject_relations(&self, subject_id: u64) -> Result<Vec<Value>, RequestError> {
        self.fetch(Request::get(format!("/v0/subjects/{subject_id}/subjects")))
            .await
    }

    pub async fn subject_episodes(&self, subject_id: u64) -> Result<Paged<Value>, RequestError> {
        self.fetch(Request::get("/v0/episodes").query("subject_id", subject_id))
            .await
    }

    pub async fn person(&self, person_id: u64) -> Result<Value, RequestError> {
        self.raw(Request::get(format!("/v0/persons/{person_id}"))).await
    }

    pub async fn character(&self, character_id: u64) -> Result<Value, RequestError> {
        self.raw(Request::get(format!("/v0/characters/{character_id}")))
            .await
    }

    /// A user's collection, optionally filtered by status
    pub async fn user_collections(
        &self,
        username: &str,
        status: Option<&str>,
        limit: u32,
    ) -> Result<Paged<Value>, RequestError> {
        info!(username = username, "Fetching user collections");
        self.fetch(
            Request::get("/v0/users")
                .segment(username)
                .segment("collections")
                .query("limit", limit)
                .query_opt("status", status),
        )
        .await
    }

    /// Index listing (`new`, `hot`, `jk`, `tb`)
    pub async fn index(&self, kind: &str, limit: u32) -> Result<Value, RequestError> {
        self.raw(
            Request::get("/v0/index")
                .segment(kind)
                .query("limit", limit),
        )
        .await
    }
}
