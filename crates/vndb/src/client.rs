//! VNDB Kana endpoints.

use chrono::NaiveDate;
use rest_client::{AuthMode, ConfigError, Request, RequestError, RestClient};
use serde_json::{json, Value};
use shared::ApiConfig;
use tracing::{debug, info};

pub const CHARACTER_FIELDS: &str = "name,original,image.url,description,vns.title";
pub const VN_FIELDS: &str = "title,alttitle,image.url,rating,released,developers.name";
pub const VN_DETAIL_FIELDS: &str =
    "title,alttitle,image.url,rating,description,released,developers.name";
pub const LATEST_FIELDS: &str = "title,alttitle,released,developers.name,rating,votecount";
pub const USER_FIELDS: &str = "lengthvotes,lengthvotes_sum";

/// A POST query document
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub filters: Value,
    /// Comma-separated field list
    pub fields: String,
    pub sort: Option<String>,
    pub reverse: bool,
    pub results: Option<u32>,
}

impl Query {
    pub fn new(filters: Value, fields: impl Into<String>) -> Self {
        Self {
            filters,
            fields: fields.into(),
            sort: None,
            reverse: false,
            results: None,
        }
    }

    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }

    /// JSON body; `sort`, `reverse` and `results` only appear when set
    pub fn to_body(&self) -> Value {
        let mut body = json!({"filters": self.filters, "fields": self.fields});
        if let Some(sort) = &self.sort {
            body["sort"] = json!(sort);
        }
        if self.reverse {
            body["reverse"] = json!(true);
        }
        if let Some(results) = self.results {
            body["results"] = json!(results);
        }
        body
    }
}

/// VNDB Kana client
pub struct VndbClient {
    client: RestClient,
}

impl VndbClient {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub fn configure(api: &ApiConfig) -> Result<Self, ConfigError> {
        let client = RestClient::configure(api.client_config(AuthMode::None, None))?;
        Ok(Self::new(client))
    }

    /// POST `query` to `/{endpoint}`
    pub async fn query(&self, endpoint: &str, query: &Query) -> Result<Value, RequestError> {
        debug!(endpoint = endpoint, body = %query.to_body(), "Querying endpoint");
        let response = self
            .client
            .call(&Request::post(endpoint, query.to_body()))
            .await?;
        Ok(response.into_body())
    }

    pub async fn search_characters(
        &self,
        keyword: &str,
        fields: &str,
        results: u32,
    ) -> Result<Value, RequestError> {
        info!(keyword = keyword, "Searching characters");
        let query = Query::new(json!(["search", "=", keyword]), fields).results(results);
        self.query("character", &query).await
    }

    pub async fn search_vns(
        &self,
        keyword: &str,
        fields: &str,
        results: u32,
    ) -> Result<Value, RequestError> {
        info!(keyword = keyword, "Searching visual novels");
        let query = Query::new(json!(["search", "=", keyword]), fields).results(results);
        self.query("vn", &query).await
    }

    /// Look up a visual novel by ID, e.g. `v17`
    pub async fn vn_by_id(&self, vn_id: &str, fields: &str) -> Result<Value, RequestError> {
        info!(vn_id = vn_id, "Querying VN");
        self.query("vn", &Query::new(json!(["id", "=", vn_id]), fields))
            .await
    }

    /// Most recently released visual novels on or after `since`
    pub async fn latest(
        &self,
        since: NaiveDate,
        results: u32,
        fields: &str,
    ) -> Result<Value, RequestError> {
        info!(since = %since, results = results, "Fetching latest releases");
        let query = Query::new(
            json!(["released", ">=", since.format("%Y-%m-%d").to_string()]),
            fields,
        )
        .sort("released")
        .reverse()
        .results(results);
        self.query("vn", &query).await
    }

    pub async fn stats(&self) -> Result<Value, RequestError> {
        info!("Fetching database statistics");
        Ok(self.client.get("stats").await?.into_body())
    }

    pub async fn user(&self, username: &str, fields: &str) -> Result<Value, RequestError> {
        info!(username = username, "Querying user");
        let request = Request::get("user").query("q", username).query("fields", fields);
        Ok(self.client.call(&request).await?.into_body())
    }

    pub async fn schema(&self) -> Result<Value, RequestError> {
        info!("Fetching API schema");
        Ok(self.client.get("schema").await?.into_body())
    }
}
