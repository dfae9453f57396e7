//! Bangumi API v0 response types.
//!
//! Only the fields the command-line tool reads are modelled; everything else
//! in a response is ignored.

use serde::{Deserialize, Serialize};

/// Subject category used by `/v0/subjects` browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectType {
    Book = 1,
    Anime = 2,
    Music = 3,
    Game = 4,
    Real = 6,
}

impl SubjectType {
    pub fn id(self) -> u32 {
        self as u32
    }
}

/// A Bangumi user (`/v0/me`, `/v0/users/{username}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub sign: Option<String>,
}

/// Paged list wrapper used by search, browse and collection endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Subject entry in search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub name_cn: Option<String>,
}

/// Full subject details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub name_cn: Option<String>,
    #[serde(rename = "type")]
    pub subject_type: u32,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub rank: Option<u64>,
}

/// One weekday of the broadcast calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub weekday: Weekday,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weekday {
    pub id: u32,
    #[serde(default)]
    pub en: Option<String>,
    #[serde(default)]
    pub cn: Option<String>,
    #[serde(default)]
    pub ja: Option<String>,
}
