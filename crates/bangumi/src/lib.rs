//! Bangumi API v0 client.
//!
//! Typed wrapper over [`rest_client::RestClient`] for the Bangumi anime, book,
//! music and game database. Requests carry the access token as a bearer
//! header, except the public broadcast calendar.

pub mod client;
pub mod types;

pub use client::BangumiClient;
pub use types::*;
