//! Steam Web API client.
//!
//! Every method lives at `/{interface}/{method}/{version}/` and takes its
//! arguments, plus the API key, as query parameters.

pub mod client;
pub mod types;

pub use client::SteamClient;
pub use types::*;
