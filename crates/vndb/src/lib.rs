//! VNDB Kana (API v2) client.
//!
//! Most VNDB endpoints are queried by POSTing a JSON document of filters,
//! fields, sort order and result count. No credential is needed for the
//! read-only endpoints used here.

pub mod client;
pub mod filter;

pub use client::{Query, VndbClient};
pub use filter::{parse_filters, FilterError};
