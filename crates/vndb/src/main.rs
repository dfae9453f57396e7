//! VNDB query CLI.
//!
//! Each subcommand issues one request and prints the JSON response. Any
//! failure ends the run with a non-zero exit status.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::Value;
use shared::{Config, LogConfig};
use std::path::PathBuf;
use vndb::client::{CHARACTER_FIELDS, LATEST_FIELDS, USER_FIELDS, VN_DETAIL_FIELDS, VN_FIELDS};
use vndb::{parse_filters, Query, VndbClient};

#[derive(Parser, Debug)]
#[command(author, version, about = "VNDB API v2 (Kana) query tool", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search characters
    Character {
        keyword: String,
        #[arg(default_value = CHARACTER_FIELDS)]
        fields: String,
        #[arg(default_value_t = 20)]
        count: u32,
    },
    /// Search visual novels
    Vn {
        keyword: String,
        #[arg(default_value = VN_FIELDS)]
        fields: String,
        #[arg(default_value_t = 10)]
        count: u32,
    },
    /// Get a visual novel by ID (e.g. v17)
    VnId {
        id: String,
        #[arg(default_value = VN_DETAIL_FIELDS)]
        fields: String,
    },
    /// Latest releases
    Latest {
        #[arg(default_value_t = 5)]
        count: u32,
        #[arg(default_value = LATEST_FIELDS)]
        fields: String,
        /// Earliest release date to include
        #[arg(long, default_value = "2024-01-01")]
        since: NaiveDate,
    },
    /// Database statistics
    Stats,
    /// Query a user
    User {
        username: String,
        #[arg(default_value = USER_FIELDS)]
        fields: String,
    },
    /// API schema
    Schema,
    /// Generic query against any endpoint
    Query {
        endpoint: String,
        /// `key:value` or a JSON filter array
        filters: String,
        fields: String,
        #[arg(default_value = "id")]
        sort: String,
        #[arg(default_value_t = 10)]
        results: u32,
    },
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    shared::logging::init(LogConfig::from_settings(&config.logging, "vndb", args.verbose))?;
    source.report(&args.config);

    let vndb = VndbClient::configure(&config.vndb).context("Failed to create VNDB client")?;

    let response = match args.command {
        Command::Character {
            keyword,
            fields,
            count,
        } => vndb.search_characters(&keyword, &fields, count).await,
        Command::Vn {
            keyword,
            fields,
            count,
        } => vndb.search_vns(&keyword, &fields, count).await,
        Command::VnId { id, fields } => vndb.vn_by_id(&id, &fields).await,
        Command::Latest {
            count,
            fields,
            since,
        } => vndb.latest(since, count, &fields).await,
        Command::Stats => vndb.stats().await,
        Command::User { username, fields } => vndb.user(&username, &fields).await,
        Command::Schema => vndb.schema().await,
        Command::Query {
            endpoint,
            filters,
            fields,
            sort,
            results,
        } => {
            let filters = parse_filters(&filters)?;
            let query = Query::new(filters, fields).sort(sort).results(results);
            eprintln!("Querying endpoint: {endpoint}");
            eprintln!("Request: {}", query.to_body());
            vndb.query(&endpoint, &query).await
        }
    };

    print_json(&response.context("VNDB request failed")?)
}
