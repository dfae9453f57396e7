//! Bangumi API example CLI.
//!
//! Prints the current user, the broadcast calendar, a subject search, a
//! user's collection total and one subject's details. Only the current-user
//! lookup is fatal; the other sections are skipped on failure.

use anyhow::{Context, Result};
use bangumi::BangumiClient;
use clap::Parser;
use rest_client::{resolve_credential, ConfigError, FailurePolicy};
use shared::{Config, LogConfig};
use std::path::PathBuf;
use tracing::info;

const DEFAULT_TOKEN_ENV: &str = "BGM_TOKEN";

#[derive(Parser, Debug)]
#[command(author, version, about = "Bangumi API example", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Bangumi access token (overrides the environment variable)
    #[arg(long)]
    token: Option<String>,

    /// Username whose collection to query (defaults to the current user)
    #[arg(long)]
    username: Option<String>,

    /// Search keyword
    #[arg(long, default_value = "Clannad")]
    search: String,

    /// Subject to show in detail
    #[arg(long, default_value_t = 100228)]
    subject: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn section(title: &str) {
    println!("\n{}\n{title}\n{}", "=".repeat(50), "=".repeat(50));
}

fn print_token_guidance(env_var: &str) {
    eprintln!("Error: Bangumi access token is required.");
    eprintln!("Get one at: https://next.bgm.tv/demo/access-token");
    eprintln!("\nUsage:");
    eprintln!("  export {env_var}='your_token'");
    eprintln!("  bangumi");
    eprintln!("\nOr:");
    eprintln!("  bangumi --token 'your_token' --search 'keyword'");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    shared::logging::init(LogConfig::from_settings(&config.logging, "bangumi", args.verbose))?;
    source.report(&args.config);

    let env_var = config
        .bangumi
        .credential_env
        .as_deref()
        .unwrap_or(DEFAULT_TOKEN_ENV);
    let token = resolve_credential(args.token.as_deref(), env_var);

    let bangumi = match BangumiClient::configure(&config.bangumi, token) {
        Ok(client) => client,
        Err(ConfigError::MissingCredential) => {
            print_token_guidance(env_var);
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to create Bangumi client"),
    };

    section("Current User");
    let mut username = None;
    if let Some(me) = FailurePolicy::Fatal.apply("current user", bangumi.me().await)? {
        println!("Username: {}", me.username);
        println!("ID: {}", me.id);
        println!("Nickname: {}", me.nickname.as_deref().unwrap_or("-"));
        username = Some(me.username);
    }

    section("Broadcast Calendar");
    if let Some(calendar) = FailurePolicy::Advisory.apply("calendar", bangumi.calendar().await)? {
        println!("Weekdays: {}", calendar.len());
        for day in calendar.iter().take(2) {
            println!(
                "  {}: {} items",
                day.weekday.en.as_deref().unwrap_or("?"),
                day.items.len()
            );
        }
    }

    section(&format!("Search Subjects: {}", args.search));
    let search = bangumi.search_subjects(&args.search, "rank", None, 5).await;
    if let Some(results) = FailurePolicy::Advisory.apply("subject search", search)? {
        println!("Total: {}", results.total.unwrap_or(0));
        for item in results.data.iter().take(3) {
            println!(
                "  - {} ({}) ID:{}",
                item.name,
                item.name_cn.as_deref().unwrap_or(""),
                item.id
            );
        }
    }

    match args.username.or(username) {
        Some(query_username) => {
            section(&format!("User Collections: {query_username}"));
            let collections = bangumi.user_collections(&query_username, None, 5).await;
            if let Some(collections) = FailurePolicy::Advisory.apply("user collections", collections)? {
                println!("Total: {}", collections.total.unwrap_or(0));
            }
        }
        None => info!("No username available, skipping collections"),
    }

    section(&format!("Subject Details: {}", args.subject));
    let subject = bangumi.subject(args.subject).await;
    if let Some(subject) = FailurePolicy::Advisory.apply("subject details", subject)? {
        println!("Name: {}", subject.name);
        println!("Name CN: {}", subject.name_cn.as_deref().unwrap_or(""));
        println!("Type: {}", subject.subject_type);
        match subject.rating {
            Some(rating) => println!(
                "Rating: {} ({} votes)",
                rating.score.map_or_else(|| "-".to_string(), |s| s.to_string()),
                rating.total.unwrap_or(0)
            ),
            None => println!("Rating: -"),
        }
    }

    Ok(())
}
