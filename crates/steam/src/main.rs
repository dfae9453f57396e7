//! Steam Web API example CLI.
//!
//! Prints a player summary, owned-game count, Steam level and the current
//! CS2 player count. Each section is skipped on failure.

use anyhow::{Context, Result};
use clap::Parser;
use rest_client::{resolve_credential, ConfigError, FailurePolicy};
use shared::{Config, LogConfig};
use std::path::PathBuf;
use steam::SteamClient;

const DEFAULT_KEY_ENV: &str = "STEAM_API_KEY";
const CS2_APP_ID: u32 = 730;

#[derive(Parser, Debug)]
#[command(author, version, about = "Steam Web API example", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Steam Web API key (overrides the environment variable)
    #[arg(long)]
    key: Option<String>,

    /// Steam ID to query
    #[arg(long, default_value = "76561197960361544")]
    steamid: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn section(title: &str) {
    println!("\n{}\n{title}\n{}", "=".repeat(50), "=".repeat(50));
}

fn print_key_guidance(env_var: &str) {
    eprintln!("Error: Steam API key is required.");
    eprintln!("Get one at: https://steamcommunity.com/dev/apikey");
    eprintln!("\nUsage:");
    eprintln!("  export {env_var}='your_key'");
    eprintln!("  steam");
    eprintln!("\nOr:");
    eprintln!("  steam --key 'your_key' --steamid '76561197960361544'");
}

/// Group digits in thousands: 1234567 -> 1,234,567
fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    shared::logging::init(LogConfig::from_settings(&config.logging, "steam", args.verbose))?;
    source.report(&args.config);

    let env_var = config
        .steam
        .credential_env
        .as_deref()
        .unwrap_or(DEFAULT_KEY_ENV);
    let api_key = resolve_credential(args.key.as_deref(), env_var);

    let steam = match SteamClient::configure(&config.steam, api_key) {
        Ok(client) => client,
        Err(ConfigError::MissingCredential) => {
            print_key_guidance(env_var);
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to create Steam client"),
    };

    let policy = FailurePolicy::Advisory;

    section("Player Summary");
    if let Some(summary) = policy.apply("player summary", steam.player_summaries(&args.steamid).await)? {
        match summary.players.first() {
            Some(player) => {
                println!("Steam ID: {}", player.steamid);
                println!("Persona Name: {}", player.personaname.as_deref().unwrap_or("-"));
                println!("Profile URL: {}", player.profileurl.as_deref().unwrap_or("-"));
                println!("Avatar: {}", player.avatar.as_deref().unwrap_or("-"));
                println!(
                    "Status: {}",
                    player.personastate.map_or_else(|| "-".to_string(), |s| s.to_string())
                );
            }
            None => println!("No player found"),
        }
    }

    section("Owned Games");
    if let Some(games) = policy.apply("owned games", steam.owned_games(&args.steamid, true).await)? {
        println!("Total games owned: {}", games.game_count.unwrap_or(0));
    }

    section("Steam Level");
    if let Some(level) = policy.apply("steam level", steam.steam_level(&args.steamid).await)? {
        println!("Steam Level: {}", level.player_level.unwrap_or(0));
    }

    section("CS2 Current Players");
    if let Some(players) = policy.apply("current players", steam.current_players(CS2_APP_ID).await)? {
        println!(
            "Current CS2 players: {}",
            with_thousands(players.player_count.unwrap_or(0))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1000), "1,000");
        assert_eq!(with_thousands(1_234_567), "1,234,567");
    }
}
