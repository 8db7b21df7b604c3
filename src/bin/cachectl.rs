//! Command-line client for the instrumented cache.
//!
//! Talks to the store directly, so it works without the HTTP server running.
//!
//! # Usage
//!
//! ```bash
//! # Store a value and print its key
//! cargo run --bin cachectl -- store "first"
//! cargo run --bin cachectl -- store 42 --kind int
//!
//! # Read it back
//! cargo run --bin cachectl -- get <key> --as str
//!
//! # Show the recorded calls of Cache.store
//! cargo run --bin cachectl -- replay
//!
//! # Fetch a page through the page cache and show its access count
//! cargo run --bin cachectl -- page http://example.com
//! cargo run --bin cachectl -- count http://example.com
//!
//! # Wipe the store
//! cargo run --bin cachectl -- flush
//!
//! # Walk through the whole feature set
//! cargo run --bin cachectl -- demo
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `REDIS_URL` (or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB`),
//! `STORE_BACKEND`, `PAGE_CACHE_TTL_SECONDS`, `FETCH_TIMEOUT_SECONDS`.

use instrumented_cache::application::services::{FetchCache, InstrumentedCache};
use instrumented_cache::config::{self, Config};
use instrumented_cache::domain::entities::StoredValue;
use instrumented_cache::domain::keys::{STORE_OPERATION, inputs_key, outputs_key};
use instrumented_cache::infrastructure::http::HttpFetcher;
use instrumented_cache::infrastructure::store::KeyValueStore;
use instrumented_cache::server::build_store;
use instrumented_cache::utils::page_url::validate_page_url;

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for the instrumented cache.
#[derive(Parser)]
#[command(name = "cachectl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a value under a new random key
    Store {
        /// Value to store
        value: String,

        /// How to interpret the value
        #[arg(short, long, value_enum, default_value_t = Kind::Text)]
        kind: Kind,
    },

    /// Read a stored value
    Get {
        /// Key returned by `store`
        key: String,

        /// How to decode the stored bytes
        #[arg(short = 'a', long = "as", value_enum, default_value_t = Format::Str)]
        format: Format,
    },

    /// Show the recorded calls of an operation
    Replay {
        /// Qualified operation name
        #[arg(short, long, default_value = STORE_OPERATION)]
        operation: String,
    },

    /// Fetch a page through the page cache
    Page {
        /// Absolute HTTP(S) URL
        url: String,
    },

    /// Show how many times a page has been requested
    Count {
        /// Absolute HTTP(S) URL
        url: String,
    },

    /// Remove every key from the store
    Flush {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Store a few values and replay them
    Demo,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Text,
    Int,
    Float,
    /// Base64-encoded binary
    Bytes,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Str,
    Int,
    Float,
    Raw,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let store = build_store(&config).await?;
    let objects = InstrumentedCache::new(store.clone());

    match cli.command {
        Commands::Store { value, kind } => store_value(&objects, value, kind).await?,
        Commands::Get { key, format } => get_value(&objects, &key, format).await?,
        Commands::Replay { operation } => replay(&objects, &operation).await?,
        Commands::Page { url } => fetch_page(&config, store, &url).await?,
        Commands::Count { url } => page_count(&config, store, &url).await?,
        Commands::Flush { yes } => flush(&objects, yes).await?,
        Commands::Demo => demo(&objects, store).await?,
    }

    Ok(())
}

fn parse_value(value: String, kind: Kind) -> Result<StoredValue> {
    let parsed = match kind {
        Kind::Text => StoredValue::Text(value),
        Kind::Int => StoredValue::Int(value.parse().context("Value is not an integer")?),
        Kind::Float => StoredValue::Float(value.parse().context("Value is not a number")?),
        Kind::Bytes => StoredValue::Bytes(
            STANDARD
                .decode(value.as_bytes())
                .context("Value is not valid base64")?,
        ),
    };

    Ok(parsed)
}

async fn store_value(objects: &InstrumentedCache, value: String, kind: Kind) -> Result<()> {
    let value = parse_value(value, kind)?;
    let repr = value.repr();

    let key = objects.store(value).await?;

    println!("{} {}", "✅ Stored".green().bold(), repr.bright_white());
    println!("  Key: {}", key.bright_yellow().bold());

    Ok(())
}

async fn get_value(objects: &InstrumentedCache, key: &str, format: Format) -> Result<()> {
    let rendered = match format {
        Format::Str => objects.get_str(key).await?,
        Format::Int => objects.get_int(key).await?.map(|n| n.to_string()),
        Format::Float => objects.get_float(key).await?.map(|x| x.to_string()),
        Format::Raw => objects.get(key).await?.map(|bytes| STANDARD.encode(bytes)),
    };

    match rendered {
        Some(value) => println!("{}", value),
        None => println!("{} {}", "⚠️  No value under".yellow(), key.cyan()),
    }

    Ok(())
}

/// Prints the recorded calls of `operation`.
///
/// # Output Format
///
/// ```text
/// Cache.store was called 2 times:
/// Cache.store(*("first",)) -> 1c6c5e0e-7a3f-4d7b-9a53-3f6b2b0c9e11
/// Cache.store(*(42,)) -> 5d0f0a83-0b4e-4f4e-8a43-86e0e6f1b7c2
/// ```
async fn replay(objects: &InstrumentedCache, operation: &str) -> Result<()> {
    let history = objects.replay(operation).await?;

    if history.is_empty() {
        println!(
            "{} {}",
            "⚠️  No recorded calls for".yellow(),
            operation.cyan()
        );
        return Ok(());
    }

    println!("{}", history);

    Ok(())
}

fn page_cache(config: &Config, store: Arc<dyn KeyValueStore>) -> Result<FetchCache> {
    let fetcher = HttpFetcher::new(Duration::from_secs(config.fetch_timeout_seconds))
        .context("Failed to build HTTP client")?;

    Ok(FetchCache::new(
        store,
        Arc::new(fetcher),
        config.page_cache_ttl_seconds,
    ))
}

async fn fetch_page(config: &Config, store: Arc<dyn KeyValueStore>, url: &str) -> Result<()> {
    validate_page_url(url)?;

    let pages = page_cache(config, store)?;
    let body = pages.get_page(url).await?;
    let count = pages.access_count(url).await?;

    println!("{}", body);
    eprintln!(
        "{} {} (access #{})",
        "📄".bright_blue(),
        url.cyan(),
        count.to_string().bright_white().bold()
    );

    Ok(())
}

async fn page_count(config: &Config, store: Arc<dyn KeyValueStore>, url: &str) -> Result<()> {
    let pages = page_cache(config, store)?;
    let count = pages.access_count(url).await?;

    println!(
        "  {}: {}",
        url.cyan(),
        count.to_string().bright_green().bold()
    );

    Ok(())
}

/// Flushes the store after confirmation (default: No).
async fn flush(objects: &InstrumentedCache, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove every key from the store?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    objects.flush().await?;

    println!("{}", "✅ Store flushed".green().bold());

    Ok(())
}

/// Flushes the store, stores three values, prints the raw history lists,
/// and replays them.
async fn demo(objects: &InstrumentedCache, store: Arc<dyn KeyValueStore>) -> Result<()> {
    println!("{}", "🧪 Instrumented cache demo".bright_blue().bold());
    println!();

    objects.flush().await?;

    for value in ["first", "second", "third"] {
        let key = objects.store(value).await?;
        println!("  store({:?}) -> {}", value, key.bright_yellow());
    }
    println!();

    let calls = objects.call_count(STORE_OPERATION).await?;
    println!(
        "  {} counter: {}",
        STORE_OPERATION.cyan(),
        calls.to_string().bright_green().bold()
    );

    let inputs = store.lrange(&inputs_key(STORE_OPERATION), 0, -1).await?;
    let outputs = store.lrange(&outputs_key(STORE_OPERATION), 0, -1).await?;
    println!("  {}: {:?}", "inputs".bright_white(), inputs);
    println!("  {}: {:?}", "outputs".bright_white(), outputs);
    println!();

    println!("{}", objects.replay(STORE_OPERATION).await?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_kinds() {
        assert_eq!(
            parse_value("hi".to_string(), Kind::Text).unwrap(),
            StoredValue::Text("hi".to_string())
        );
        assert_eq!(
            parse_value("-3".to_string(), Kind::Int).unwrap(),
            StoredValue::Int(-3)
        );
        assert_eq!(
            parse_value("AAE=".to_string(), Kind::Bytes).unwrap(),
            StoredValue::Bytes(vec![0, 1])
        );
        assert!(parse_value("abc".to_string(), Kind::Int).is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["cachectl", "store", "42", "--kind", "int"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Store {
                kind: Kind::Int,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["cachectl", "replay"]).unwrap();
        match cli.command {
            Commands::Replay { operation } => assert_eq!(operation, STORE_OPERATION),
            _ => panic!("expected replay"),
        }
    }
}
