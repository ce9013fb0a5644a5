//! Command-line companion for the seamlink middleware.
//!
//! Lets you inspect what the middleware does without running a server.
//!
//! # Usage
//!
//! ```bash
//! # Print the injected script
//! cargo run --bin seamlink-cli -- script
//!
//! # Show a page as the middleware would serve it
//! cargo run --bin seamlink-cli -- inject page.html
//!
//! # Validate a captured tracking payload
//! cargo run --bin seamlink-cli -- check click payload.json
//! ```

use seamlink::domain::events::{LinkClick, PageVisit, decode_event};
use seamlink::utils::extract_domain::{extract_host, is_excluded_url, normalize_domain};
use seamlink::utils::html_injector::{BODY_CLOSE_TAG, inject_script};
use seamlink::utils::tracking_script::TRACKING_SCRIPT;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::collections::HashSet;
use std::path::PathBuf;

/// CLI tool for inspecting seamlink behavior.
#[derive(Parser)]
#[command(name = "seamlink-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the tracking script
    Script,

    /// Print an HTML file with the tracking script injected
    Inject {
        /// HTML file to read
        file: PathBuf,
    },

    /// Validate a JSON tracking payload
    Check {
        /// Endpoint the payload was meant for
        #[arg(value_enum)]
        kind: EventKind,

        /// JSON file to read
        file: PathBuf,

        /// Domains treated as excluded (repeatable)
        #[arg(long = "exclude")]
        excluded: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EventKind {
    Click,
    Pageview,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Script => {
            println!("{}", TRACKING_SCRIPT.trim());
            Ok(())
        }
        Commands::Inject { file } => inject(file),
        Commands::Check {
            kind,
            file,
            excluded,
        } => check(kind, file, excluded),
    }
}

fn inject(file: PathBuf) -> Result<()> {
    let html = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    match inject_script(&html, TRACKING_SCRIPT) {
        Some(modified) => print!("{modified}"),
        None => {
            eprintln!(
                "{} no {} tag found, page would be served unchanged",
                "⚠".yellow(),
                BODY_CLOSE_TAG
            );
            print!("{html}");
        }
    }

    Ok(())
}

fn check(kind: EventKind, file: PathBuf, excluded: Vec<String>) -> Result<()> {
    let raw = std::fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;

    let (url, referrer, user_agent, timestamp) = match kind {
        EventKind::Click => {
            let LinkClick {
                url,
                referrer,
                user_agent,
                timestamp,
            } = decode_event::<LinkClick>(&raw).map_err(|e| report_invalid(&e.to_string()))?;
            (url, referrer, user_agent, timestamp)
        }
        EventKind::Pageview => {
            let PageVisit {
                url,
                referrer,
                user_agent,
                timestamp,
            } = decode_event::<PageVisit>(&raw).map_err(|e| report_invalid(&e.to_string()))?;
            (url, referrer, user_agent, timestamp)
        }
    };

    println!("{}", "✓ Payload is valid".green().bold());
    println!("  URL:        {}", url.cyan());
    println!("  Host:       {}", extract_host(&url).unwrap_or_else(|| "-".to_string()));
    println!("  Referrer:   {}", display_or_unknown(&referrer));
    println!("  User agent: {}", display_or_unknown(&user_agent));
    println!("  Timestamp:  {}", timestamp.to_rfc3339());

    let excluded: HashSet<String> = excluded.iter().filter_map(|d| normalize_domain(d)).collect();
    if is_excluded_url(&url, &excluded) {
        println!(
            "{}",
            "  Excluded:   yes (accepted but not forwarded to the sink)".yellow()
        );
    }

    Ok(())
}

fn report_invalid(reason: &str) -> anyhow::Error {
    eprintln!("{} {}", "✗ Invalid payload:".red().bold(), reason);
    anyhow::anyhow!("payload rejected, the endpoint would answer 400")
}

fn display_or_unknown(value: &str) -> String {
    if value.is_empty() {
        "(unknown)".dimmed().to_string()
    } else {
        value.to_string()
    }
}
