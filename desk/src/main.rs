//! Circulation Desk - runs a lending session against the circulation engine.
//!
//! Reads lending defaults from the environment, plays the scripted session
//! and prints the resulting library statistics as JSON.

mod config;
mod error;
mod session;

use crate::config::Config;
use circulation_engine::{CirculationEngine, SystemClock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is unset or blank.
const DEFAULT_LOG_FILTER: &str = "circulation_desk=info,circulation_engine=debug";

fn main() -> error::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_directives(
            std::env::var("RUST_LOG").ok(),
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        loan_days = config.loan_days,
        fine_rate = %config.fine_rate,
        "Opening circulation desk"
    );

    let mut engine = CirculationEngine::with_policy(SystemClock, config.policy());
    let stats = session::run(&mut engine)?;

    println!("{}", serde_json::to_string_pretty(&stats)?);

    tracing::info!(
        total_books = stats.report.total_books,
        borrowed = stats.report.borrowed_books,
        "Desk closed"
    );

    Ok(())
}

/// Filter directives from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
fn log_directives(rust_log: Option<String>) -> String {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}
