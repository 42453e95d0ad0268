//! sid-check - validate session identifiers against a session id configuration.
//!
//! Configuration comes from `SID_*` environment variables; flags override it.

use std::io;

use anyhow::Result;
use clap::Parser;
use sidguard_id::SessionIdConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Prefer RUST_LOG, fall back to SID_LOG_LEVEL.
    let log_level = std::env::var("SID_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());
    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let all_valid = cli.run(
        SessionIdConfig::from_env(),
        io::stdin().lock(),
        &mut io::stdout().lock(),
    )?;
    if !all_valid {
        std::process::exit(1);
    }
    Ok(())
}
