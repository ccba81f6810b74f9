//! Insert synthetic vitals readings into the database.
//!
//! # Examples
//! ```sh
//! cargo run --manifest-path backend/Cargo.toml --bin seed-vitals -- --count 50
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use example_data::{DEFAULT_BULK_COUNT, MAX_BULK_COUNT};
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

use vitals_backend::domain::VitalsService;
use vitals_backend::domain::ports::{VitalsCommand, VitalsRepository};
use vitals_backend::outbound::persistence::{
    DbPool, DieselVitalsRepository, PoolConfig, run_pending_migrations,
};

/// `seed-vitals` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-vitals",
    about = "Insert synthetic vital-sign readings spread over the last 24 hours",
    version
)]
struct CliArgs {
    /// Number of readings to insert.
    #[arg(
        long,
        value_name = "n",
        default_value_t = DEFAULT_BULK_COUNT,
        value_parser = parse_count
    )]
    count: usize,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        eprintln!("tracing init failed: {error}");
    }
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url, env::var("DATABASE_URL").ok())?;
    run_pending_migrations(&database_url)
        .await
        .wrap_err("apply migrations")?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .wrap_err("create database pool")?;

    let repository = Arc::new(DieselVitalsRepository::new(pool));
    let before = repository.count().await.wrap_err("count readings")?;
    let service = VitalsService::new(repository.clone(), Arc::new(DefaultClock));
    let inserted = service
        .seed_synthetic(args.count)
        .await
        .map_err(|error| eyre!("seeding failed: {error}"))?;
    let after = repository.count().await.wrap_err("count readings")?;

    println!("before={before}");
    println!("inserted={inserted}");
    println!("after={after}");
    Ok(())
}

fn parse_count(raw: &str) -> Result<usize, String> {
    let count = raw
        .trim()
        .parse::<usize>()
        .map_err(|error| format!("count must be a whole number: {error}"))?;
    if (1..=MAX_BULK_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(format!("count must be between 1 and {MAX_BULK_COUNT}"))
    }
}

fn resolve_database_url(explicit: Option<String>, from_env: Option<String>) -> Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(eyre!("--database-url must not be empty when provided"));
        }
        return Ok(value);
    }
    match from_env {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(eyre!("DATABASE_URL must not be empty")),
        None => Err(eyre!(
            "database URL missing: set --database-url or DATABASE_URL"
        )),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1", 1)]
    #[case(" 50 ", 50)]
    #[case("1000", 1000)]
    fn count_parser_accepts_batch_sizes(#[case] raw: &str, #[case] expected: usize) {
        assert_eq!(parse_count(raw), Ok(expected));
    }

    #[rstest]
    #[case("0")]
    #[case("1001")]
    #[case("many")]
    fn count_parser_rejects_out_of_range_values(#[case] raw: &str) {
        assert!(parse_count(raw).is_err());
    }

    #[rstest]
    fn count_defaults_to_fifty() {
        let args = CliArgs::try_parse_from(["seed-vitals"]).expect("defaults parse");
        assert_eq!(args.count, 50);
        assert!(args.database_url.is_none());
    }

    #[rstest]
    fn explicit_url_wins_over_environment() {
        let url = resolve_database_url(
            Some("postgres://cli/vitals".to_owned()),
            Some("postgres://env/vitals".to_owned()),
        )
        .expect("explicit url");
        assert_eq!(url, "postgres://cli/vitals");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(" "), None)]
    #[case(None, Some(""))]
    fn missing_or_blank_urls_are_rejected(
        #[case] explicit: Option<&str>,
        #[case] from_env: Option<&str>,
    ) {
        let result = resolve_database_url(explicit.map(str::to_owned), from_env.map(str::to_owned));
        assert!(result.is_err());
    }
}
