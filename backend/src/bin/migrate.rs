//! Create the users table and seed sample data, then exit.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::{DefaultEnv, Env};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_service::config::SampleDataSettings;
use user_service::domain::sample_user_drafts;
use user_service::outbound::persistence::{DieselUserRepository, PoolConfig};

/// `user-service-migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "user-service-migrate",
    about = "Create the users table and seed sample users into an empty store",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Only create the table; never insert sample users.
    #[arg(long = "skip-seed")]
    skip_seed: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let database_url = resolve_database_url(args.database_url, &DefaultEnv::new())?;

    let repository = DieselUserRepository::connect(PoolConfig::new(database_url))
        .await
        .wrap_err("connect to user store")?;
    repository
        .ensure_schema()
        .await
        .wrap_err("create users table")?;
    info!("users table ready");

    if args.skip_seed || !SampleDataSettings::load_or_default().enabled() {
        info!("sample data skipped");
        return Ok(());
    }

    match repository.seed_if_empty(&sample_user_drafts()).await {
        Ok(inserted) => info!(inserted, "sample data applied"),
        Err(err) => warn!(error = %err, "failed to seed sample users"),
    }
    Ok(())
}

fn resolve_database_url<E: Env>(explicit: Option<String>, env: &E) -> Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(eyre!("--database-url must not be empty when provided"));
        }
        return Ok(value);
    }

    let from_env = env
        .string("DATABASE_URL")
        .ok_or_else(|| eyre!("database URL missing: set --database-url or DATABASE_URL"))?;
    if from_env.trim().is_empty() {
        return Err(eyre!("DATABASE_URL must not be empty"));
    }
    Ok(from_env)
}
