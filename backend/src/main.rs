//! Standalone server entry-point.
//!
//! Startup is strict: with the PostgreSQL store the connection string must be
//! set and the database reachable before the listener binds.

use mockable::DefaultEnv;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_service::config::{SampleDataSettings, ServiceConfig};
#[cfg(feature = "metrics")]
use user_service::server::build_metrics;
use user_service::server::{ServerConfig, StartupMode, UserStore, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServiceConfig::from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    let sample_data = SampleDataSettings::load_or_default();

    let store = match UserStore::build(&config, &sample_data, StartupMode::Strict).await {
        Ok(store) => store,
        Err(err) => {
            error!(error = %err, "startup aborted");
            return Err(std::io::Error::other(err));
        }
    };

    let server_config = ServerConfig::new(config.bind_addr);
    #[cfg(feature = "metrics")]
    let server_config = server_config.with_metrics(Some(build_metrics()?));

    info!(addr = %config.bind_addr, "starting user service");
    let result = match create_server(store.http_state(), server_config) {
        Ok(server) => server.await,
        Err(err) => Err(err),
    };

    store.shutdown().await;
    result
}
