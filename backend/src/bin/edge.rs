//! Edge entry-point for short-lived deployments.
//!
//! Startup never fails on store problems: they are logged and the store
//! reconnects lazily on the next request, so health keeps answering with
//! `database: "disconnected"` until the database becomes reachable.

use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_service::config::{SampleDataSettings, ServiceConfig};
use user_service::server::{ServerConfig, StartupMode, UserStore, create_server};

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
    let store = UserStore::build(&config, &sample_data, StartupMode::Lenient)
        .await
        .map_err(std::io::Error::other)?;

    info!(addr = %config.bind_addr, "starting user service edge handler");
    let result = match create_server(store.http_state(), ServerConfig::new(config.bind_addr)) {
        Ok(server) => server.await,
        Err(err) => Err(err),
    };

    store.shutdown().await;
    result
}
