//! Store selection and HTTP state construction for the server binaries.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use crate::config::{ConfigError, SampleDataSettings, ServiceConfig, StorageBackend};
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{UserDraft, sample_user_drafts};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::persistence::ManagedUserStore;

/// How store failures are treated while starting up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupMode {
    /// Missing configuration or an unreachable store aborts startup.
    Strict,
    /// Failures are logged; the store reconnects on the next request.
    Lenient,
}

/// Errors that abort a strict startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialise user store: {0}")]
    Store(#[from] UserPersistenceError),
}

/// The repository serving requests plus the lazily connected store behind
/// it, when one is in use.
#[derive(Clone)]
pub struct UserStore {
    repository: Arc<dyn UserRepository>,
    managed: Option<Arc<ManagedUserStore>>,
}

impl UserStore {
    /// Select and prepare the backing store described by `config`.
    ///
    /// # Errors
    /// In [`StartupMode::Strict`], returns [`StartupError::Config`] when
    /// `DATABASE_URL` is absent for the PostgreSQL backend and
    /// [`StartupError::Store`] when the first connection fails. Lenient
    /// startup never fails.
    pub async fn build(
        config: &ServiceConfig,
        sample_data: &SampleDataSettings,
        mode: StartupMode,
    ) -> Result<Self, StartupError> {
        let seed = seed_drafts(sample_data);
        match config.backend {
            StorageBackend::Memory => {
                info!(seeded = seed.len(), "using in-memory user store");
                let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
                Ok(Self {
                    repository: Arc::new(InMemoryUserRepository::seeded(clock, seed)),
                    managed: None,
                })
            }
            StorageBackend::Postgres => {
                if mode == StartupMode::Strict {
                    config.require_database_url()?;
                }
                let store = Arc::new(ManagedUserStore::new(config.pool_config(), seed));
                match store.initialize().await {
                    Ok(()) => info!("user store initialised"),
                    Err(err) if mode == StartupMode::Strict => return Err(err.into()),
                    Err(err) => warn!(error = %err, "user store unavailable; retrying on demand"),
                }
                Ok(Self {
                    repository: store.clone(),
                    managed: Some(store),
                })
            }
        }
    }

    /// Wrap an existing repository, for example in tests.
    pub fn from_repository(repository: Arc<dyn UserRepository>) -> Self {
        Self {
            repository,
            managed: None,
        }
    }

    /// Shared repository handle.
    pub fn repository(&self) -> Arc<dyn UserRepository> {
        Arc::clone(&self.repository)
    }

    /// Build the handler state over this store.
    pub fn http_state(&self) -> web::Data<HttpState> {
        web::Data::new(HttpState::from_repository(
            self.repository(),
            Arc::new(DefaultClock),
        ))
    }

    /// Release the database pool, if one was opened.
    pub async fn shutdown(&self) {
        if let Some(store) = &self.managed {
            store.shutdown().await;
        }
    }
}

fn seed_drafts(settings: &SampleDataSettings) -> Vec<UserDraft> {
    if settings.enabled() {
        sample_user_drafts()
    } else {
        Vec::new()
    }
}
