//! Lazily connected PostgreSQL user store.
//!
//! The connection slot starts empty. The first operation (or an explicit
//! [`ManagedUserStore::initialize`]) connects, ensures the table exists, and
//! seeds sample data. Failures leave the slot empty so the next request
//! retries.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DatabaseStatus, User, UserDraft, UserId};

use super::diesel_user_repository::DieselUserRepository;
use super::pool::PoolConfig;

/// User store that connects on first use and can be shut down.
pub struct ManagedUserStore {
    config: Option<PoolConfig>,
    seed: Vec<UserDraft>,
    connection: RwLock<Option<Arc<DieselUserRepository>>>,
}

impl ManagedUserStore {
    /// Create a store for `config`. `None` means no connection string was
    /// configured; every operation then fails with a configuration error.
    ///
    /// `seed` is inserted on first connect when the table is empty.
    pub fn new(config: Option<PoolConfig>, seed: Vec<UserDraft>) -> Self {
        Self {
            config,
            seed,
            connection: RwLock::new(None),
        }
    }

    /// Connect, ensure the table exists, and seed an empty table.
    ///
    /// Idempotent once connected.
    pub async fn initialize(&self) -> Result<(), UserPersistenceError> {
        self.repository().await.map(|_| ())
    }

    /// Whether a live pool is currently held.
    pub async fn is_connected(&self) -> bool {
        self.connection.read().await.is_some()
    }

    /// Release the pool. Safe to call when never connected.
    pub async fn shutdown(&self) {
        if self.connection.write().await.take().is_some() {
            info!("user store connection closed");
        }
    }

    async fn repository(&self) -> Result<Arc<DieselUserRepository>, UserPersistenceError> {
        if let Some(repository) = self.connection.read().await.as_ref() {
            return Ok(Arc::clone(repository));
        }

        let mut slot = self.connection.write().await;
        if let Some(repository) = slot.as_ref() {
            return Ok(Arc::clone(repository));
        }

        let config = self.config.clone().ok_or_else(|| {
            UserPersistenceError::configuration("DATABASE_URL environment variable is required")
        })?;
        let repository = DieselUserRepository::connect(config).await?;
        repository.ensure_schema().await?;
        if let Err(err) = repository.seed_if_empty(&self.seed).await {
            warn!(error = %err, "failed to seed sample users");
        }

        let repository = Arc::new(repository);
        *slot = Some(Arc::clone(&repository));
        Ok(repository)
    }
}

#[async_trait]
impl UserRepository for ManagedUserStore {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.repository().await?.list().await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.repository().await?.find_by_id(id).await
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        self.repository().await?.insert(draft).await
    }

    async fn update(
        &self,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.repository().await?.update(id, draft).await
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        self.repository().await?.delete(id).await
    }

    async fn probe(&self) -> Option<DatabaseStatus> {
        match self.repository().await {
            Ok(repository) => repository.probe().await,
            Err(
                err @ (UserPersistenceError::Configuration { .. }
                | UserPersistenceError::Connection { .. }),
            ) => {
                debug!(error = %err, "user store unreachable during probe");
                Some(DatabaseStatus::Disconnected)
            }
            Err(err) => {
                debug!(error = %err, "user store bootstrap failed during probe");
                Some(DatabaseStatus::Error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_user_drafts;

    fn unconfigured() -> ManagedUserStore {
        ManagedUserStore::new(None, sample_user_drafts())
    }

    #[tokio::test]
    async fn initialize_without_connection_string_is_a_configuration_error() {
        let store = unconfigured();

        let err = store.initialize().await.expect_err("missing url");

        assert!(matches!(err, UserPersistenceError::Configuration { .. }));
        assert!(!store.is_connected().await);
    }

    #[tokio::test]
    async fn operations_fail_until_configured() {
        let store = unconfigured();

        assert!(matches!(
            store.list().await,
            Err(UserPersistenceError::Configuration { .. })
        ));
        assert!(matches!(
            store.delete(UserId::new(1)).await,
            Err(UserPersistenceError::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn probe_reports_disconnected_without_connection() {
        let store = unconfigured();

        assert_eq!(store.probe().await, Some(DatabaseStatus::Disconnected));
    }

    #[tokio::test]
    async fn shutdown_is_a_no_op_when_never_connected() {
        let store = unconfigured();

        store.shutdown().await;
        store.shutdown().await;

        assert!(!store.is_connected().await);
    }
}
