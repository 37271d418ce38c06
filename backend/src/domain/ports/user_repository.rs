//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{DatabaseStatus, User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Required store configuration (the connection string) is missing.
        Configuration { message: String } => "user store configuration missing: {message}",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// A store constraint (such as unique email) rejected the mutation.
        Constraint { message: String } => "user repository constraint violated: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage capability shared by the relational and in-memory adapters.
///
/// Lookups that miss return `Ok(None)` or `Ok(false)`; errors are reserved
/// for store failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every user ordered by ascending identifier.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user, assigning its identifier and creation timestamp.
    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Replace name and email of an existing user.
    async fn update(
        &self,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user, returning whether a record was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Report relational store connectivity; `None` when no relational store
    /// backs the repository.
    async fn probe(&self) -> Option<DatabaseStatus>;
}
