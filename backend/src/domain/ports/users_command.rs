//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for creating, updating, and deleting users.
///
/// Each call mutates the backing store at most once.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user from a validated draft.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace name and email of an existing user.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error>;

    /// Delete an existing user.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
