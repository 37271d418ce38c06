//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Async access goes through `diesel-async` with `bb8` pooling. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay internal; callers
//! only see domain types and [`UserPersistenceError`](crate::domain::ports::UserPersistenceError).
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), user_service::domain::ports::UserPersistenceError> {
//! use user_service::domain::sample_user_drafts;
//! use user_service::outbound::persistence::{ManagedUserStore, PoolConfig};
//!
//! let store = ManagedUserStore::new(
//!     Some(PoolConfig::new("postgres://localhost/users")),
//!     sample_user_drafts(),
//! );
//! store.initialize().await?;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_user_repository;
mod managed_store;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use managed_store::ManagedUserStore;
pub use pool::{DbPool, PoolConfig, PoolError};
