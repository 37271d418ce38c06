//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Besides the CRUD port, the adapter owns the idempotent table bootstrap
//! and sample-data seeding used at startup and by the migrate CLI.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, info};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DatabaseStatus, User, UserDraft, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolConfig};
use super::schema::users;

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (\
    id SERIAL PRIMARY KEY, \
    name VARCHAR(255) NOT NULL, \
    email VARCHAR(255) NOT NULL UNIQUE, \
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP\
)";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

/// Identifiers outside the `SERIAL` range cannot match a row.
fn row_id(id: UserId) -> Option<i32> {
    i32::try_from(id.get()).ok()
}

impl DieselUserRepository {
    /// Create a repository over an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Build a pool for `config` and verify the server answers.
    ///
    /// # Errors
    ///
    /// Returns [`UserPersistenceError::Configuration`] for an empty
    /// connection string and [`UserPersistenceError::Connection`] when the
    /// server cannot be reached.
    pub async fn connect(config: PoolConfig) -> Result<Self, UserPersistenceError> {
        if config.database_url().trim().is_empty() {
            return Err(UserPersistenceError::configuration(
                "database connection string is empty",
            ));
        }
        let pool = DbPool::new(config).await.map_err(map_pool_error)?;
        let repository = Self::new(pool);
        repository.ping().await.map_err(|err| match err {
            UserPersistenceError::Query { message } => UserPersistenceError::connection(message),
            other => other,
        })?;
        info!("connected to user store");
        Ok(repository)
    }

    /// Create the users table when it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query(CREATE_USERS_TABLE)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!("users table ensured");
        Ok(())
    }

    /// Insert `drafts` when the table holds no rows.
    ///
    /// Returns the number of rows inserted. A failed count inserts nothing.
    pub async fn seed_if_empty(&self, drafts: &[UserDraft]) -> Result<usize, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let existing: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if existing > 0 || drafts.is_empty() {
            debug!(existing, "skipping sample data");
            return Ok(0);
        }

        let rows: Vec<NewUserRow<'_>> = drafts.iter().map(NewUserRow::from).collect();
        let inserted = diesel::insert_into(users::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        info!(inserted, "seeded sample users");
        Ok(inserted)
    }

    /// Run `SELECT 1` against the pool.
    pub async fn ping(&self) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let Some(row_id) = row_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(row_id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(UserRow::into_user))
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(draft))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into_user())
    }

    async fn update(
        &self,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError> {
        let Some(row_id) = row_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = diesel::update(users::table.find(row_id))
            .set(UserUpdate::from(draft))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(UserRow::into_user))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let Some(row_id) = row_id(id) else {
            return Ok(false);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(users::table.find(row_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    /// A held pool that cannot answer `SELECT 1` reports `error`;
    /// `disconnected` is reserved for a store that never connected.
    async fn probe(&self) -> Option<DatabaseStatus> {
        match self.ping().await {
            Ok(()) => Some(DatabaseStatus::Ok),
            Err(err) => {
                debug!(error = %err, "user store ping failed");
                Some(DatabaseStatus::Error)
            }
        }
    }
}
