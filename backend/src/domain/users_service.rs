//! User use-cases over the [`UserRepository`] port.
//!
//! The service owns the mapping from persistence outcomes to domain errors:
//! misses become [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound),
//! while store failures are logged and surfaced with a generic,
//! operation-specific message.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserId};

const USER_NOT_FOUND: &str = "User not found";
const CONNECTION_FAILED: &str = "Database connection failed";

/// Users use-case service backed by a repository adapter.
#[derive(Clone)]
pub struct UsersService {
    repository: Arc<dyn UserRepository>,
}

impl UsersService {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(err: UserPersistenceError, operation: &'static str) -> Error {
    match err {
        UserPersistenceError::Configuration { message }
        | UserPersistenceError::Connection { message } => {
            warn!(%message, operation, "user store unavailable");
            Error::internal(CONNECTION_FAILED)
        }
        UserPersistenceError::Constraint { message } => {
            warn!(%message, operation, "user store rejected mutation");
            Error::internal(operation)
        }
        UserPersistenceError::Query { message } => {
            error!(%message, operation, "user store query failed");
            Error::internal(operation)
        }
    }
}

#[async_trait]
impl UsersQuery for UsersService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| map_persistence_error(err, "Failed to fetch users"))
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| map_persistence_error(err, "Failed to fetch user"))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl UsersCommand for UsersService {
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        self.repository
            .insert(&draft)
            .await
            .map_err(|err| map_persistence_error(err, "Failed to create user"))
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error> {
        self.repository
            .update(id, &draft)
            .await
            .map_err(|err| map_persistence_error(err, "Failed to update user"))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(|err| map_persistence_error(err, "Failed to delete user"))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(USER_NOT_FOUND))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for persistence error mapping.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn draft() -> UserDraft {
        UserDraft::new("Ada", "ada@example.com").expect("valid draft")
    }

    fn stored(id: i64) -> User {
        let created = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        User::new(UserId::new(id), draft(), created)
    }

    fn service(repository: MockUserRepository) -> UsersService {
        UsersService::new(Arc::new(repository))
    }

    #[derive(Clone, Copy)]
    enum StubFailure {
        Configuration,
        Connection,
        Constraint,
        Query,
    }

    impl StubFailure {
        fn to_error(self) -> UserPersistenceError {
            match self {
                Self::Configuration => UserPersistenceError::configuration("DATABASE_URL unset"),
                Self::Connection => UserPersistenceError::connection("refused"),
                Self::Constraint => UserPersistenceError::constraint("users_email_key"),
                Self::Query => UserPersistenceError::query("syntax error"),
            }
        }
    }

    #[tokio::test]
    async fn get_user_maps_missing_record_to_not_found() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let err = service(repository)
            .get_user(UserId::new(9))
            .await
            .expect_err("missing user");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "User not found");
    }

    #[tokio::test]
    async fn get_user_returns_stored_record() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(|id| *id == UserId::new(3))
            .times(1)
            .returning(|id| Ok(Some(stored(id.get()))));

        let user = service(repository)
            .get_user(UserId::new(3))
            .await
            .expect("stored user");

        assert_eq!(user.id(), UserId::new(3));
    }

    #[rstest]
    #[case(StubFailure::Configuration, "Database connection failed")]
    #[case(StubFailure::Connection, "Database connection failed")]
    #[case(StubFailure::Constraint, "Failed to create user")]
    #[case(StubFailure::Query, "Failed to create user")]
    #[tokio::test]
    async fn create_user_maps_persistence_failures(
        #[case] failure: StubFailure,
        #[case] expected_message: &str,
    ) {
        let mut repository = MockUserRepository::new();
        repository
            .expect_insert()
            .times(1)
            .returning(move |_| Err(failure.to_error()));

        let err = service(repository)
            .create_user(draft())
            .await
            .expect_err("insert failure");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), expected_message);
    }

    #[rstest]
    #[case(StubFailure::Constraint, "Failed to update user")]
    #[case(StubFailure::Query, "Failed to update user")]
    #[tokio::test]
    async fn update_user_maps_persistence_failures(
        #[case] failure: StubFailure,
        #[case] expected_message: &str,
    ) {
        let mut repository = MockUserRepository::new();
        repository
            .expect_update()
            .times(1)
            .returning(move |_, _| Err(failure.to_error()));

        let err = service(repository)
            .update_user(UserId::new(1), draft())
            .await
            .expect_err("update failure");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), expected_message);
    }

    #[tokio::test]
    async fn update_user_maps_missing_record_to_not_found() {
        let mut repository = MockUserRepository::new();
        repository.expect_update().times(1).returning(|_, _| Ok(None));

        let err = service(repository)
            .update_user(UserId::new(1), draft())
            .await
            .expect_err("missing user");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::NotFound))]
    #[tokio::test]
    async fn delete_user_reports_missing_records(
        #[case] deleted: bool,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut repository = MockUserRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Ok(deleted));

        let result = service(repository).delete_user(UserId::new(1)).await;

        assert_eq!(result.err().map(|err| err.code()), expected);
    }

    #[tokio::test]
    async fn list_users_maps_query_failure() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_list()
            .times(1)
            .returning(|| Err(UserPersistenceError::query("boom")));

        let err = service(repository)
            .list_users()
            .await
            .expect_err("list failure");

        assert_eq!(err.message(), "Failed to fetch users");
    }
}
