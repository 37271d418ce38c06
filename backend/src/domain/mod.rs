//! Domain primitives, use-case services, and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services that translate store outcomes into
//! transport-agnostic errors.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a stable category.
//! - User / UserDraft / UserId: stored user, validated input, identifier.
//! - UsersService: list/get/create/update/delete use-cases.
//! - HealthService / HealthReport / DatabaseStatus: health reporting.
//! - SAMPLE_USERS: records seeded into an empty store.

pub mod error;
pub mod health;
pub mod ports;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode};
pub use self::health::{DatabaseStatus, HealthReport, HealthService};
pub use self::user::{User, UserDraft, UserId, UserValidationError};
pub use self::users_service::UsersService;

/// Name and email pairs inserted when a store starts out empty.
pub const SAMPLE_USERS: [(&str, &str); 3] = [
    ("John Doe", "john@example.com"),
    ("Jane Smith", "jane@example.com"),
    ("Bob Johnson", "bob@example.com"),
];

/// Validated drafts for [`SAMPLE_USERS`].
///
/// # Examples
/// ```
/// use user_service::domain::sample_user_drafts;
///
/// let drafts = sample_user_drafts();
/// assert_eq!(drafts.len(), 3);
/// assert_eq!(drafts[0].name(), "John Doe");
/// ```
pub fn sample_user_drafts() -> Vec<UserDraft> {
    SAMPLE_USERS
        .iter()
        .filter_map(|(name, email)| UserDraft::new(*name, *email).ok())
        .collect()
}
