//! User data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

/// Validation errors returned while building user values from raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    EmptyName,
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be an integer"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }
}

/// Validated name and email pair accepted by create and update operations.
///
/// ## Invariants
/// - `name` and `email` are non-empty.
///
/// # Examples
/// ```
/// use user_service::domain::{UserDraft, UserValidationError};
///
/// let draft = UserDraft::new("Ada", "ada@example.com").expect("valid draft");
/// assert_eq!(draft.name(), "Ada");
/// assert_eq!(
///     UserDraft::new("", "ada@example.com"),
///     Err(UserValidationError::EmptyName)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    email: String,
}

impl UserDraft {
    /// Validate and construct a draft.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        let email = email.into();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self { name, email })
    }

    /// Rebuild a draft from values a store has already accepted.
    pub(crate) fn from_stored(name: String, email: String) -> Self {
        Self { name, email }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` and `created` never change after the store assigns them.
/// - `name` and `email` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    created: DateTime<Utc>,
}

impl User {
    /// Build a stored user from a validated draft and store-assigned fields.
    pub fn new(id: UserId, draft: UserDraft, created: DateTime<Utc>) -> Self {
        let UserDraft { name, email } = draft;
        Self {
            id,
            name,
            email,
            created,
        }
    }

    /// Replace name and email, keeping the identifier and creation time.
    #[must_use]
    pub fn with_details(self, draft: UserDraft) -> Self {
        Self::new(self.id, draft, self.created)
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Creation timestamp.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Creation timestamp rendered as RFC 3339 with second precision.
    pub fn created_rfc3339(&self) -> String {
        self.created.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
