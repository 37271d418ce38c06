//! Internal Diesel row structs for the users table.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::{User, UserDraft, UserId};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: Option<NaiveDateTime>,
}

impl UserRow {
    /// Convert into the domain record.
    ///
    /// Rows are validated by the `NOT NULL` constraints, so the draft is
    /// rebuilt without re-running validation. A missing timestamp maps to
    /// the Unix epoch.
    pub(crate) fn into_user(self) -> User {
        let created = self
            .created_at
            .map_or(DateTime::<Utc>::UNIX_EPOCH, |ts| ts.and_utc());
        User::new(
            UserId::new(i64::from(self.id)),
            UserDraft::from_stored(self.name, self.email),
            created,
        )
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Changeset struct for replacing name and email.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a UserDraft> for NewUserRow<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            name: draft.name(),
            email: draft.email(),
        }
    }
}

impl<'a> From<&'a UserDraft> for UserUpdate<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            name: draft.name(),
            email: draft.email(),
        }
    }
}
