//! Request and response bodies for the HTTP adapter.
//!
//! Domain types stay serde-free; these DTOs own the wire shape.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{HealthReport, User, UserDraft, UserValidationError};

/// User as rendered in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    /// RFC 3339 creation timestamp with second precision.
    #[schema(example = "2024-05-01T12:00:00Z")]
    pub created: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let created = user.created_rfc3339();
        Self {
            id: user.id().get(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            created,
        }
    }
}

/// Body accepted by create and update.
///
/// Absent and `null` fields decode as empty and fail validation rather
/// than decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserPayload {
    #[serde(default)]
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

impl UserPayload {
    /// Decode the first JSON value in `body`; anything after it is ignored.
    ///
    /// Field names match case-insensitively and a bare `null` decodes as an
    /// empty payload.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value = serde_json::Deserializer::from_slice(body)
            .into_iter::<Value>()
            .next()
            .unwrap_or_else(|| Err(serde_json::Error::custom("empty request body")))?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => serde_json::from_value(Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key.to_lowercase(), value))
                    .collect(),
            )),
            other => serde_json::from_value(other),
        }
    }
}

impl TryFrom<UserPayload> for UserDraft {
    type Error = UserValidationError;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        Self::new(
            payload.name.unwrap_or_default(),
            payload.email.unwrap_or_default(),
        )
    }
}

/// Health check payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthPayload {
    #[schema(example = "ok")]
    pub status: String,
    /// `ok`, `error` or `disconnected`; absent without a relational store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "ok")]
    pub database: Option<String>,
    #[schema(example = "2024-05-01T12:00:00Z")]
    pub timestamp: String,
}

impl From<HealthReport> for HealthPayload {
    fn from(report: HealthReport) -> Self {
        Self {
            status: report.status().to_owned(),
            database: report.database.map(|status| status.as_str().to_owned()),
            timestamp: report.timestamp(),
        }
    }
}

/// Root information payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiInfo {
    #[schema(example = "1.0.0")]
    pub version: String,
    #[schema(example = "Visit /api/v1/health for health check")]
    pub docs: String,
}

impl ApiInfo {
    /// Information describing this build.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_owned(),
            docs: "Visit /api/v1/health for health check".to_owned(),
        }
    }
}
