//! OpenAPI schema definitions for response envelopes.
//!
//! [`ApiResponse`](super::envelope::ApiResponse) is generic; these concrete
//! wrappers mirror each instantiation the handlers return so the document
//! lists one named schema per payload shape.

use utoipa::ToSchema;

use super::dto::{ApiInfo, HealthPayload, UserResponse};

/// Envelope carrying a single user.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserEnvelope {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "User found")]
    message: String,
    data: UserResponse,
}

/// Envelope carrying every user.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserListEnvelope {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "Users retrieved successfully")]
    message: String,
    data: Vec<UserResponse>,
}

/// Envelope without a payload, used for failures and deletes.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct MessageEnvelope {
    #[schema(example = false)]
    success: bool,
    #[schema(example = "User not found")]
    message: String,
}

/// Envelope carrying the health payload.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct HealthEnvelope {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "API is healthy")]
    message: String,
    data: HealthPayload,
}

/// Envelope carrying API information.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ApiInfoEnvelope {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "Welcome to the User Service API!")]
    message: String,
    data: ApiInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn property_names(schema: RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(object)) => object.properties.keys().cloned().collect(),
            _ => panic!("expected inline object schema"),
        }
    }

    #[rstest]
    fn message_envelope_has_no_data() {
        assert_eq!(property_names(MessageEnvelope::schema()), vec!["message", "success"]);
    }

    #[rstest]
    fn user_envelope_has_data() {
        assert!(property_names(UserEnvelope::schema()).contains(&"data".to_owned()));
    }
}
