//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler of the inbound HTTP layer together
//! with the envelope and payload schemas they return. Paths are documented
//! under `/api/v1`; the same handlers are also served under `/api`.
//!
//! The generated document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::dto::{ApiInfo, HealthPayload, UserPayload, UserResponse};
use crate::inbound::http::schemas::{
    ApiInfoEnvelope, HealthEnvelope, MessageEnvelope, UserEnvelope, UserListEnvelope,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        description = "CRUD operations on users, health reporting, and API information.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::health,
        crate::inbound::http::health::api_info,
    ),
    components(schemas(
        UserResponse,
        UserPayload,
        HealthPayload,
        ApiInfo,
        UserEnvelope,
        UserListEnvelope,
        MessageEnvelope,
        HealthEnvelope,
        ApiInfoEnvelope,
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Health checks and API information")
    )
)]
pub struct ApiDoc;
