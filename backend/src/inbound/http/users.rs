//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users       {"name":"Ada","email":"ada@example.com"}
//! PUT    /api/v1/users/{id}  {"name":"Ada","email":"ada@example.com"}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! The same handlers are mounted under `/api`. Path identifiers are parsed
//! before the body is decoded, and bodies are validated before any store
//! call.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{Error, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{UserPayload, UserResponse};
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::error::{FIELDS_REQUIRED, INVALID_JSON, INVALID_USER_ID};
use crate::inbound::http::schemas::{MessageEnvelope, UserEnvelope, UserListEnvelope};
use crate::inbound::http::state::HttpState;

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse()
        .map_err(|_| Error::invalid_request(INVALID_USER_ID))
}

fn parse_draft(body: &[u8]) -> Result<UserDraft, Error> {
    let payload =
        UserPayload::from_body(body).map_err(|_| Error::invalid_request(INVALID_JSON))?;
    UserDraft::try_from(payload).map_err(|_| Error::invalid_request(FIELDS_REQUIRED))
}

/// List every user in ascending identifier order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::users::list_users;
///
/// let _app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = UserListEnvelope),
        (status = 500, description = "Failed to fetch users", body = MessageEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users: Vec<UserResponse> = state
        .users
        .list_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Users retrieved successfully", users)))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 400, description = "Invalid user ID", body = MessageEnvelope),
        (status = 404, description = "User not found", body = MessageEnvelope),
        (status = 500, description = "Failed to fetch user", body = MessageEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let user = state.users.get_user(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("User found", UserResponse::from(user))))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created successfully", body = UserEnvelope),
        (status = 400, description = "Invalid JSON data or missing fields", body = MessageEnvelope),
        (status = 500, description = "Failed to create user", body = MessageEnvelope)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let draft = parse_draft(&body)?;
    let user = state.users_command.create_user(draft).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(
        "User created successfully",
        UserResponse::from(user),
    )))
}

/// Replace name and email of an existing user.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated successfully", body = UserEnvelope),
        (status = 400, description = "Invalid user ID, invalid JSON data or missing fields", body = MessageEnvelope),
        (status = 404, description = "User not found", body = MessageEnvelope),
        (status = 500, description = "Failed to update user", body = MessageEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let draft = parse_draft(&body)?;
    let user = state.users_command.update_user(id, draft).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "User updated successfully",
        UserResponse::from(user),
    )))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageEnvelope),
        (status = 400, description = "Invalid user ID", body = MessageEnvelope),
        (status = 404, description = "User not found", body = MessageEnvelope),
        (status = 500, description = "Failed to delete user", body = MessageEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::done("User deleted successfully")))
}
