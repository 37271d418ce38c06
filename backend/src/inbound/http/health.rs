//! Health and API information endpoints.

use actix_web::{HttpResponse, get, web};

use crate::inbound::http::dto::{ApiInfo, HealthPayload};
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::schemas::{ApiInfoEnvelope, HealthEnvelope};
use crate::inbound::http::state::HttpState;

/// Report liveness and relational store connectivity. Never fails.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthEnvelope)
    ),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    let report = state.health.check().await;
    HttpResponse::Ok().json(ApiResponse::ok(
        "API is healthy",
        HealthPayload::from(report),
    ))
}

/// Welcome payload served at `/` and `/api`.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome to the User Service API!", body = ApiInfoEnvelope)
    ),
    tags = ["health"],
    operation_id = "apiInfo"
)]
pub async fn api_info() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(
        "Welcome to the User Service API!",
        ApiInfo::current(),
    ))
}
