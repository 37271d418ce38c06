//! End-to-end HTTP tests against the fully wired application.
//!
//! Requests go through `build_app`, so routing under both API prefixes, the
//! CORS and trace middleware, root information, and the 404 envelope are all
//! exercised together over the in-memory store.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::test as actix_test;
use actix_web::web;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use user_service::domain::sample_user_drafts;
use user_service::inbound::http::state::HttpState;
use user_service::middleware::trace::TRACE_ID_HEADER;
use user_service::outbound::memory::InMemoryUserRepository;
use user_service::server::build_app;
use uuid::Uuid;

// -----------------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------------

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

#[fixture]
fn seeded_state() -> web::Data<HttpState> {
    let clock = Arc::new(FixtureClock);
    let repository = Arc::new(InMemoryUserRepository::seeded(
        clock.clone(),
        sample_user_drafts(),
    ));
    web::Data::new(HttpState::from_repository(repository, clock))
}

async fn call(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: actix_test::TestRequest,
) -> ServiceResponse {
    actix_test::call_service(app, request.to_request()).await
}

fn header(response: &ServiceResponse, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[rstest]
#[case("/api/v1")]
#[case("/api")]
#[actix_web::test]
async fn both_prefixes_serve_the_same_users(
    seeded_state: web::Data<HttpState>,
    #[case] prefix: &str,
) {
    let app = actix_test::init_service(build_app(seeded_state)).await;

    let response = call(
        &app,
        actix_test::TestRequest::get().uri(&format!("{prefix}/users")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Users retrieved successfully"));
    assert_eq!(
        body["data"][0],
        json!({
            "id": 1,
            "name": "John Doe",
            "email": "john@example.com",
            "created": "2024-05-01T12:00:00Z"
        })
    );
}

#[rstest]
#[actix_web::test]
async fn writes_through_one_prefix_are_visible_through_the_other(
    seeded_state: web::Data<HttpState>,
) {
    let app = actix_test::init_service(build_app(seeded_state)).await;

    let created = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "Ada", "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(created).await;
    assert_eq!(created["data"]["id"], json!(4));

    let fetched = call(&app, actix_test::TestRequest::get().uri("/api/v1/users/4")).await;
    let fetched: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(fetched["data"]["name"], json!("Ada"));
}

#[rstest]
#[case("/api/v1/health")]
#[case("/api/health")]
#[actix_web::test]
async fn health_omits_database_for_in_memory_store(
    seeded_state: web::Data<HttpState>,
    #[case] path: &str,
) {
    let app = actix_test::init_service(build_app(seeded_state)).await;

    let response = call(&app, actix_test::TestRequest::get().uri(path)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("API is healthy"));
    assert_eq!(body["data"]["status"], json!("ok"));
    assert!(body["data"].get("database").is_none());
}

#[rstest]
#[case("/")]
#[case("/api")]
#[actix_web::test]
async fn root_information_is_served(seeded_state: web::Data<HttpState>, #[case] path: &str) {
    let app = actix_test::init_service(build_app(seeded_state)).await;

    let response = call(&app, actix_test::TestRequest::get().uri(path)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("Welcome to the User Service API!"));
    assert_eq!(body["data"]["version"], json!(env!("CARGO_PKG_VERSION")));
    assert_eq!(
        body["data"]["docs"],
        json!("Visit /api/v1/health for health check")
    );
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/nope"))]
#[case(actix_test::TestRequest::get().uri("/api/v1/unknown"))]
#[case(actix_test::TestRequest::get().uri("/api/v2/users"))]
#[case(actix_test::TestRequest::patch().uri("/api/v1/users/1"))]
#[case(actix_test::TestRequest::post().uri("/api"))]
#[actix_web::test]
async fn unmatched_requests_get_the_not_found_envelope(
    seeded_state: web::Data<HttpState>,
    #[case] request: actix_test::TestRequest,
) {
    let app = actix_test::init_service(build_app(seeded_state)).await;

    let response = call(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        header(&response, "access-control-allow-origin").as_deref(),
        Some("*")
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({"success": false, "message": "Resource not found"})
    );
}

#[rstest]
#[case("/api/v1/users")]
#[case("/api/users/1")]
#[case("/anything/at/all")]
#[actix_web::test]
async fn preflight_is_answered_for_any_path(
    seeded_state: web::Data<HttpState>,
    #[case] path: &str,
) {
    let app = actix_test::init_service(build_app(seeded_state)).await;

    let response = call(
        &app,
        actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri(path),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "access-control-allow-methods").as_deref(),
        Some("GET, POST, PUT, DELETE, OPTIONS")
    );
    assert_eq!(
        header(&response, "access-control-allow-headers").as_deref(),
        Some("Content-Type, Authorization")
    );
    assert!(header(&response, TRACE_ID_HEADER).is_some());
    assert!(actix_test::read_body(response).await.is_empty());
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_cors_and_trace_headers(seeded_state: web::Data<HttpState>) {
    let app = actix_test::init_service(build_app(seeded_state)).await;

    let response = call(&app, actix_test::TestRequest::get().uri("/api/v1/users/abc")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        header(&response, "access-control-allow-origin").as_deref(),
        Some("*")
    );
    let trace_id = header(&response, TRACE_ID_HEADER).expect("trace id header");
    assert!(Uuid::parse_str(&trace_id).is_ok());
}

#[rstest]
#[actix_web::test]
async fn rejected_requests_leave_the_store_untouched(seeded_state: web::Data<HttpState>) {
    let app = actix_test::init_service(build_app(seeded_state)).await;

    for request in [
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{broken"),
        actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "", "email": "x@example.com"})),
        actix_test::TestRequest::put()
            .uri("/api/v1/users/1")
            .set_json(json!({"name": "Only name"})),
        actix_test::TestRequest::delete().uri("/api/users/zero"),
    ] {
        let response = call(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = call(&app, actix_test::TestRequest::get().uri("/api/v1/users")).await;
    let body: Value = actix_test::read_body_json(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .expect("user list")
        .iter()
        .filter_map(|user| user["name"].as_str())
        .collect();
    assert_eq!(names, vec!["John Doe", "Jane Smith", "Bob Johnson"]);
}
