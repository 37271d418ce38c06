//! HTTP inbound adapter exposing the users REST API.

use actix_web::web;

pub mod dto;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;

pub use error::ApiResult;

/// Register the health and users endpoints relative to the enclosing scope.
///
/// Mounted once per API prefix so `/api/v1` and `/api` serve identical
/// handlers.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use user_service::inbound::http::configure_api;
///
/// let _app = App::new()
///     .service(web::scope("/api/v1").configure(configure_api))
///     .service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user);
}
