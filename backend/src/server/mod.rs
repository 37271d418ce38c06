//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub use metrics::build_metrics;
pub use state_builders::{StartupError, StartupMode, UserStore};

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, guard, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::configure_api;
use crate::inbound::http::error::resource_not_found;
use crate::inbound::http::health::api_info;
use crate::inbound::http::state::HttpState;
use crate::middleware::{Cors, Trace};

/// Assemble the application: both API prefixes, root information, Swagger
/// UI in debug builds, and the 404 envelope for anything else.
///
/// `Trace` wraps `Cors` so preflight responses also carry a trace id.
/// Method guards sit on resources, so an unsupported method falls through
/// to the 404 envelope rather than producing a bare 405.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use user_service::inbound::http::state::HttpState;
/// use user_service::outbound::memory::InMemoryUserRepository;
/// use user_service::server::build_app;
///
/// let clock = Arc::new(DefaultClock);
/// let repository = Arc::new(InMemoryUserRepository::new(clock.clone()));
/// let state = actix_web::web::Data::new(HttpState::from_repository(repository, clock));
/// let _app = build_app(state);
/// ```
pub fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .wrap(Cors)
        .wrap(Trace)
        .service(web::resource(["/", "/api"]).guard(guard::Get()).to(api_info))
        .service(web::scope("/api/v1").configure(configure_api))
        .service(web::scope("/api").configure(configure_api));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(resource_not_found))
}

/// Construct an Actix HTTP server serving `http_state`.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
