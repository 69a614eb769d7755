//! Server construction and middleware wiring.

mod config;

pub use config::{key_fingerprint, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

#[cfg(debug_assertions)]
use registrar::doc::ApiDoc;
use registrar::domain::{
    AccountService, CatalogService, EnrollmentLedgerService, Error, TokenIssuer,
};
use registrar::inbound::http::auth::{login, register};
use registrar::inbound::http::courses::{create_course, get_course, list_courses};
use registrar::inbound::http::enrollments::{check_enrollment, enroll, my_courses, unenroll};
use registrar::inbound::http::health::{live, ready, HealthState};
use registrar::inbound::http::state::HttpState;
use registrar::outbound::persistence::{
    DieselCourseRepository, DieselEnrollmentRepository, DieselUserRepository,
};
use registrar::Trace;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    tokens: web::Data<TokenIssuer>,
}

/// Map body/path deserialisation failures onto the enveloped 400 shape so
/// malformed input gets the same contract as every other failure.
fn request_error_configs() -> (web::JsonConfig, web::PathConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid request body: {err}")).into()
    });
    let path = web::PathConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid path parameter: {err}")).into()
    });
    (json, path)
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        tokens,
    } = deps;

    let (json_config, path_config) = request_error_configs();

    let api = web::scope("/api")
        .service(register)
        .service(login)
        .service(list_courses)
        .service(get_course)
        .service(create_course)
        .service(enroll)
        .service(my_courses)
        .service(check_enrollment)
        .service(unenroll);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(tokens)
        .app_data(json_config)
        .app_data(path_config)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        db_pool,
        tokens,
    } = config;

    let users = Arc::new(DieselUserRepository::new(db_pool.clone()));
    let courses = Arc::new(DieselCourseRepository::new(db_pool.clone()));
    let enrollments = Arc::new(DieselEnrollmentRepository::new(db_pool));

    let tokens = web::Data::new(tokens);
    let http_state = web::Data::new(HttpState::new(
        Arc::new(AccountService::new(users, tokens.clone().into_inner())),
        Arc::new(CatalogService::new(Arc::clone(&courses))),
        Arc::new(EnrollmentLedgerService::new(courses, enrollments)),
    ));

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            tokens: tokens.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
