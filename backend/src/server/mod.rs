//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use helpdesk::Trace;
#[cfg(debug_assertions)]
use helpdesk::doc::ApiDoc;
use helpdesk::inbound::http::dashboard::dashboard_stats;
use helpdesk::inbound::http::error::{json_error_handler, path_error_handler, query_error_handler};
use helpdesk::inbound::http::health::{HealthState, live, ready};
use helpdesk::inbound::http::profile::{get_profile, update_profile};
use helpdesk::inbound::http::session_config::SessionSettings;
use helpdesk::inbound::http::state::HttpState;
use helpdesk::inbound::http::taxonomy::get_taxonomy;
use helpdesk::inbound::http::tickets::{
    create_ticket, delete_ticket, get_ticket, list_tickets, ticket_policy, update_ticket,
};
use helpdesk::inbound::http::users::{current_user, login, logout};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
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
        session,
    } = deps;

    // `/tickets/policy` is registered ahead of `/tickets/{id}` so it is not
    // captured as an id.
    let api = web::scope("/api/v1")
        .wrap(session.middleware())
        .service(login)
        .service(logout)
        .service(current_user)
        .service(ticket_policy)
        .service(create_ticket)
        .service(list_tickets)
        .service(get_ticket)
        .service(update_ticket)
        .service(delete_ticket)
        .service(dashboard_stats)
        .service(get_profile)
        .service(update_profile)
        .service(get_taxonomy);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server and mark the process ready.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        db_pool,
        bcrypt_cost,
    } = config;
    let http_state = web::Data::new(build_http_state(&db_pool, bcrypt_cost));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
