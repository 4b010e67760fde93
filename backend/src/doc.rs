//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint in the inbound layer, the schema
//! wrappers for domain types, and the session cookie security scheme. The
//! document backs Swagger UI (debug builds) and the `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{
    DepartmentSchema, ErrorCodeSchema, ErrorSchema, PrioritySchema, RoleSchema,
    TicketStatusSchema,
};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Helpdesk API",
        description = "Departmental ticketing: submit, triage, and track support tickets."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::tickets::create_ticket,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::tickets::ticket_policy,
        crate::inbound::http::tickets::get_ticket,
        crate::inbound::http::tickets::update_ticket,
        crate::inbound::http::tickets::delete_ticket,
        crate::inbound::http::dashboard::dashboard_stats,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::taxonomy::get_taxonomy,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        DepartmentSchema,
        RoleSchema,
        PrioritySchema,
        TicketStatusSchema
    )),
    tags(
        (name = "auth", description = "Login, logout, and the current identity"),
        (name = "tickets", description = "Ticket submission, triage, and lookup"),
        (name = "dashboard", description = "Aggregated ticket counts"),
        (name = "profile", description = "Self-service profile changes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
