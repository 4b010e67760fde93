//! Ticket HTTP handlers.
//!
//! ```text
//! POST   /api/v1/tickets
//! GET    /api/v1/tickets?department=&priority=&status=&search=
//! GET    /api/v1/tickets/policy
//! GET    /api/v1/tickets/{id}
//! PUT    /api/v1/tickets/{id}
//! DELETE /api/v1/tickets/{id}
//! ```
//!
//! Handlers only translate payloads. Visibility and field-level permissions
//! are decided by the ticket service behind [`HttpState`].

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{EDITABLE_STATUSES, TicketFilter, TicketPatch, TicketSubmission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_ticket_id;

pub use super::tickets_dto::{
    CreateTicketRequest, CreatorResponse, EditPolicyResponse, StatusChangeResponse,
    TicketDetailResponse, TicketListParams, TicketListResponse, TicketResponse,
    UpdateTicketRequest,
};

/// Raise a ticket owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = TicketResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "createTicket"
)]
#[post("/tickets")]
pub async fn create_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTicketRequest>,
) -> ApiResult<HttpResponse> {
    let actor = state.require_actor(&session).await?;
    let submission = TicketSubmission::try_from(payload.into_inner())?;
    let view = state.tickets.create(&actor, submission).await?;
    Ok(HttpResponse::Created().json(TicketResponse::from(view)))
}

/// Tickets visible to the caller, newest first.
///
/// Filters narrow the caller's scope; they never widen it.
#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    params(TicketListParams),
    responses(
        (status = 200, description = "Visible tickets", body = TicketListResponse),
        (status = 400, description = "Invalid filter value", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "listTickets"
)]
#[get("/tickets")]
pub async fn list_tickets(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<TicketListParams>,
) -> ApiResult<web::Json<TicketListResponse>> {
    let actor = state.require_actor(&session).await?;
    let filter = TicketFilter::try_from(query.into_inner())?;
    let tickets = state.tickets_query.list(&actor, filter).await?;
    Ok(web::Json(TicketListResponse {
        tickets: tickets.into_iter().map(TicketResponse::from).collect(),
    }))
}

/// Statuses in which owners may edit ticket content.
#[utoipa::path(
    get,
    path = "/api/v1/tickets/policy",
    responses((status = 200, description = "Edit policy", body = EditPolicyResponse)),
    tags = ["tickets"],
    operation_id = "ticketEditPolicy",
    security([])
)]
#[get("/tickets/policy")]
pub async fn ticket_policy() -> web::Json<EditPolicyResponse> {
    web::Json(EditPolicyResponse {
        editable_statuses: EDITABLE_STATUSES.to_vec(),
    })
}

/// One ticket with its status history.
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id (UUID)")),
    responses(
        (status = 200, description = "Ticket and history", body = TicketDetailResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not visible to the caller", body = ErrorSchema),
        (status = 404, description = "No such ticket", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "getTicket"
)]
#[get("/tickets/{id}")]
pub async fn get_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TicketDetailResponse>> {
    let actor = state.require_actor(&session).await?;
    let id = parse_ticket_id(&path.into_inner())?;
    let detail = state.tickets_query.get(&actor, &id).await?;
    Ok(web::Json(TicketDetailResponse::from(detail)))
}

/// Apply a sparse update.
///
/// Owners may edit content while the ticket is open, in progress or on
/// hold; managers of the ticket's department may change its status. Either
/// may leave a comment. Fields the caller may not write are ignored; a
/// request with no writable field is refused.
#[utoipa::path(
    put,
    path = "/api/v1/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id (UUID)")),
    request_body = UpdateTicketRequest,
    responses(
        (status = 200, description = "Updated ticket", body = TicketResponse),
        (status = 400, description = "Invalid or no-op update", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "No requested field is writable by the caller", body = ErrorSchema),
        (status = 404, description = "No such ticket", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "updateTicket"
)]
#[put("/tickets/{id}")]
pub async fn update_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateTicketRequest>,
) -> ApiResult<web::Json<TicketResponse>> {
    let actor = state.require_actor(&session).await?;
    let id = parse_ticket_id(&path.into_inner())?;
    let patch = TicketPatch::try_from(payload.into_inner())?;
    let view = state.tickets.update(&actor, &id, patch).await?;
    Ok(web::Json(TicketResponse::from(view)))
}

/// Hard-delete a ticket and its history.
#[utoipa::path(
    delete,
    path = "/api/v1/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id (UUID)")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not deletable by the caller", body = ErrorSchema),
        (status = 404, description = "No such ticket", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "deleteTicket"
)]
#[delete("/tickets/{id}")]
pub async fn delete_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = state.require_actor(&session).await?;
    let id = parse_ticket_id(&path.into_inner())?;
    state.tickets.delete(&actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "tickets_tests.rs"]
mod tests;
