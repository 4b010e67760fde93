//! Request and response payloads for the ticket endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreatorSummary, TicketDetail, TicketView};
use crate::domain::{
    Department, Error, Priority, StatusChange, TicketFilter, TicketPatch, TicketStatus,
    TicketSubmission,
};
use crate::inbound::http::schemas::{DepartmentSchema, PrioritySchema, TicketStatusSchema};
use crate::inbound::http::validation::{FieldName, parse_enum, parse_optional_enum};

const DEPARTMENT: FieldName = FieldName::new("department");
const PRIORITY: FieldName = FieldName::new("priority");
const STATUS: FieldName = FieldName::new("status");

/// Body of `POST /api/v1/tickets`.
///
/// Missing text fields are treated as empty so the domain reports them with
/// its usual field detail.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[serde(default)]
    #[schema(example = "Need a laptop")]
    pub subject: String,
    #[serde(default)]
    #[schema(example = "My laptop no longer boots")]
    pub description: String,
    #[serde(default)]
    #[schema(example = "ADMIN")]
    pub department: String,
    #[serde(default)]
    #[schema(example = "MEDIUM")]
    pub priority: String,
    #[schema(example = "IT Assets")]
    pub category: Option<String>,
    #[schema(example = "Laptop/Desktop Request")]
    pub subcategory: Option<String>,
}

impl TryFrom<CreateTicketRequest> for TicketSubmission {
    type Error = Error;

    fn try_from(value: CreateTicketRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            department: parse_enum::<Department>(&value.department, DEPARTMENT)?,
            priority: parse_enum::<Priority>(&value.priority, PRIORITY)?,
            subject: value.subject,
            description: value.description,
            category: value.category,
            subcategory: value.subcategory,
        })
    }
}

/// Body of `PUT /api/v1/tickets/{id}`. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub subject: Option<String>,
    pub description: Option<String>,
    #[schema(example = "FINANCE")]
    pub department: Option<String>,
    #[schema(example = "HIGH")]
    pub priority: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[schema(example = "IN_PROGRESS")]
    pub status: Option<String>,
    #[schema(example = "Looking into it")]
    pub comment: Option<String>,
}

impl TryFrom<UpdateTicketRequest> for TicketPatch {
    type Error = Error;

    fn try_from(value: UpdateTicketRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            department: parse_optional_enum(value.department.as_deref(), DEPARTMENT)?,
            priority: parse_optional_enum(value.priority.as_deref(), PRIORITY)?,
            status: parse_optional_enum(value.status.as_deref(), STATUS)?,
            subject: value.subject,
            description: value.description,
            category: value.category,
            subcategory: value.subcategory,
            comment: value.comment,
        })
    }
}

/// Query string of `GET /api/v1/tickets`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TicketListParams {
    /// `ADMIN`, `FINANCE` or `HR`.
    pub department: Option<String>,
    /// `LOW`, `MEDIUM` or `HIGH`.
    pub priority: Option<String>,
    /// Lifecycle status, e.g. `ON_HOLD`.
    pub status: Option<String>,
    /// Case-insensitive text to find in subject or description.
    pub search: Option<String>,
}

impl TryFrom<TicketListParams> for TicketFilter {
    type Error = Error;

    fn try_from(value: TicketListParams) -> Result<Self, Self::Error> {
        let filter = TicketFilter {
            department: parse_optional_enum(value.department.as_deref(), DEPARTMENT)?,
            priority: parse_optional_enum(value.priority.as_deref(), PRIORITY)?,
            status: parse_optional_enum(value.status.as_deref(), STATUS)?,
            search: None,
        };
        Ok(filter.with_search(value.search.as_deref()))
    }
}

/// Who raised a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatorResponse {
    pub id: String,
    pub username: String,
    pub name: String,
}

impl From<CreatorSummary> for CreatorResponse {
    fn from(value: CreatorSummary) -> Self {
        Self {
            id: value.id.to_string(),
            username: value.username.to_string(),
            name: value.name.to_string(),
        }
    }
}

/// Ticket as returned by every ticket endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    #[schema(example = "9b2f0c1e-6a53-4b6e-9c35-2f1f7a0d9e11")]
    pub id: String,
    #[schema(example = "[IT Assets - Laptop/Desktop Request] Need a laptop")]
    pub subject: String,
    pub description: String,
    #[schema(value_type = DepartmentSchema)]
    pub department: Department,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[schema(value_type = PrioritySchema)]
    pub priority: Priority,
    #[schema(value_type = TicketStatusSchema)]
    pub status: TicketStatus,
    pub comment: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `null` when the creator's account no longer exists.
    pub creator: Option<CreatorResponse>,
}

impl From<TicketView> for TicketResponse {
    fn from(value: TicketView) -> Self {
        let TicketView { ticket, creator } = value;
        Self {
            id: ticket.id.to_string(),
            subject: ticket.subject,
            description: ticket.description,
            department: ticket.department,
            category: ticket.category,
            subcategory: ticket.subcategory,
            priority: ticket.priority,
            status: ticket.status,
            comment: ticket.comment,
            created_by: ticket.created_by.to_string(),
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
            creator: creator.map(CreatorResponse::from),
        }
    }
}

/// One recorded status transition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeResponse {
    pub id: String,
    pub actor_id: String,
    #[schema(value_type = TicketStatusSchema)]
    pub from_status: TicketStatus,
    #[schema(value_type = TicketStatusSchema)]
    pub to_status: TicketStatus,
    pub comment: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl From<StatusChange> for StatusChangeResponse {
    fn from(value: StatusChange) -> Self {
        Self {
            id: value.id.to_string(),
            actor_id: value.actor_id.to_string(),
            from_status: value.from_status,
            to_status: value.to_status,
            comment: value.comment,
            changed_at: value.changed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketListResponse {
    pub tickets: Vec<TicketResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketDetailResponse {
    pub ticket: TicketResponse,
    /// Oldest change first.
    pub history: Vec<StatusChangeResponse>,
}

impl From<TicketDetail> for TicketDetailResponse {
    fn from(value: TicketDetail) -> Self {
        Self {
            ticket: value.view.into(),
            history: value.history.into_iter().map(Into::into).collect(),
        }
    }
}

/// Statuses in which owners may still edit ticket content.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditPolicyResponse {
    #[schema(value_type = Vec<TicketStatusSchema>)]
    pub editable_statuses: Vec<TicketStatus>,
}
