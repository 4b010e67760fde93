//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and live in the inbound adapter
//! where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "subject must not be empty")]
    message: String,
    /// Request trace identifier, echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. `{"field": "subject", "code": "empty_field"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Department`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Department)]
pub enum DepartmentSchema {
    #[schema(rename = "ADMIN")]
    Admin,
    #[schema(rename = "FINANCE")]
    Finance,
    #[schema(rename = "HR")]
    Hr,
}

/// OpenAPI schema for [`crate::domain::Role`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    #[schema(rename = "EMPLOYEE")]
    Employee,
    #[schema(rename = "ADMIN")]
    Admin,
    #[schema(rename = "FINANCE")]
    Finance,
    #[schema(rename = "HR")]
    Hr,
}

/// OpenAPI schema for [`crate::domain::Priority`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Priority)]
pub enum PrioritySchema {
    #[schema(rename = "LOW")]
    Low,
    #[schema(rename = "MEDIUM")]
    Medium,
    #[schema(rename = "HIGH")]
    High,
}

/// OpenAPI schema for [`crate::domain::TicketStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TicketStatus)]
pub enum TicketStatusSchema {
    #[schema(rename = "OPEN")]
    Open,
    #[schema(rename = "IN_PROGRESS")]
    InProgress,
    #[schema(rename = "ON_HOLD")]
    OnHold,
    #[schema(rename = "CANCELLED")]
    Cancelled,
    #[schema(rename = "CLOSED")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, Priority, Role, TicketStatus};
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        let json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(json.contains("traceId"), "schema should use camelCase: {json}");
    }

    #[rstest]
    fn error_codes_cover_every_status_family() {
        let json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    fn enum_schemas_match_domain_wire_values() {
        let departments = schema_to_json::<DepartmentSchema>();
        for department in Department::ALL {
            assert!(departments.contains(department.as_str()));
        }
        let statuses = schema_to_json::<TicketStatusSchema>();
        for status in TicketStatus::ALL {
            assert!(statuses.contains(status.as_str()));
        }
        let priorities = schema_to_json::<PrioritySchema>();
        for priority in Priority::ALL {
            assert!(priorities.contains(priority.as_str()));
        }
        let roles = schema_to_json::<RoleSchema>();
        for role in [Role::Employee, Role::Admin, Role::Finance, Role::Hr] {
            assert!(roles.contains(role.as_str()));
        }
    }
}
