//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, TicketId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let message = format!("{} must be a valid UUID", field.as_str());
    field_error(field, message, ErrorCode::InvalidUuid, value)
}

pub(crate) fn invalid_value_error(field: FieldName, value: &str) -> Error {
    let message = format!("unknown {} value: {value}", field.as_str());
    field_error(field, message, ErrorCode::InvalidValue, value)
}

pub(crate) fn parse_ticket_id(value: &str) -> Result<TicketId, Error> {
    const FIELD: FieldName = FieldName::new("id");
    Uuid::parse_str(value)
        .map(TicketId::from_uuid)
        .map_err(|_| invalid_uuid_error(FIELD, value))
}

/// Parse a wire enum value such as `"IN_PROGRESS"`.
pub(crate) fn parse_enum<T: FromStr>(value: &str, field: FieldName) -> Result<T, Error> {
    T::from_str(value).map_err(|_| invalid_value_error(field, value))
}

pub(crate) fn parse_optional_enum<T: FromStr>(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<T>, Error> {
    value.map(|raw| parse_enum(raw, field)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, ErrorCode as DomainCode, Priority, TicketStatus};
    use rstest::rstest;

    const STATUS: FieldName = FieldName::new("status");

    #[rstest]
    fn ticket_ids_must_be_uuids() {
        let err = parse_ticket_id("42").expect_err("not a uuid");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "id");
        assert_eq!(details["code"], "invalid_uuid");
        assert_eq!(details["value"], "42");
    }

    #[rstest]
    fn wire_enums_parse() {
        let status: TicketStatus = parse_enum("ON_HOLD", STATUS).expect("known status");
        assert_eq!(status, TicketStatus::OnHold);
        let department: Option<Department> =
            parse_optional_enum(Some("HR"), FieldName::new("department")).expect("known dept");
        assert_eq!(department, Some(Department::Hr));
        let absent: Option<Priority> =
            parse_optional_enum(None, FieldName::new("priority")).expect("absent is fine");
        assert_eq!(absent, None);
    }

    #[rstest]
    #[case("on_hold")]
    #[case("PAUSED")]
    #[case("")]
    fn unknown_enum_values_name_the_field(#[case] raw: &str) {
        let err = parse_enum::<TicketStatus>(raw, STATUS).expect_err("unknown status");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "status");
        assert_eq!(details["code"], "invalid_value");
    }
}
