//! Tests for ticket drafts and lifecycle vocabulary.

use super::*;
use crate::domain::test_fixtures::{at, employee};
use rstest::{fixture, rstest};

#[fixture]
fn submission() -> TicketSubmission {
    TicketSubmission {
        subject: "  Need a laptop!! zzzqwxxxx ".to_owned(),
        description: "  The old one died  ".to_owned(),
        department: Department::Admin,
        priority: Priority::High,
        category: Some("IT Assets".to_owned()),
        subcategory: Some("Laptop/Desktop Request".to_owned()),
    }
}

#[rstest]
fn drafts_sanitise_and_prefix_subjects(submission: TicketSubmission) {
    let draft = TicketDraft::try_new(submission).expect("valid draft");
    assert_eq!(
        draft.subject(),
        "[IT Assets - Laptop/Desktop Request] Need a laptop!!"
    );
    assert_eq!(draft.description(), "The old one died");
}

#[rstest]
fn drafts_without_subcategory_have_no_prefix(mut submission: TicketSubmission) {
    submission.subcategory = None;
    let draft = TicketDraft::try_new(submission).expect("valid draft");
    assert_eq!(draft.subject(), "Need a laptop!!");
}

#[rstest]
fn blank_category_is_treated_as_absent(mut submission: TicketSubmission) {
    submission.category = Some("  ".to_owned());
    submission.subcategory = None;
    let draft = TicketDraft::try_new(submission).expect("valid draft");
    assert_eq!(draft.subject(), "Need a laptop!!");
}

#[rstest]
#[case("", "desc", "subject", "empty_field")]
#[case("   ", "desc", "subject", "empty_field")]
#[case("Help", "  ", "description", "empty_field")]
#[case("Extraordinarily", "desc", "subject", "empty_after_sanitising")]
fn invalid_drafts_report_field(
    mut submission: TicketSubmission,
    #[case] subject: &str,
    #[case] description: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    submission.subject = subject.to_owned();
    submission.description = description.to_owned();
    let err = TicketDraft::try_new(submission).expect_err("invalid draft");
    assert_eq!((err.field(), err.code()), (field, code));
}

#[rstest]
fn drafts_validate_taxonomy_against_department(mut submission: TicketSubmission) {
    submission.department = Department::Hr;
    let err = TicketDraft::try_new(submission).expect_err("IT Assets is not an HR category");
    assert!(matches!(err, TicketValidationError::UnknownCategory { .. }));
}

#[rstest]
fn opened_tickets_start_open_and_owned(submission: TicketSubmission) {
    let owner = employee("jane.employee");
    let draft = TicketDraft::try_new(submission).expect("valid draft");
    let ticket = Ticket::open(TicketId::random(), draft, *owner.id(), at(8));

    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.created_by, *owner.id());
    assert_eq!(ticket.created_at, ticket.updated_at);
    assert!(ticket.comment.is_none());
}

#[rstest]
#[case(TicketStatus::Open, true)]
#[case(TicketStatus::InProgress, true)]
#[case(TicketStatus::OnHold, true)]
#[case(TicketStatus::Cancelled, false)]
#[case(TicketStatus::Closed, false)]
fn editable_statuses(#[case] status: TicketStatus, #[case] expected: bool) {
    assert_eq!(status.is_content_editable(), expected);
}

#[rstest]
fn statuses_round_trip_through_storage_strings() {
    for status in TicketStatus::ALL {
        assert_eq!(status.as_str().parse::<TicketStatus>(), Ok(status));
    }
    assert!(matches!(
        "DONE".parse::<TicketStatus>(),
        Err(TicketValidationError::UnknownStatus { .. })
    ));
}

#[rstest]
fn statuses_serialise_screaming_snake_case() {
    let value = serde_json::to_value(TicketStatus::InProgress).expect("serialise");
    assert_eq!(value, serde_json::json!("IN_PROGRESS"));
}
