//! Tests for the ticket service.

use std::sync::Arc;

use mockable::MockClock;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockTicketRepository, MockUserRepository};
use crate::domain::test_fixtures::{at, employee, manager, ticket_owned_by};
use crate::domain::{Department, ErrorCode, Priority, Role, TicketStatus};

type Service = TicketService<MockTicketRepository, MockUserRepository>;

fn clock_at(hour: u32) -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(at(hour));
    Arc::new(clock)
}

fn make_service(tickets: MockTicketRepository, users: MockUserRepository) -> Service {
    TicketService::new(Arc::new(tickets), Arc::new(users), clock_at(12))
}

fn submission() -> TicketSubmission {
    TicketSubmission {
        subject: "  Need a laptop!! zzzqwxxxx ".to_owned(),
        description: "Mine is broken".to_owned(),
        department: Department::Admin,
        priority: Priority::High,
        category: Some("IT Assets".to_owned()),
        subcategory: Some("Laptop/Desktop Request".to_owned()),
    }
}

#[tokio::test]
async fn create_persists_open_ticket_stamped_by_clock() {
    let actor = employee("jane.employee");
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_insert()
        .withf(|ticket: &Ticket| ticket.status == TicketStatus::Open)
        .times(1)
        .return_once(|_| Ok(()));

    let view = make_service(tickets, MockUserRepository::new())
        .create(&actor, submission())
        .await
        .expect("create succeeds");

    assert_eq!(
        view.ticket.subject,
        "[IT Assets - Laptop/Desktop Request] Need a laptop!!"
    );
    assert_eq!(view.ticket.created_at, at(12));
    assert_eq!(view.ticket.created_by, *actor.id());
    assert_eq!(view.creator.map(|creator| creator.id), Some(*actor.id()));
}

#[tokio::test]
async fn create_rejects_blank_description_before_touching_store() {
    let mut raw = submission();
    raw.description = "   ".to_owned();
    let mut tickets = MockTicketRepository::new();
    tickets.expect_insert().never();

    let err = make_service(tickets, MockUserRepository::new())
        .create(&employee("jane.employee"), raw)
        .await
        .expect_err("blank description");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&json!({ "field": "description", "code": "empty_field" }))
    );
}

#[tokio::test]
async fn update_of_missing_ticket_is_not_found() {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_find_by_id().return_once(|_| Ok(None));
    tickets.expect_update().never();

    let err = make_service(tickets, MockUserRepository::new())
        .update(
            &employee("jane.employee"),
            &TicketId::random(),
            TicketPatch::default(),
        )
        .await
        .expect_err("missing ticket");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn admin_manager_closing_finance_ticket_is_forbidden() {
    let owner = employee("jane.employee");
    let ticket = ticket_owned_by(&owner, Department::Finance, TicketStatus::Open);
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(ticket)));
    tickets.expect_update().never();

    let patch = TicketPatch {
        status: Some(TicketStatus::Closed),
        ..TicketPatch::default()
    };
    let err = make_service(tickets, MockUserRepository::new())
        .update(&manager(Role::Admin), &TicketId::random(), patch)
        .await
        .expect_err("wrong department");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.details(), Some(&json!({ "fields": ["status"] })));
}

#[tokio::test]
async fn status_change_is_persisted_with_history_record() {
    let owner = employee("jane.employee");
    let actor = manager(Role::Hr);
    let ticket = ticket_owned_by(&owner, Department::Hr, TicketStatus::Open);
    let ticket_id = ticket.id;
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(ticket)));
    tickets
        .expect_update()
        .withf(|ticket: &Ticket, change: &Option<crate::domain::StatusChange>| {
            ticket.status == TicketStatus::InProgress
                && ticket.updated_at == at(12)
                && change
                    .as_ref()
                    .is_some_and(|change| change.to_status == TicketStatus::InProgress)
        })
        .times(1)
        .return_once(|_, _| Ok(true));
    let mut users = MockUserRepository::new();
    let creator = owner.clone();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(creator)));

    let patch = TicketPatch {
        status: Some(TicketStatus::InProgress),
        ..TicketPatch::default()
    };
    let view = make_service(tickets, users)
        .update(&actor, &ticket_id, patch)
        .await
        .expect("manager may progress ticket");

    assert_eq!(view.ticket.status, TicketStatus::InProgress);
    assert_eq!(
        view.creator.map(|creator| creator.username.to_string()),
        Some("jane.employee".to_owned())
    );
}

#[tokio::test]
async fn update_racing_a_delete_reports_not_found() {
    let owner = employee("jane.employee");
    let ticket = ticket_owned_by(&owner, Department::Admin, TicketStatus::Open);
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(ticket)));
    tickets.expect_update().return_once(|_, _| Ok(false));

    let patch = TicketPatch {
        priority: Some(Priority::High),
        ..TicketPatch::default()
    };
    let err = make_service(tickets, MockUserRepository::new())
        .update(&owner, &TicketId::random(), patch)
        .await
        .expect_err("ticket vanished");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(Department::Admin, true)]
#[case(Department::Finance, false)]
#[tokio::test]
async fn delete_respects_department_scope(#[case] department: Department, #[case] allowed: bool) {
    let owner = employee("jane.employee");
    let ticket = ticket_owned_by(&owner, department, TicketStatus::Closed);
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(ticket)));
    tickets
        .expect_delete()
        .times(usize::from(allowed))
        .return_once(|_| Ok(true));

    let result = make_service(tickets, MockUserRepository::new())
        .delete(&manager(Role::Admin), &TicketId::random())
        .await;

    match (allowed, result) {
        (true, Ok(())) => {}
        (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Forbidden),
        (_, other) => panic!("unexpected delete result: {other:?}"),
    }
}

#[tokio::test]
async fn get_hides_other_employees_tickets() {
    let owner = employee("jane.employee");
    let ticket = ticket_owned_by(&owner, Department::Admin, TicketStatus::Open);
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(ticket)));
    tickets.expect_history().never();

    let err = make_service(tickets, MockUserRepository::new())
        .get(&employee("john.employee"), &TicketId::random())
        .await
        .expect_err("not the owner");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn list_passes_actor_scope_and_attaches_creators() {
    let owner = employee("jane.employee");
    let owner_id = *owner.id();
    let first = ticket_owned_by(&owner, Department::Hr, TicketStatus::Open);
    let second = ticket_owned_by(&owner, Department::Admin, TicketStatus::Closed);
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_list()
        .withf(move |selection: &TicketSelection| {
            selection.scope == crate::domain::TicketScope::Owner(owner_id)
        })
        .return_once(move |_| Ok(vec![first, second]));
    let mut users = MockUserRepository::new();
    let creator = owner.clone();
    users
        .expect_find_by_ids()
        .withf(move |ids: &[UserId]| ids == [owner_id])
        .times(1)
        .return_once(move |_| Ok(vec![creator]));

    let views = make_service(tickets, users)
        .list(&owner, TicketFilter::default())
        .await
        .expect("list succeeds");

    assert_eq!(views.len(), 2);
    assert!(views.iter().all(|view| view.creator.is_some()));
}

#[tokio::test]
async fn list_tolerates_missing_creators() {
    let ghost = employee("ghost.employee");
    let actor = manager(Role::Hr);
    let ticket = ticket_owned_by(&ghost, Department::Hr, TicketStatus::Open);
    let mut tickets = MockTicketRepository::new();
    tickets.expect_list().return_once(move |_| Ok(vec![ticket]));
    let mut users = MockUserRepository::new();
    users.expect_find_by_ids().return_once(|_| Ok(Vec::new()));

    let views = make_service(tickets, users)
        .list(&actor, TicketFilter::default())
        .await
        .expect("list succeeds");

    assert_eq!(views.len(), 1);
    assert!(views[0].creator.is_none());
}

#[rstest]
#[case(TicketPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(TicketPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn store_failures_map_to_error_codes(
    #[case] failure: TicketPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_list().return_once(move |_| Err(failure));

    let err = make_service(tickets, MockUserRepository::new())
        .dashboard_stats(&manager(Role::Finance))
        .await
        .expect_err("store failure");

    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn dashboard_stats_fold_scoped_tickets() {
    let owner = employee("jane.employee");
    let scoped = vec![
        ticket_owned_by(&owner, Department::Finance, TicketStatus::Open),
        ticket_owned_by(&owner, Department::Finance, TicketStatus::Closed),
    ];
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_list()
        .withf(|selection: &TicketSelection| selection.filter == TicketFilter::default())
        .return_once(move |_| Ok(scoped));

    let stats = make_service(tickets, MockUserRepository::new())
        .dashboard_stats(&manager(Role::Finance))
        .await
        .expect("stats succeed");

    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_department.finance, 2);
    assert_eq!(stats.open + stats.closed, 2);
}
