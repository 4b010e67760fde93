//! Access policy: who may see, edit, and delete which tickets.
//!
//! Every function is pure. Managers act only on tickets filed against their
//! own department; there is no cross-department role.

use super::ticket::Ticket;
use super::user::{Role, User};

/// Whether `role` manages a department.
pub fn is_manager(role: Role) -> bool {
    role.is_manager()
}

/// Whether `actor` manages the department `ticket` is filed under.
pub fn can_manage_department(actor: &User, ticket: &Ticket) -> bool {
    actor.department() == Some(ticket.department)
}

fn is_owner(actor: &User, ticket: &Ticket) -> bool {
    ticket.created_by == *actor.id()
}

/// Owners and managers of the ticket's department may view it.
pub fn can_view(actor: &User, ticket: &Ticket) -> bool {
    is_owner(actor, ticket) || can_manage_department(actor, ticket)
}

/// Owners and managers of the ticket's department may delete it.
pub fn can_delete(actor: &User, ticket: &Ticket) -> bool {
    is_owner(actor, ticket) || can_manage_department(actor, ticket)
}

/// Owners may edit content while the ticket is in an editable status.
pub fn can_edit_content(actor: &User, ticket: &Ticket) -> bool {
    is_owner(actor, ticket) && ticket.status.is_content_editable()
}

/// Only managers of the ticket's department change its status.
pub fn can_edit_status(actor: &User, ticket: &Ticket) -> bool {
    can_manage_department(actor, ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{employee, manager, ticket_owned_by};
    use crate::domain::{Department, TicketStatus};
    use rstest::rstest;

    #[rstest]
    #[case(Role::Employee, false)]
    #[case(Role::Admin, true)]
    #[case(Role::Finance, true)]
    #[case(Role::Hr, true)]
    fn manager_roles(#[case] role: Role, #[case] expected: bool) {
        assert_eq!(is_manager(role), expected);
    }

    #[rstest]
    fn owners_view_and_delete_their_tickets() {
        let owner = employee("jane.employee");
        let ticket = ticket_owned_by(&owner, Department::Hr, TicketStatus::Closed);
        assert!(can_view(&owner, &ticket));
        assert!(can_delete(&owner, &ticket));
    }

    #[rstest]
    fn other_employees_are_locked_out() {
        let owner = employee("jane.employee");
        let other = employee("john.employee");
        let ticket = ticket_owned_by(&owner, Department::Hr, TicketStatus::Open);
        assert!(!can_view(&other, &ticket));
        assert!(!can_delete(&other, &ticket));
        assert!(!can_edit_content(&other, &ticket));
        assert!(!can_edit_status(&other, &ticket));
    }

    #[rstest]
    #[case(Role::Admin, Department::Admin, true)]
    #[case(Role::Admin, Department::Finance, false)]
    #[case(Role::Finance, Department::Finance, true)]
    #[case(Role::Hr, Department::Admin, false)]
    fn managers_act_only_within_their_department(
        #[case] role: Role,
        #[case] department: Department,
        #[case] expected: bool,
    ) {
        let owner = employee("jane.employee");
        let actor = manager(role);
        let ticket = ticket_owned_by(&owner, department, TicketStatus::Open);
        assert_eq!(can_manage_department(&actor, &ticket), expected);
        assert_eq!(can_edit_status(&actor, &ticket), expected);
        assert_eq!(can_view(&actor, &ticket), expected);
        assert_eq!(can_delete(&actor, &ticket), expected);
        assert!(!can_edit_content(&actor, &ticket));
    }

    #[rstest]
    #[case(TicketStatus::Open, true)]
    #[case(TicketStatus::InProgress, true)]
    #[case(TicketStatus::OnHold, true)]
    #[case(TicketStatus::Cancelled, false)]
    #[case(TicketStatus::Closed, false)]
    fn owner_content_edits_follow_editable_statuses(
        #[case] status: TicketStatus,
        #[case] expected: bool,
    ) {
        let owner = employee("jane.employee");
        let ticket = ticket_owned_by(&owner, Department::Admin, status);
        assert_eq!(can_edit_content(&owner, &ticket), expected);
    }
}
