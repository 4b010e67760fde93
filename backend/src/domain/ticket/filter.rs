//! Ticket listing scope and filters.

use super::{Priority, Ticket, TicketStatus};
use crate::domain::user::{Department, User, UserId};

/// Visibility scope implied by the actor's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketScope {
    /// Tickets raised by this user.
    Owner(UserId),
    /// Tickets filed against this department.
    Department(Department),
}

impl TicketScope {
    /// Scope for `actor`: managers see their department, employees their own tickets.
    pub fn for_actor(actor: &User) -> Self {
        match actor.department() {
            Some(department) => Self::Department(department),
            None => Self::Owner(*actor.id()),
        }
    }

    fn contains(self, ticket: &Ticket) -> bool {
        match self {
            Self::Owner(owner) => ticket.created_by == owner,
            Self::Department(department) => ticket.department == department,
        }
    }
}

/// Optional caller-supplied narrowing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    /// Only tickets in this department.
    pub department: Option<Department>,
    /// Only tickets with this priority.
    pub priority: Option<Priority>,
    /// Only tickets in this status.
    pub status: Option<TicketStatus>,
    /// Case-insensitive substring of subject or description.
    pub search: Option<String>,
}

impl TicketFilter {
    /// Normalise the search term, dropping it when blank.
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_owned);
        self
    }
}

/// Scope and filters combined. Filters only ever narrow the scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSelection {
    /// Role-derived visibility.
    pub scope: TicketScope,
    /// Explicit filters.
    pub filter: TicketFilter,
}

impl TicketSelection {
    /// Query for everything `actor` may list, narrowed by `filter`.
    pub fn for_actor(actor: &User, filter: TicketFilter) -> Self {
        Self {
            scope: TicketScope::for_actor(actor),
            filter,
        }
    }

    /// Whether `ticket` satisfies the scope and every filter.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        let TicketFilter {
            department,
            priority,
            status,
            search,
        } = &self.filter;
        self.scope.contains(ticket)
            && department.is_none_or(|value| ticket.department == value)
            && priority.is_none_or(|value| ticket.priority == value)
            && status.is_none_or(|value| ticket.status == value)
            && search.as_deref().is_none_or(|term| {
                let term = term.to_lowercase();
                ticket.subject.to_lowercase().contains(&term)
                    || ticket.description.to_lowercase().contains(&term)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::domain::test_fixtures::{employee, manager, ticket_owned_by};
    use rstest::rstest;

    #[rstest]
    fn employees_are_scoped_to_their_own_tickets() {
        let jane = employee("jane.employee");
        let john = employee("john.employee");
        let query = TicketSelection::for_actor(&jane, TicketFilter::default());

        assert!(query.matches(&ticket_owned_by(&jane, Department::Hr, TicketStatus::Open)));
        assert!(!query.matches(&ticket_owned_by(&john, Department::Hr, TicketStatus::Open)));
    }

    #[rstest]
    fn department_filter_cannot_widen_manager_scope() {
        let jane = employee("jane.employee");
        let filter = TicketFilter {
            department: Some(Department::Hr),
            ..TicketFilter::default()
        };
        let query = TicketSelection::for_actor(&manager(Role::Finance), filter);

        assert!(!query.matches(&ticket_owned_by(&jane, Department::Hr, TicketStatus::Open)));
        assert!(!query.matches(&ticket_owned_by(&jane, Department::Finance, TicketStatus::Open)));
    }

    #[rstest]
    #[case("LAPTOP", true)]
    #[case("is broken", true)]
    #[case("printer", false)]
    fn search_matches_subject_or_description(#[case] term: &str, #[case] expected: bool) {
        let jane = employee("jane.employee");
        let query = TicketSelection::for_actor(&jane, TicketFilter::default().with_search(Some(term)));
        let ticket = ticket_owned_by(&jane, Department::Admin, TicketStatus::Open);
        assert_eq!(query.matches(&ticket), expected);
    }

    #[rstest]
    fn blank_search_is_ignored() {
        let filter = TicketFilter::default().with_search(Some("   "));
        assert!(filter.search.is_none());
    }

    #[rstest]
    fn status_and_priority_filters_narrow() {
        let jane = employee("jane.employee");
        let filter = TicketFilter {
            status: Some(TicketStatus::Closed),
            priority: Some(Priority::Medium),
            ..TicketFilter::default()
        };
        let query = TicketSelection::for_actor(&jane, filter);

        assert!(query.matches(&ticket_owned_by(&jane, Department::Admin, TicketStatus::Closed)));
        assert!(!query.matches(&ticket_owned_by(&jane, Department::Admin, TicketStatus::Open)));
    }
}
