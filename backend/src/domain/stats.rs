//! Dashboard aggregation over the tickets an actor can see.

use serde::{Deserialize, Serialize};

use super::ticket::{Priority, Ticket, TicketStatus};
use super::user::Department;

/// Ticket counts per department.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCounts {
    /// Tickets filed under ADMIN.
    pub admin: u64,
    /// Tickets filed under FINANCE.
    pub finance: u64,
    /// Tickets filed under HR.
    pub hr: u64,
}

/// Ticket counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCounts {
    /// LOW priority tickets.
    pub low: u64,
    /// MEDIUM priority tickets.
    pub medium: u64,
    /// HIGH priority tickets.
    pub high: u64,
}

/// Summary counts shown on the dashboard.
///
/// The status buckets always sum to `total`, as do each of the breakdowns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Every visible ticket.
    pub total: u64,
    /// Tickets in OPEN.
    pub open: u64,
    /// Tickets in IN_PROGRESS.
    pub in_progress: u64,
    /// Tickets in ON_HOLD.
    pub on_hold: u64,
    /// Tickets in CANCELLED.
    pub cancelled: u64,
    /// Tickets in CLOSED.
    pub closed: u64,
    /// Breakdown by department.
    pub by_department: DepartmentCounts,
    /// Breakdown by priority.
    pub by_priority: PriorityCounts,
}

impl DashboardStats {
    fn record(mut self, ticket: &Ticket) -> Self {
        self.total += 1;
        *match ticket.status {
            TicketStatus::Open => &mut self.open,
            TicketStatus::InProgress => &mut self.in_progress,
            TicketStatus::OnHold => &mut self.on_hold,
            TicketStatus::Cancelled => &mut self.cancelled,
            TicketStatus::Closed => &mut self.closed,
        } += 1;
        *match ticket.department {
            Department::Admin => &mut self.by_department.admin,
            Department::Finance => &mut self.by_department.finance,
            Department::Hr => &mut self.by_department.hr,
        } += 1;
        *match ticket.priority {
            Priority::Low => &mut self.by_priority.low,
            Priority::Medium => &mut self.by_priority.medium,
            Priority::High => &mut self.by_priority.high,
        } += 1;
        self
    }
}

/// Fold `tickets` into dashboard counts.
pub fn compute_stats<'a>(tickets: impl IntoIterator<Item = &'a Ticket>) -> DashboardStats {
    tickets
        .into_iter()
        .fold(DashboardStats::default(), DashboardStats::record)
}
