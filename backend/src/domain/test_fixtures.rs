//! Builders shared by domain unit tests.

use chrono::{DateTime, TimeZone, Utc};

use super::{
    Department, DisplayName, PasswordHash, Priority, Role, Ticket, TicketId, TicketStatus, User,
    UserId, Username,
};

pub(crate) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn user(username: &str, role: Role) -> User {
    User::new(
        UserId::random(),
        Username::new(username).expect("fixture username"),
        DisplayName::new(username).expect("fixture name"),
        role,
        PasswordHash::new("fixture-hash"),
    )
}

pub(crate) fn employee(username: &str) -> User {
    user(username, Role::Employee)
}

pub(crate) fn manager(role: Role) -> User {
    user(&format!("{}.manager", role.as_str().to_lowercase()), role)
}

pub(crate) fn ticket_owned_by(owner: &User, department: Department, status: TicketStatus) -> Ticket {
    Ticket {
        id: TicketId::random(),
        subject: "[IT Assets - Laptop/Desktop Request] Need a laptop".to_owned(),
        description: "Mine is broken".to_owned(),
        department,
        category: Some("IT Assets".to_owned()),
        subcategory: Some("Laptop/Desktop Request".to_owned()),
        priority: Priority::Medium,
        status,
        comment: None,
        created_by: *owner.id(),
        created_at: at(9),
        updated_at: at(9),
    }
}
