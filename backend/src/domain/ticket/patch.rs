//! Sparse ticket updates and the field-level permission reducer.
//!
//! | field                                      | owner, editable status | department manager |
//! |--------------------------------------------|------------------------|--------------------|
//! | subject, description, department, priority | yes                    | no                 |
//! | category, subcategory                      | yes                    | no                 |
//! | status                                     | no                     | yes                |
//! | comment                                    | yes                    | yes                |
//!
//! A patch is authorised when at least one field it carries is writable by
//! the actor. Writable fields are applied and the rest are ignored.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::subject::{compose_subject, sanitize_subject, strip_category_prefix};
use super::{Priority, StatusChange, Ticket, TicketStatus, TicketValidationError, required_text};
use crate::domain::policy;
use crate::domain::taxonomy;
use crate::domain::user::{Department, User};

/// Field that a patch may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketField {
    /// Free-text subject.
    Subject,
    /// Free-text description.
    Description,
    /// Owning department.
    Department,
    /// Urgency.
    Priority,
    /// Taxonomy category.
    Category,
    /// Taxonomy subcategory.
    Subcategory,
    /// Lifecycle status.
    Status,
    /// Single mutable comment.
    Comment,
}

impl TicketField {
    /// Request field name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Description => "description",
            Self::Department => "department",
            Self::Priority => "priority",
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::Status => "status",
            Self::Comment => "comment",
        }
    }
}

/// Which field groups an actor may write on a given ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAccess {
    content: bool,
    status: bool,
}

impl FieldAccess {
    /// Derive access for `actor` on `ticket` from the access policy.
    pub fn for_actor(actor: &User, ticket: &Ticket) -> Self {
        Self {
            content: policy::can_edit_content(actor, ticket),
            status: policy::can_edit_status(actor, ticket),
        }
    }

    /// Whether `field` is writable.
    pub fn allows(self, field: TicketField) -> bool {
        match field {
            TicketField::Status => self.status,
            TicketField::Comment => self.content || self.status,
            _ => self.content,
        }
    }

    /// Whether any field is writable.
    pub fn any(self) -> bool {
        self.content || self.status
    }
}

/// Reasons a patch is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// The actor may not write any of the requested fields.
    #[error("not permitted to update this ticket")]
    AccessDenied {
        /// Requested fields the actor may not write.
        denied: Vec<TicketField>,
    },
    /// A supplied value was invalid.
    #[error(transparent)]
    Invalid(#[from] TicketValidationError),
    /// The patch would not change anything.
    #[error("no valid fields to update")]
    NoChanges,
}

/// Result of applying a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// The updated ticket, stamped with the mutation time.
    pub ticket: Ticket,
    /// Status transition to record, when the status moved.
    pub status_change: Option<StatusChange>,
    /// Requested fields dropped because the actor may not write them.
    pub ignored: Vec<TicketField>,
}

/// Sparse update to a ticket. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    /// Replacement subject, sanitised on apply.
    pub subject: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// New owning department.
    pub department: Option<Department>,
    /// New urgency.
    pub priority: Option<Priority>,
    /// New taxonomy category.
    pub category: Option<String>,
    /// New taxonomy subcategory.
    pub subcategory: Option<String>,
    /// New lifecycle status.
    pub status: Option<TicketStatus>,
    /// Replacement comment; blank clears it.
    pub comment: Option<String>,
}

impl TicketPatch {
    /// Fields present in this patch.
    pub fn fields(&self) -> Vec<TicketField> {
        [
            (self.subject.is_some(), TicketField::Subject),
            (self.description.is_some(), TicketField::Description),
            (self.department.is_some(), TicketField::Department),
            (self.priority.is_some(), TicketField::Priority),
            (self.category.is_some(), TicketField::Category),
            (self.subcategory.is_some(), TicketField::Subcategory),
            (self.status.is_some(), TicketField::Status),
            (self.comment.is_some(), TicketField::Comment),
        ]
        .into_iter()
        .filter_map(|(present, field)| present.then_some(field))
        .collect()
    }

    /// Authorise and apply this patch on behalf of `actor`.
    ///
    /// Fields the actor may not write are dropped and reported in
    /// [`PatchOutcome::ignored`]. The patch is refused only when none of the
    /// fields it carries is writable. `ticket` is left untouched; the updated
    /// copy is returned.
    pub fn apply(
        self,
        actor: &User,
        ticket: &Ticket,
        now: DateTime<Utc>,
    ) -> Result<PatchOutcome, PatchError> {
        let patch = self.without_blank_taxonomy();
        let access = FieldAccess::for_actor(actor, ticket);
        let (allowed, denied): (Vec<TicketField>, Vec<TicketField>) = patch
            .fields()
            .into_iter()
            .partition(|field| access.allows(*field));
        if !access.any() || (allowed.is_empty() && !denied.is_empty()) {
            return Err(PatchError::AccessDenied { denied });
        }
        let patch = patch.without(&denied);

        let mut next = patch.apply_content(ticket)?;
        let mut status_change = None;

        if let Some(comment) = &patch.comment {
            let trimmed = comment.trim();
            next.comment = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        }
        if let Some(status) = patch.status.filter(|status| *status != ticket.status) {
            next.status = status;
            status_change = Some(StatusChange {
                id: Uuid::new_v4(),
                ticket_id: ticket.id,
                actor_id: *actor.id(),
                from_status: ticket.status,
                to_status: status,
                comment: next.comment.clone().filter(|_| patch.comment.is_some()),
                changed_at: now,
            });
        }

        if next == *ticket {
            return Err(PatchError::NoChanges);
        }
        next.updated_at = now.max(ticket.created_at);
        Ok(PatchOutcome {
            ticket: next,
            status_change,
            ignored: denied,
        })
    }

    // Blank taxonomy values count as absent.
    fn without_blank_taxonomy(mut self) -> Self {
        self.category = self.category.filter(|raw| !raw.trim().is_empty());
        self.subcategory = self.subcategory.filter(|raw| !raw.trim().is_empty());
        self
    }

    fn without(mut self, fields: &[TicketField]) -> Self {
        for field in fields {
            match field {
                TicketField::Subject => self.subject = None,
                TicketField::Description => self.description = None,
                TicketField::Department => self.department = None,
                TicketField::Priority => self.priority = None,
                TicketField::Category => self.category = None,
                TicketField::Subcategory => self.subcategory = None,
                TicketField::Status => self.status = None,
                TicketField::Comment => self.comment = None,
            }
        }
        self
    }

    fn apply_content(&self, ticket: &Ticket) -> Result<Ticket, TicketValidationError> {
        let mut next = ticket.clone();
        if let Some(description) = &self.description {
            next.description = required_text("description", description)?;
        }
        if let Some(department) = self.department {
            next.department = department;
        }
        if let Some(priority) = self.priority {
            next.priority = priority;
        }

        let category = match &self.category {
            Some(raw) => Some(raw.trim().to_owned()),
            None => ticket.category.clone(),
        };
        let subcategory = match &self.subcategory {
            Some(raw) => Some(raw.trim().to_owned()),
            None => ticket.subcategory.clone(),
        };
        let taxonomy_touched =
            self.category.is_some() || self.subcategory.is_some() || self.department.is_some();
        if taxonomy_touched {
            taxonomy::validate(next.department, category.as_deref(), subcategory.as_deref())?;
        }

        if self.subject.is_some() || self.category.is_some() || self.subcategory.is_some() {
            let cleaned = match &self.subject {
                Some(raw) => {
                    let raw = required_text("subject", raw)?;
                    let cleaned = sanitize_subject(strip_category_prefix(&raw));
                    if cleaned.is_empty() {
                        return Err(TicketValidationError::SubjectEmptyAfterSanitising);
                    }
                    cleaned
                }
                None => strip_category_prefix(&ticket.subject).to_owned(),
            };
            next.subject = compose_subject(category.as_deref(), subcategory.as_deref(), &cleaned);
        }
        next.category = category;
        next.subcategory = subcategory;
        Ok(next)
    }
}
