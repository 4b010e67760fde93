//! Tickets and their lifecycle vocabulary.
//!
//! A ticket is raised by one user against one [`Department`]. Its subject is
//! sanitised on the way in and carries a `"[Category - Subcategory] "`
//! prefix when the submitter picked both from the taxonomy.

mod filter;
mod patch;
mod subject;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::taxonomy;
use super::user::{Department, UserId};

pub use filter::{TicketFilter, TicketSelection, TicketScope};
pub use patch::{FieldAccess, PatchError, PatchOutcome, TicketField, TicketPatch};
pub use subject::{compose_subject, sanitize_subject, strip_category_prefix};

/// Stable ticket identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal turnaround.
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl FromStr for Priority {
    type Err = TicketValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            other => Err(TicketValidationError::UnknownPriority {
                value: other.to_owned(),
            }),
        }
    }
}

/// Position of a ticket in its lifecycle.
///
/// Any status may move to any other; only managers of the ticket's department
/// change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Newly raised.
    Open,
    /// Being worked on.
    InProgress,
    /// Paused, usually waiting on the submitter.
    OnHold,
    /// Withdrawn or rejected.
    Cancelled,
    /// Resolved.
    Closed,
}

/// Statuses in which the owner may still edit ticket content.
pub const EDITABLE_STATUSES: [TicketStatus; 3] = [
    TicketStatus::Open,
    TicketStatus::InProgress,
    TicketStatus::OnHold,
];

impl TicketStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::InProgress,
        Self::OnHold,
        Self::Cancelled,
        Self::Closed,
    ];

    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::OnHold => "ON_HOLD",
            Self::Cancelled => "CANCELLED",
            Self::Closed => "CLOSED",
        }
    }

    /// Whether the owner may edit content while the ticket is in this status.
    pub fn is_content_editable(self) -> bool {
        EDITABLE_STATUSES.contains(&self)
    }
}

impl FromStr for TicketStatus {
    type Err = TicketValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TicketValidationError::UnknownStatus {
                value: s.to_owned(),
            })
    }
}

/// Validation failures for ticket input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketValidationError {
    /// A required text field was blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Request field name.
        field: &'static str,
    },
    /// Nothing was left of the subject once disallowed content was removed.
    #[error("subject must contain some plain text")]
    SubjectEmptyAfterSanitising,
    /// The priority value was not recognised.
    #[error("unknown priority: {value}")]
    UnknownPriority {
        /// The rejected value.
        value: String,
    },
    /// The status value was not recognised.
    #[error("unknown status: {value}")]
    UnknownStatus {
        /// The rejected value.
        value: String,
    },
    /// A subcategory was given without its category.
    #[error("subcategory requires a category")]
    SubcategoryWithoutCategory,
    /// The category does not exist for the department.
    #[error("category '{category}' does not exist in department {department}")]
    UnknownCategory {
        /// Department the ticket is filed under.
        department: Department,
        /// The rejected category.
        category: String,
    },
    /// The subcategory does not exist under the category.
    #[error("subcategory '{subcategory}' does not exist in category '{category}'")]
    UnknownSubcategory {
        /// Category the subcategory was looked up in.
        category: String,
        /// The rejected subcategory.
        subcategory: String,
    },
}

impl TicketValidationError {
    /// Request field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field } => field,
            Self::SubjectEmptyAfterSanitising => "subject",
            Self::UnknownPriority { .. } => "priority",
            Self::UnknownStatus { .. } => "status",
            Self::UnknownCategory { .. } => "category",
            Self::SubcategoryWithoutCategory | Self::UnknownSubcategory { .. } => "subcategory",
        }
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyField { .. } => "empty_field",
            Self::SubjectEmptyAfterSanitising => "empty_after_sanitising",
            Self::UnknownPriority { .. } | Self::UnknownStatus { .. } => "invalid_value",
            Self::SubcategoryWithoutCategory => "missing_category",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::UnknownSubcategory { .. } => "unknown_subcategory",
        }
    }
}

/// Raw submission values for a new ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSubmission {
    /// Free-text subject.
    pub subject: String,
    /// Free-text description.
    pub description: String,
    /// Department the ticket is raised against.
    pub department: Department,
    /// Urgency.
    pub priority: Priority,
    /// Optional taxonomy category.
    pub category: Option<String>,
    /// Optional taxonomy subcategory.
    pub subcategory: Option<String>,
}

/// A validated ticket submission, ready to be opened.
///
/// ## Invariants
/// - `subject` is sanitised, non-empty, and prefixed when both taxonomy
///   fields are present.
/// - `description` is trimmed and non-empty.
/// - `category`/`subcategory` exist in the taxonomy for `department`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    subject: String,
    description: String,
    department: Department,
    priority: Priority,
    category: Option<String>,
    subcategory: Option<String>,
}

impl TicketDraft {
    /// Validate and normalise a submission.
    ///
    /// # Examples
    /// ```
    /// use helpdesk::domain::{Department, Priority, TicketDraft, TicketSubmission};
    ///
    /// let draft = TicketDraft::try_new(TicketSubmission {
    ///     subject: "  Need a laptop!! zzzqwxxxx ".into(),
    ///     description: "Mine broke".into(),
    ///     department: Department::Admin,
    ///     priority: Priority::High,
    ///     category: Some("IT Assets".into()),
    ///     subcategory: Some("Laptop/Desktop Request".into()),
    /// })
    /// .unwrap();
    /// assert_eq!(draft.subject(), "[IT Assets - Laptop/Desktop Request] Need a laptop!!");
    /// ```
    pub fn try_new(submission: TicketSubmission) -> Result<Self, TicketValidationError> {
        let TicketSubmission {
            subject,
            description,
            department,
            priority,
            category,
            subcategory,
        } = submission;

        let description = required_text("description", &description)?;
        if subject.trim().is_empty() {
            return Err(TicketValidationError::EmptyField { field: "subject" });
        }
        let category = optional_text(category);
        let subcategory = optional_text(subcategory);
        taxonomy::validate(department, category.as_deref(), subcategory.as_deref())?;
        let cleaned = sanitize_subject(&subject);
        if cleaned.is_empty() {
            return Err(TicketValidationError::SubjectEmptyAfterSanitising);
        }
        let subject = compose_subject(category.as_deref(), subcategory.as_deref(), &cleaned);

        Ok(Self {
            subject,
            description,
            department,
            priority,
            category,
            subcategory,
        })
    }

    /// Stored subject, including any taxonomy prefix.
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Trimmed description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Target department.
    pub fn department(&self) -> Department {
        self.department
    }
}

pub(crate) fn required_text(field: &'static str, raw: &str) -> Result<String, TicketValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TicketValidationError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Support ticket record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Stable identifier.
    pub id: TicketId,
    /// Sanitised subject, including any taxonomy prefix.
    pub subject: String,
    /// Free-text description.
    pub description: String,
    /// Department responsible for the ticket.
    pub department: Department,
    /// Taxonomy category, if chosen.
    pub category: Option<String>,
    /// Taxonomy subcategory, if chosen.
    pub subcategory: Option<String>,
    /// Urgency.
    pub priority: Priority,
    /// Lifecycle status.
    pub status: TicketStatus,
    /// Latest comment left by the owner or a manager.
    pub comment: Option<String>,
    /// Submitting user. Never changes.
    pub created_by: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last successful mutation time.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Open a new ticket from a validated draft.
    pub fn open(id: TicketId, draft: TicketDraft, created_by: UserId, now: DateTime<Utc>) -> Self {
        let TicketDraft {
            subject,
            description,
            department,
            priority,
            category,
            subcategory,
        } = draft;
        Self {
            id,
            subject,
            description,
            department,
            category,
            subcategory,
            priority,
            status: TicketStatus::Open,
            comment: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Append-only record of a status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// Record identifier.
    pub id: Uuid,
    /// Ticket the change applies to.
    pub ticket_id: TicketId,
    /// Manager who made the change.
    pub actor_id: UserId,
    /// Status before the change.
    pub from_status: TicketStatus,
    /// Status after the change.
    pub to_status: TicketStatus,
    /// Comment supplied alongside the change.
    pub comment: Option<String>,
    /// When the change was applied.
    pub changed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests;
