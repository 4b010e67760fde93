//! User accounts, roles, and departments.
//!
//! Managers are bound to the department named after their role; employees
//! belong to no department. The binding is derived from [`Role`] so a user
//! can never carry a mismatched department.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised when constructing user values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The username was blank.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The display name was blank.
    #[error("name must not be empty")]
    EmptyName,
    /// The display name exceeded the maximum length.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum number of characters.
        max: usize,
    },
    /// A stored role value was not recognised.
    #[error("unknown role: {value}")]
    UnknownRole {
        /// The rejected value.
        value: String,
    },
    /// A stored or requested department value was not recognised.
    #[error("unknown department: {value}")]
    UnknownDepartment {
        /// The rejected value.
        value: String,
    },
    /// A stored department disagreed with the one implied by the role.
    #[error("role {role} cannot belong to department {department}")]
    DepartmentMismatch {
        /// Role of the user.
        role: Role,
        /// Department found in storage.
        department: String,
    },
}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
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

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Department that owns and triages tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    /// Office administration.
    Admin,
    /// Finance and accounts.
    Finance,
    /// Human resources.
    Hr,
}

impl Department {
    /// Every department, in display order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Finance, Self::Hr];

    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Finance => "FINANCE",
            Self::Hr => "HR",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "FINANCE" => Ok(Self::Finance),
            "HR" => Ok(Self::Hr),
            other => Err(UserValidationError::UnknownDepartment {
                value: other.to_owned(),
            }),
        }
    }
}

/// Role assigned to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Submits tickets and manages their own.
    Employee,
    /// Manager of the ADMIN department.
    Admin,
    /// Manager of the FINANCE department.
    Finance,
    /// Manager of the HR department.
    Hr,
}

impl Role {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Admin => "ADMIN",
            Self::Finance => "FINANCE",
            Self::Hr => "HR",
        }
    }

    /// Whether this role manages a department.
    pub const fn is_manager(self) -> bool {
        !matches!(self, Self::Employee)
    }

    /// Department managed by this role, if any.
    pub const fn department(self) -> Option<Department> {
        match self {
            Self::Employee => None,
            Self::Admin => Some(Department::Admin),
            Self::Finance => Some(Department::Finance),
            Self::Hr => Some(Department::Hr),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMPLOYEE" => Ok(Self::Employee),
            "ADMIN" => Ok(Self::Admin),
            "FINANCE" => Ok(Self::Finance),
            "HR" => Ok(Self::Hr),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Login name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maximum number of characters in a display name.
pub const DISPLAY_NAME_MAX: usize = 100;

/// Human readable name shown next to tickets and in the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Trim and validate a display name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque password hash as produced by the configured hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Registered user.
///
/// ## Invariants
/// - `department()` is `Some` exactly when the role is a manager role, and
///   then names the role's own department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    name: DisplayName,
    role: Role,
    password_hash: PasswordHash,
}

impl User {
    /// Assemble a user from validated parts.
    pub fn new(
        id: UserId,
        username: Username,
        name: DisplayName,
        role: Role,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id,
            username,
            name,
            role,
            password_hash,
        }
    }

    /// Rebuild a user from stored values, checking the role/department binding.
    pub fn from_stored(
        id: UserId,
        username: Username,
        name: DisplayName,
        role: Role,
        department: Option<&str>,
        password_hash: PasswordHash,
    ) -> Result<Self, UserValidationError> {
        let expected = role.department();
        let stored = department.map(Department::from_str).transpose()?;
        if stored != expected {
            return Err(UserValidationError::DepartmentMismatch {
                role,
                department: department.unwrap_or("<none>").to_owned(),
            });
        }
        Ok(Self::new(id, username, name, role, password_hash))
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Assigned role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Department managed by this user, if any.
    pub fn department(&self) -> Option<Department> {
        self.role.department()
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Copy of this user with a new display name.
    pub fn with_name(mut self, name: DisplayName) -> Self {
        self.name = name;
        self
    }

    /// Copy of this user with a new password hash.
    pub fn with_password_hash(mut self, password_hash: PasswordHash) -> Self {
        self.password_hash = password_hash;
        self
    }
}
