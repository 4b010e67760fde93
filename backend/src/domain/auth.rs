//! Authentication and profile self-service inputs.
//!
//! Constructors validate raw strings before a handler talks to a port, so
//! services only ever see well-formed credentials and profile changes.

use zeroize::Zeroizing;

use super::user::{DisplayName, UserValidationError};

/// Minimum length of a new password, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;
/// Maximum length of a new password, in bytes (bcrypt truncates beyond this).
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use helpdesk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" jane.employee ", "password123").unwrap();
/// assert_eq!(creds.username(), "jane.employee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation failures for profile updates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileValidationError {
    /// The name was rejected.
    #[error(transparent)]
    Name(#[from] UserValidationError),
    /// A new password was supplied without the current one.
    #[error("current password is required to set a new password")]
    MissingCurrentPassword,
    /// The confirmation did not match the new password.
    #[error("new passwords do not match")]
    PasswordMismatch,
    /// The new password is too short.
    #[error("new password must be at least {min} characters long")]
    PasswordTooShort {
        /// Minimum length in characters.
        min: usize,
    },
    /// The new password exceeds the hashing limit.
    #[error("new password must be at most {max} bytes long")]
    PasswordTooLong {
        /// Maximum length in bytes.
        max: usize,
    },
    /// The current password did not verify against the stored hash.
    #[error("current password is incorrect")]
    IncorrectCurrentPassword,
}

impl ProfileValidationError {
    /// Request field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::MissingCurrentPassword | Self::IncorrectCurrentPassword => "currentPassword",
            Self::PasswordMismatch => "confirmPassword",
            Self::PasswordTooShort { .. } | Self::PasswordTooLong { .. } => "newPassword",
        }
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Name(UserValidationError::NameTooLong { .. }) => "name_too_long",
            Self::Name(_) => "empty_name",
            Self::MissingCurrentPassword => "missing_current_password",
            Self::PasswordMismatch => "password_mismatch",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::PasswordTooLong { .. } => "password_too_long",
            Self::IncorrectCurrentPassword => "incorrect_current_password",
        }
    }
}

/// Requested password change, already checked for shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current: Zeroizing<String>,
    new: Zeroizing<String>,
}

impl PasswordChange {
    /// Password the caller claims to hold today.
    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    /// Replacement password.
    pub fn new_password(&self) -> &str {
        self.new.as_str()
    }
}

/// Validated profile self-service update.
///
/// An empty `new_password` means the password stays unchanged, in which case
/// `current_password` and `confirm_password` are ignored.
///
/// # Examples
/// ```
/// use helpdesk::domain::ProfileUpdate;
///
/// let update = ProfileUpdate::try_from_parts(" Jane ", None, None, None).unwrap();
/// assert_eq!(update.name().as_ref(), "Jane");
/// assert!(update.password_change().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: DisplayName,
    password_change: Option<PasswordChange>,
}

impl ProfileUpdate {
    /// Validate raw profile form values.
    pub fn try_from_parts(
        name: &str,
        current_password: Option<&str>,
        new_password: Option<&str>,
        confirm_password: Option<&str>,
    ) -> Result<Self, ProfileValidationError> {
        let name = DisplayName::new(name)?;
        let password_change = match new_password.filter(|value| !value.is_empty()) {
            None => None,
            Some(new) => {
                let current = current_password
                    .filter(|value| !value.is_empty())
                    .ok_or(ProfileValidationError::MissingCurrentPassword)?;
                if confirm_password != Some(new) {
                    return Err(ProfileValidationError::PasswordMismatch);
                }
                if new.chars().count() < PASSWORD_MIN_LENGTH {
                    return Err(ProfileValidationError::PasswordTooShort {
                        min: PASSWORD_MIN_LENGTH,
                    });
                }
                if new.len() > PASSWORD_MAX_BYTES {
                    return Err(ProfileValidationError::PasswordTooLong {
                        max: PASSWORD_MAX_BYTES,
                    });
                }
                Some(PasswordChange {
                    current: Zeroizing::new(current.to_owned()),
                    new: Zeroizing::new(new.to_owned()),
                })
            }
        };
        Ok(Self {
            name,
            password_change,
        })
    }

    /// New display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Requested password change, if any.
    pub fn password_change(&self) -> Option<&PasswordChange> {
        self.password_change.as_ref()
    }
}
