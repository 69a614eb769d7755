//! Validated authentication request values.
//!
//! HTTP DTOs convert into these types before any service logic runs, so
//! handlers stay focused on request/response mapping.

use std::fmt;

use super::user::{EmailAddress, UserValidationError, Username};

/// Validation errors for authentication requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    User(UserValidationError),
    EmptyPassword,
    PasswordTooShort { min: usize },
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<UserValidationError> for AuthValidationError {
    fn from(err: UserValidationError) -> Self {
        Self::User(err)
    }
}

/// Minimum accepted password length at registration.
pub const PASSWORD_MIN: usize = 8;

fn validate_password(password: &str) -> Result<(), AuthValidationError> {
    if password.is_empty() {
        return Err(AuthValidationError::EmptyPassword);
    }
    if password.chars().count() < PASSWORD_MIN {
        return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
    }
    Ok(())
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: String,
}

impl Registration {
    /// Validate raw request parts.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        validate_password(password)?;
        Ok(Self {
            username,
            email,
            password: password.to_owned(),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Validated login request.
///
/// Login only checks for presence, not the registration password policy:
/// tightening the policy must not lock out existing accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: String,
}

impl LoginCredentials {
    /// Validate raw request parts.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: password.to_owned(),
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}
