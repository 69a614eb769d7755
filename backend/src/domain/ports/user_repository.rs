//! Port for identity store persistence.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, User};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by identity store adapters.
    pub enum UserStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "identity store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "identity store query failed: {message}",
        /// The unique email/username constraint rejected an insert.
        DuplicateIdentity =>
            "email or username already registered",
    }
}

/// Port for creating users and finding them by credential lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    ///
    /// A unique-violation on email or username surfaces as
    /// [`UserStoreError::DuplicateIdentity`], including under concurrent
    /// duplicate registration.
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// Find a user by (normalised) email address.
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<User>, UserStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_identity_has_a_stable_message() {
        let err = UserStoreError::duplicate_identity();
        assert_eq!(err.to_string(), "email or username already registered");
    }

    #[test]
    fn connection_error_carries_the_diagnostic() {
        let err = UserStoreError::connection("refused");
        assert!(err.to_string().contains("refused"));
    }
}
