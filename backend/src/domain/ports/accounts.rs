//! Driving port for registration and login.

use async_trait::async_trait;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::token::SignedToken;
use crate::domain::user::User;

/// A logged-in user together with their freshly issued bearer credential.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: SignedToken,
}

/// Use-cases over the identity store and the session issuer.
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Create a new account. Duplicate email or username is a `Conflict`.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthenticatedUser, Error>;
}
