//! Account service: registration and login over the identity store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::password::PasswordHash;
use crate::domain::ports::{Accounts, AuthenticatedUser, UserRepository, UserStoreError};
use crate::domain::token::TokenIssuer;
use crate::domain::user::{User, UserId};

/// Unknown email and wrong password must be indistinguishable.
const INVALID_CREDENTIALS: &str = "invalid email or password";

fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::DuplicateIdentity => {
            Error::conflict("user with this email or username already exists")
        }
        other => Error::internal(format!("identity store failure: {other}")),
    }
}

/// Accounts implementation over a user repository and the token issuer.
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
    tokens: Arc<TokenIssuer>,
}

impl<R> AccountService<R> {
    /// Create a new account service.
    pub fn new(users: Arc<R>, tokens: Arc<TokenIssuer>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl<R> Accounts for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let password_hash = PasswordHash::derive(registration.password())
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
            password_hash,
            Utc::now(),
        );
        // Insert-first: the store's unique constraints decide duplicates,
        // including a concurrent registration with the same email.
        self.users.insert(&user).await.map_err(map_store_error)?;
        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthenticatedUser, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let matches = user
            .password_hash()
            .verify(credentials.password())
            .map_err(|err| Error::internal(format!("password verification failed: {err}")))?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.tokens.issue(user.id(), user.email())?;
        Ok(AuthenticatedUser { user, token })
    }
}
