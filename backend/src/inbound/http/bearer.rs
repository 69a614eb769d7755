//! Bearer credential extraction for protected handlers.
//!
//! Handlers take a [`BearerIdentity`] parameter; extraction reads the
//! `Authorization: Bearer <token>` header, verifies it against the app-data
//! [`TokenIssuer`], and yields the verified identity. Missing or bad
//! credentials reject the request with `401` before the handler runs.

use std::future::{ready, Ready};

use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use crate::domain::{Error, TokenIssuer, UserId};

/// Verified identity of the requesting user.
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    user_id: UserId,
    email: String,
}

impl BearerIdentity {
    /// The authenticated user's id, used as the ledger's `userId` parameter.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The email bound into the credential at login.
    pub fn email(&self) -> &str {
        &self.email
    }
}

fn extract(req: &HttpRequest) -> Result<BearerIdentity, Error> {
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| Error::internal("token issuer is not configured"))?;

    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("no token provided"))?
        .to_str()
        .map_err(|_| Error::unauthorized("invalid authorization header"))?;
    let token = raw
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("invalid authorization header"))?;

    let identity = issuer.verify(token.trim())?;
    Ok(BearerIdentity {
        user_id: identity.user_id,
        email: identity.email,
    })
}

impl FromRequest for BearerIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
