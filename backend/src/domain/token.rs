//! Bearer credential issuance and verification.
//!
//! A verified identity becomes a signed, time-boxed token; protected
//! requests present it back and verification yields the user id the ledger
//! operates on. The signing key is injected configuration built once at
//! startup — there is no process-global key state.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::Error;
use super::user::{EmailAddress, UserId};

/// Token lifetime: 30 days from issuance.
pub const TOKEN_TTL_DAYS: i64 = 30;

/// Signed claims carried by the bearer credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    /// Email bound at login time.
    pub email: String,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiry (seconds since epoch).
    pub exp: i64,
}

/// An encoded, signed token ready to hand to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The verified identity extracted from a presented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: UserId,
    pub email: String,
}

/// Issues and verifies bearer credentials with a symmetric key (HS256).
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Build an issuer from raw secret bytes.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::default(),
        }
    }

    /// Issue a token for a verified identity, expiring in
    /// [`TOKEN_TTL_DAYS`] days.
    pub fn issue(&self, user_id: &UserId, email: &EmailAddress) -> Result<SignedToken, Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| Error::internal(format!("token signing failed: {err}")))?;
        Ok(SignedToken(token))
    }

    /// Verify a presented token and extract the identity it binds.
    ///
    /// Bad signature, malformed token, and expiry all collapse to the same
    /// `Unauthorized`; the caller cannot distinguish them.
    pub fn verify(&self, token: &str) -> Result<TokenIdentity, Error> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| Error::unauthorized("invalid or expired token"))?;
        let user_id = UserId::new(&data.claims.sub)
            .map_err(|_| Error::unauthorized("invalid or expired token"))?;
        Ok(TokenIdentity {
            user_id,
            email: data.claims.email,
        })
    }
}
