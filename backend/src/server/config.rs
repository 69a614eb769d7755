//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use registrar::domain::TokenIssuer;
use registrar::outbound::persistence::DbPool;
use sha2::{Digest, Sha256};

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) tokens: TokenIssuer,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, tokens: TokenIssuer) -> Self {
        Self {
            bind_addr,
            db_pool,
            tokens,
        }
    }
}

/// Short fingerprint of the token signing key for startup logs, so operators
/// can tell which key a replica runs without ever logging the key itself.
pub fn key_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(&digest[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_short() {
        let a = key_fingerprint(b"secret");
        let b = key_fingerprint(b"secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn fingerprint_differs_per_key() {
        assert_ne!(key_fingerprint(b"one"), key_fingerprint(b"two"));
    }
}
