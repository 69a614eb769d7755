//! Service entry-point: wires configuration, migrations, and the REST API.

mod server;

use std::env;

use actix_web::web;
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;
use zeroize::Zeroize;

use registrar::domain::TokenIssuer;
use registrar::inbound::http::health::HealthState;
use registrar::outbound::persistence::{DbPool, PoolConfig};
use server::{create_server, key_fingerprint, ServerConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Load the token signing secret from `TOKEN_SECRET_FILE`.
///
/// Development builds (or `TOKEN_ALLOW_EPHEMERAL=1`) fall back to an
/// ephemeral secret, which invalidates all outstanding tokens on restart.
fn load_token_secret() -> std::io::Result<Vec<u8>> {
    let secret_path =
        env::var("TOKEN_SECRET_FILE").unwrap_or_else(|_| "/var/run/secrets/token_secret".into());
    match std::fs::read(&secret_path) {
        Ok(bytes) => Ok(bytes),
        Err(err) => {
            let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %secret_path, error = %err, "using ephemeral token secret (dev only)");
                let mut ephemeral = Vec::with_capacity(32);
                ephemeral.extend_from_slice(Uuid::new_v4().as_bytes());
                ephemeral.extend_from_slice(Uuid::new_v4().as_bytes());
                Ok(ephemeral)
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read token secret at {secret_path}: {err}"
                )))
            }
        }
    }
}

/// Apply pending schema migrations before accepting traffic.
fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| std::io::Error::other(format!("database connection failed: {err}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "applied pending migrations");
    }
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let bind_addr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

    run_migrations(&database_url)?;

    let mut secret = load_token_secret()?;
    info!(fingerprint = %key_fingerprint(&secret), "token signing key loaded");
    let tokens = TokenIssuer::new(&secret);
    secret.zeroize();

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, pool, tokens),
    )?;

    info!(%bind_addr, "listening");
    server.await
}
