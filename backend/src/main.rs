//! Backend entry-point: wires the ledger services, REST endpoints, and
//! OpenAPI docs.

mod server;

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use backend::domain::UserId;
use backend::inbound::http::health::HealthState;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let owner = load_owner()?;
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr, owner);
    let server = server::create_server(health_state, config)?;
    server.await
}

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn load_owner() -> std::io::Result<UserId> {
    match env::var("LEDGER_OWNER_ID") {
        Ok(raw) => UserId::new(raw.trim())
            .map_err(|e| std::io::Error::other(format!("invalid LEDGER_OWNER_ID: {e}"))),
        Err(_) => {
            let allow_dev = env::var("LEDGER_ALLOW_EPHEMERAL_OWNER").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                let owner = UserId::random();
                warn!(%owner, "LEDGER_OWNER_ID not set; using a temporary owner (dev only)");
                Ok(owner)
            } else {
                Err(std::io::Error::other(
                    "LEDGER_OWNER_ID must be set to the owner principal UUID",
                ))
            }
        }
    }
}
