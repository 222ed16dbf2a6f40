//! Backend entry-point: migrations, seeding, and the HTTP server.

mod server;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use std::env;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_key::key_fingerprint;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::seeding::seed_departments_on_startup;
use server::{ServerConfig, create_server};

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

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

    run_pending_migrations(&database_url)
        .await
        .map_err(std::io::Error::other)?;

    let db_pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(std::io::Error::other)?;

    seed_departments_on_startup(&db_pool)
        .await
        .map_err(std::io::Error::other)?;

    let key = load_session_key()?;
    info!(fingerprint = %key_fingerprint(&key), "session key loaded");

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr, db_pool);

    let server = create_server(health_state.clone(), config)?;
    health_state.mark_ready();
    server.await
}
