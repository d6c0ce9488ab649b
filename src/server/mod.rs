//! REST backend.
//!
//! Serves the work entry, client, category and reporting endpoints over HTTP
//! with bearer-token sessions. Handlers share a single SQLite connection
//! guarded by a mutex; each handler copies what it needs out of the database
//! and runs the computation pipeline without holding the lock across an
//! await point.
//!
//! ## Endpoints
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | GET | `/health` | no |
//! | POST | `/auth/signup`, `/auth/login` | no |
//! | POST | `/auth/logout` | yes |
//! | GET | `/users/me` | yes |
//! | PUT, DELETE | `/users/:id` | yes |
//! | GET, POST | `/work-entries` | yes |
//! | GET, PUT, DELETE | `/work-entries/:id` | yes |
//! | GET, POST | `/clients` | yes |
//! | PUT, DELETE | `/clients/:id` | yes |
//! | GET, POST | `/categories` | yes |
//! | DELETE | `/categories/:name` | yes |
//! | POST | `/invoice-preview` | yes |
//! | GET | `/summary` | yes |

pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;

use crate::db::db::Db;
use crate::libs::config::{Config, ServerConfig, DEFAULT_SESSION_TTL_HOURS};
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use axum::routing::{delete, get, post, put};
use axum::Router;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Settings the handlers need at request time.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub session_ttl_hours: i64,
    pub fallback_rate: f64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            fallback_rate: 0.0,
        }
    }
}

impl ServerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            session_ttl_hours: config.server_or_default().session_ttl_hours,
            fallback_rate: config.fallback_rate(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub settings: Arc<ServerSettings>,
}

impl AppState {
    pub fn new(db: Db, settings: ServerSettings) -> Self {
        Self {
            db: Arc::new(Mutex::new(db.conn)),
            settings: Arc::new(settings),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/users/me", get(handlers::users::me))
        .route("/users/:id", put(handlers::users::update).delete(handlers::users::remove))
        .route("/work-entries", get(handlers::entries::list).post(handlers::entries::create))
        .route(
            "/work-entries/:id",
            get(handlers::entries::show).put(handlers::entries::update).delete(handlers::entries::remove),
        )
        .route("/clients", get(handlers::clients::list).post(handlers::clients::create))
        .route("/clients/:id", put(handlers::clients::update).delete(handlers::clients::remove))
        .route("/categories", get(handlers::categories::list).post(handlers::categories::add))
        .route("/categories/:name", delete(handlers::categories::remove))
        .route("/invoice-preview", post(handlers::reports::invoice_preview))
        .route("/summary", get(handlers::reports::summary))
        .layer(axum::middleware::from_fn(middleware::trace_requests))
        .with_state(state)
}

/// Serves the API on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

/// Opens the configured database, binds `server.addr()` and serves until
/// Ctrl-C.
pub async fn run(config: &Config, server: &ServerConfig) -> Result<()> {
    let db = Db::open(&config.database_path()?)?;
    let state = AppState::new(db, ServerSettings::from_config(config));

    let listener = TcpListener::bind(server.addr()).await?;
    let local_addr = listener.local_addr()?;
    msg_info!(Message::ServerListening(local_addr.to_string()));
    tracing::info!(addr = %local_addr, "server started");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    msg_info!(Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
