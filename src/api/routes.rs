//! API route definitions

use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::resolver::RouteTable;
use crate::adapter::{Adapter, GraphAdapter};
use crate::config::Config;
use crate::error::Result;

/// Default cap on PUT bodies, in bytes
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024;

/// HTTP-level settings
#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    /// Largest PUT body accepted
    pub max_body_bytes: usize,
    /// Allow cross-origin requests from any origin
    pub cors: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cors: true,
        }
    }
}

impl From<&Config> for ServerOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_body_bytes: config.max_body_bytes,
            cors: config.cors,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub adapter: Adapter,
    pub routes: Arc<RouteTable>,
    pub options: ServerOptions,
}

impl AppState {
    pub fn new(adapter: Adapter, options: ServerOptions) -> Result<Self> {
        Ok(Self {
            adapter,
            routes: Arc::new(RouteTable::standard()?),
            options,
        })
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = state.options.cors;

    let router = Router::new()
        .route("/gun/nodes/{*soul}", get(handlers::handle_get))
        .route("/gun/key/{*path}", get(handlers::handle_get))
        .route("/gun/nodes", put(handlers::handle_put))
        .route(
            "/gun/nodes/",
            get(handlers::handle_get).put(handlers::handle_put),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

/// Wrap `adapter` once and build a router serving it
pub fn create_server<A: GraphAdapter + 'static>(adapter: A, options: ServerOptions) -> Result<Router> {
    let state = AppState::new(Adapter::new(adapter)?, options)?;
    Ok(create_router(state))
}
