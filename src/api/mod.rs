//! HTTP API layer

mod handlers;
mod resolver;
mod response;
mod routes;

pub use handlers::{handle_get, handle_put};
pub use resolver::{RouteTable, KEY_FROM_NODE_PATTERN, NODE_PATTERN};
pub use response::{ApiError, NULL_BODY};
pub use routes::{create_router, create_server, AppState, ServerOptions, DEFAULT_MAX_BODY_BYTES};
