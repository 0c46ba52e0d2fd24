//! gun-http - HTTP endpoints for a Gun-style key-value graph store

pub mod config;
pub mod error;
pub mod types;

pub mod adapter;
pub mod store;
pub mod api;

pub use adapter::{Adapter, Capabilities, GraphAdapter};
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
