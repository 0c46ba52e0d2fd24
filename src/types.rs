//! Core types for gun-http

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a graph node
pub type Soul = String;

/// A single graph node: field name to value, plus `_` metadata
pub type Node = Map<String, Value>;

/// A graph fragment: soul to node
pub type GraphData = Map<String, Value>;

/// Subset of a graph fragment that was actually written
pub type Diff = GraphData;

/// Key under which Gun keeps node metadata
pub const META_KEY: &str = "_";

/// Metadata field holding the node's soul
pub const SOUL_KEY: &str = "#";

/// Metadata field holding per-field states
pub const STATE_KEY: &str = ">";

/// Read hint passed to the adapter. Serializes as `{".": key}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetOptions {
    /// Restrict the read to this field of the node
    #[serde(rename = ".")]
    pub key: String,
}

impl GetOptions {
    pub fn single_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Result of resolving a request path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    pub soul: Soul,
    pub single_key: Option<String>,
}

impl RouteMatch {
    /// Options to forward to the adapter for this lookup
    pub fn options(&self) -> Option<GetOptions> {
        self.single_key.as_deref().map(GetOptions::single_key)
    }
}
