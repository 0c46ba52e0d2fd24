//! Capability set a graph adapter may implement
//!
//! Adapters come in different shapes: some answer synchronously, some only
//! asynchronously, and some can hand back a node already serialized to JSON.
//! An implementation overrides the methods it supports and advertises them
//! through [`GraphAdapter::capabilities`]. Methods left at their default return
//! [`Error::Unsupported`].

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::{Diff, GetOptions, GraphData, Node};

/// Methods an adapter actually implements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub get_json_string_sync: bool,
    pub get_json_string: bool,
    pub get_sync: bool,
    pub get: bool,
    pub put_sync: bool,
    pub put: bool,
}

impl Capabilities {
    /// True if at least one read method is available
    pub fn can_read(&self) -> bool {
        self.get_json_string_sync || self.get_json_string || self.get_sync || self.get
    }

    /// True if at least one write method is available
    pub fn can_write(&self) -> bool {
        self.put_sync || self.put
    }
}

/// External graph store reached by the HTTP layer
#[async_trait]
pub trait GraphAdapter: Send + Sync {
    /// Which of the methods below are implemented
    fn capabilities(&self) -> Capabilities;

    /// Node for `soul` as JSON text; empty string when absent
    fn get_json_string_sync(&self, _soul: &str, _opts: Option<&GetOptions>) -> Result<String> {
        Err(Error::Unsupported("get_json_string_sync"))
    }

    /// Node for `soul` as JSON text; empty string when absent
    async fn get_json_string(&self, _soul: &str, _opts: Option<&GetOptions>) -> Result<String> {
        Err(Error::Unsupported("get_json_string"))
    }

    fn get_sync(&self, _soul: &str, _opts: Option<&GetOptions>) -> Result<Option<Node>> {
        Err(Error::Unsupported("get_sync"))
    }

    async fn get(&self, _soul: &str, _opts: Option<&GetOptions>) -> Result<Option<Node>> {
        Err(Error::Unsupported("get"))
    }

    /// Merge `data` into the graph, returning what changed
    fn put_sync(&self, _data: &GraphData) -> Result<Option<Diff>> {
        Err(Error::Unsupported("put_sync"))
    }

    /// Merge `data` into the graph, returning what changed
    async fn put(&self, _data: &GraphData) -> Result<Option<Diff>> {
        Err(Error::Unsupported("put"))
    }
}
