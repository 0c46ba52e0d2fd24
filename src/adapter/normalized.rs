//! Canonical read/write interface over any [`GraphAdapter`]
//!
//! The preferred method is picked once when the adapter is wrapped, so request
//! handlers never probe capabilities. Read preference: pre-serialized sync,
//! pre-serialized async, structured sync, structured async. Write preference:
//! sync, then async.

use std::fmt;
use std::sync::Arc;

use super::capability::GraphAdapter;
use crate::error::{Error, Result};
use crate::types::{Diff, GetOptions, GraphData, Node};

/// Read method chosen for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPath {
    JsonStringSync,
    JsonString,
    Sync,
    Async,
}

/// Write method chosen for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePath {
    Sync,
    Async,
}

/// Shared handle to a graph adapter with its read and write paths fixed
#[derive(Clone)]
pub struct Adapter {
    inner: Arc<dyn GraphAdapter>,
    read: ReadPath,
    write: WritePath,
}

impl Adapter {
    pub fn new<A: GraphAdapter + 'static>(adapter: A) -> Result<Self> {
        Self::from_arc(Arc::new(adapter))
    }

    /// Wrap an adapter that is already shared elsewhere
    pub fn from_arc(inner: Arc<dyn GraphAdapter>) -> Result<Self> {
        let caps = inner.capabilities();

        let read = if caps.get_json_string_sync {
            ReadPath::JsonStringSync
        } else if caps.get_json_string {
            ReadPath::JsonString
        } else if caps.get_sync {
            ReadPath::Sync
        } else if caps.get {
            ReadPath::Async
        } else {
            return Err(Error::NoCapability("read"));
        };

        let write = if caps.put_sync {
            WritePath::Sync
        } else if caps.put {
            WritePath::Async
        } else {
            return Err(Error::NoCapability("write"));
        };

        tracing::debug!(?read, ?write, "Graph adapter capabilities resolved");

        Ok(Self { inner, read, write })
    }

    pub fn read_path(&self) -> ReadPath {
        self.read
    }

    pub fn write_path(&self) -> WritePath {
        self.write
    }

    /// Read a node as JSON text. An empty string means the node was not found.
    pub async fn read(&self, soul: &str, opts: Option<&GetOptions>) -> Result<String> {
        match self.read {
            ReadPath::JsonStringSync => self.inner.get_json_string_sync(soul, opts),
            ReadPath::JsonString => self.inner.get_json_string(soul, opts).await,
            ReadPath::Sync => node_to_json(self.inner.get_sync(soul, opts)?),
            ReadPath::Async => node_to_json(self.inner.get(soul, opts).await?),
        }
    }

    /// Merge a graph fragment. A missing diff from the adapter becomes empty.
    pub async fn write(&self, data: &GraphData) -> Result<Diff> {
        let diff = match self.write {
            WritePath::Sync => self.inner.put_sync(data)?,
            WritePath::Async => self.inner.put(data).await?,
        };
        Ok(diff.unwrap_or_default())
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("read", &self.read)
            .field("write", &self.write)
            .finish_non_exhaustive()
    }
}

fn node_to_json(node: Option<Node>) -> Result<String> {
    match node {
        Some(node) => Ok(serde_json::to_string(&node)?),
        None => Ok(String::new()),
    }
}
