//! In-memory graph with optional JSON snapshot on disk
//!
//! Merges resolve conflicts per field using the state stored under `_.>`:
//! the higher state wins, ties go to the value whose JSON text sorts higher.
//! Fields arriving without a state are stamped with the current time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::adapter::{Capabilities, GraphAdapter};
use crate::error::{Error, Result};
use crate::types::{Diff, GetOptions, GraphData, Node, Soul, META_KEY, SOUL_KEY, STATE_KEY};

/// Node and field counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub fields: usize,
}

/// Graph adapter keeping every node in memory
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: RwLock<HashMap<Soul, Node>>,
    snapshot: Option<PathBuf>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a graph backed by a snapshot file, loading it if it exists
    pub fn open(path: &Path) -> Result<Self> {
        let nodes = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let graph: HashMap<Soul, Node> = serde_json::from_str(&content)
                .map_err(|e| Error::InvalidGraph(format!("Failed to parse snapshot: {}", e)))?;
            tracing::info!("Loaded {} nodes from {:?}", graph.len(), path);
            graph
        } else {
            HashMap::new()
        };

        Ok(Self {
            nodes: RwLock::new(nodes),
            snapshot: Some(path.to_path_buf()),
        })
    }

    /// Read a node, or a single-field projection of it
    pub fn get_node(&self, soul: &str, opts: Option<&GetOptions>) -> Result<Option<Node>> {
        if soul.is_empty() {
            return Ok(None);
        }

        let nodes = self.read_lock()?;
        let Some(node) = nodes.get(soul) else {
            return Ok(None);
        };

        Ok(match opts {
            Some(opts) => project(soul, node, &opts.key),
            None => Some(node.clone()),
        })
    }

    /// Merge a graph fragment and return the fields that changed
    pub fn merge(&self, data: &GraphData) -> Result<Diff> {
        // Validate up front so a bad node cannot leave a half-applied merge
        for (soul, node) in data {
            if !node.is_object() {
                return Err(Error::InvalidGraph(format!("node {} is not an object", soul)));
            }
        }

        let now = Value::from(chrono::Utc::now().timestamp_millis());
        let mut nodes = self.write_lock()?;
        let mut diff = Diff::new();
        let mut staged: HashMap<Soul, Node> = HashMap::new();

        for (soul, incoming) in data {
            let Some(incoming) = incoming.as_object() else {
                continue;
            };
            let incoming_states = states(incoming);

            let mut changes = Vec::new();
            for (field, value) in incoming {
                if field == META_KEY {
                    continue;
                }
                let state = incoming_states
                    .and_then(|s| s.get(field))
                    .filter(|s| s.is_number())
                    .unwrap_or(&now);
                let current = nodes.get(soul.as_str()).and_then(|node| field_with_state(node, field));

                if wins(state, value, current) {
                    changes.push((field.clone(), value.clone(), state.clone()));
                }
            }

            if changes.is_empty() {
                continue;
            }

            let mut node = nodes
                .get(soul.as_str())
                .cloned()
                .unwrap_or_else(|| empty_node(soul));
            let mut changed = Node::new();
            let mut changed_states = Map::new();

            for (field, value, state) in changes {
                set_state(&mut node, &field, state.clone());
                node.insert(field.clone(), value.clone());
                changed_states.insert(field.clone(), state);
                changed.insert(field, value);
            }

            changed.insert(META_KEY.to_string(), meta(soul, changed_states));
            diff.insert(soul.clone(), Value::Object(changed));
            staged.insert(soul.clone(), node);
        }

        if staged.is_empty() {
            return Ok(diff);
        }

        // Nothing becomes visible until the snapshot holding it is on disk
        if let Some(path) = &self.snapshot {
            let mut snapshot: HashMap<&str, &Node> =
                nodes.iter().map(|(soul, node)| (soul.as_str(), node)).collect();
            snapshot.extend(staged.iter().map(|(soul, node)| (soul.as_str(), node)));
            save_snapshot(path, &snapshot)?;
        }

        tracing::debug!("Merged {} nodes", staged.len());
        nodes.extend(staged);

        Ok(diff)
    }

    pub fn stats(&self) -> Result<GraphStats> {
        let nodes = self.read_lock()?;
        let fields = nodes
            .values()
            .map(|node| node.keys().filter(|k| k.as_str() != META_KEY).count())
            .sum();
        Ok(GraphStats {
            nodes: nodes.len(),
            fields,
        })
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<'_, HashMap<Soul, Node>>> {
        self.nodes
            .read()
            .map_err(|_| Error::Adapter("graph lock poisoned".into()))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, HashMap<Soul, Node>>> {
        self.nodes
            .write()
            .map_err(|_| Error::Adapter("graph lock poisoned".into()))
    }
}

#[async_trait]
impl GraphAdapter for MemoryGraph {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            get_json_string_sync: true,
            get_sync: true,
            put_sync: true,
            ..Default::default()
        }
    }

    fn get_json_string_sync(&self, soul: &str, opts: Option<&GetOptions>) -> Result<String> {
        match self.get_node(soul, opts)? {
            Some(node) => Ok(serde_json::to_string(&node)?),
            None => Ok(String::new()),
        }
    }

    fn get_sync(&self, soul: &str, opts: Option<&GetOptions>) -> Result<Option<Node>> {
        self.get_node(soul, opts)
    }

    fn put_sync(&self, data: &GraphData) -> Result<Option<Diff>> {
        let diff = self.merge(data)?;
        Ok(if diff.is_empty() { None } else { Some(diff) })
    }
}

/// Write the snapshot beside its final path, then rename it into place
fn save_snapshot(path: &Path, nodes: &HashMap<&str, &Node>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(nodes)?;
    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, content)?;
    std::fs::rename(&staging, path)?;
    Ok(())
}

fn meta(soul: &str, states: Map<String, Value>) -> Value {
    let mut meta = Map::new();
    meta.insert(SOUL_KEY.to_string(), Value::String(soul.to_string()));
    meta.insert(STATE_KEY.to_string(), Value::Object(states));
    Value::Object(meta)
}

fn empty_node(soul: &str) -> Node {
    let mut node = Node::new();
    node.insert(META_KEY.to_string(), meta(soul, Map::new()));
    node
}

fn states(node: &Node) -> Option<&Map<String, Value>> {
    node.get(META_KEY)?.get(STATE_KEY)?.as_object()
}

fn field_with_state<'a>(node: &'a Node, field: &str) -> Option<(&'a Value, &'a Value)> {
    let value = node.get(field)?;
    let state = states(node)?.get(field)?;
    Some((state, value))
}

fn set_state(node: &mut Node, field: &str, state: Value) {
    let meta = node
        .entry(META_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(meta) = meta {
        let states = meta
            .entry(STATE_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(states) = states {
            states.insert(field.to_string(), state);
        }
    }
}

/// Whether an incoming field replaces what is stored
fn wins(state: &Value, value: &Value, current: Option<(&Value, &Value)>) -> bool {
    let Some((current_state, current_value)) = current else {
        return true;
    };

    let incoming = state.as_f64().unwrap_or(0.0);
    let existing = current_state.as_f64().unwrap_or(0.0);

    if incoming > existing {
        true
    } else if incoming < existing {
        false
    } else {
        value.to_string() > current_value.to_string()
    }
}

fn project(soul: &str, node: &Node, key: &str) -> Option<Node> {
    let value = node.get(key)?;

    let mut field_states = Map::new();
    if let Some(state) = states(node).and_then(|s| s.get(key)) {
        field_states.insert(key.to_string(), state.clone());
    }

    let mut projected = Node::new();
    projected.insert(META_KEY.to_string(), meta(soul, field_states));
    projected.insert(key.to_string(), value.clone());
    Some(projected)
}
