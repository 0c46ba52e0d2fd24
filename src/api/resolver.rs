//! Request path resolution
//!
//! Patterns use `{soul}` and `{key}` placeholders. Each placeholder captures
//! the rest of the path greedily, slashes included. Rules are tried in order
//! and the first match wins.

use regex::Regex;

use crate::error::{Error, Result};
use crate::types::RouteMatch;

/// `/gun/key/<key>/from_node/<soul>`
pub const KEY_FROM_NODE_PATTERN: &str = "/gun/key/{key}/from_node/{soul}";

/// `/gun/nodes/<soul>`
pub const NODE_PATTERN: &str = "/gun/nodes/{soul}";

/// Compiled, immutable list of path rules
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<Regex>,
}

impl RouteTable {
    /// Compile rules from patterns, in priority order
    pub fn new(patterns: &[&str]) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// The key-projection rule followed by the node rule
    pub fn standard() -> Result<Self> {
        Self::new(&[KEY_FROM_NODE_PATTERN, NODE_PATTERN])
    }

    /// Resolve a path; unmatched paths yield an empty soul
    pub fn resolve(&self, path: &str) -> RouteMatch {
        for rule in &self.rules {
            if let Some(caps) = rule.captures(path) {
                return RouteMatch {
                    soul: caps
                        .name("soul")
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default(),
                    single_key: caps.name("key").map(|m| m.as_str().to_string()),
                };
            }
        }

        RouteMatch::default()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    if !pattern.contains("{soul}") {
        return Err(Error::Route(format!("{} has no {{soul}} placeholder", pattern)));
    }

    let mut source = String::from("^");
    let mut rest = pattern;

    while let Some(start) = rest.find('{') {
        source.push_str(&regex::escape(&rest[..start]));

        let end = rest[start..]
            .find('}')
            .map(|i| start + i)
            .ok_or_else(|| Error::Route(format!("unclosed placeholder in {}", pattern)))?;

        let name = &rest[start + 1..end];
        if name != "soul" && name != "key" {
            return Err(Error::Route(format!("unknown placeholder {{{}}} in {}", name, pattern)));
        }
        source.push_str(&format!("(?P<{}>.*)", name));

        rest = &rest[end + 1..];
    }

    source.push_str(&regex::escape(rest));
    source.push('$');

    Ok(Regex::new(&source)?)
}
