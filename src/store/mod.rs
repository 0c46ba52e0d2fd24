//! Reference graph adapter

mod memory;

pub use memory::{GraphStats, MemoryGraph};
