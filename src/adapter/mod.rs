//! Graph adapter abstraction

mod capability;
mod normalized;

pub use capability::{Capabilities, GraphAdapter};
pub use normalized::{Adapter, ReadPath, WritePath};
