//! Owning storage for type nodes and their relation lists.
pub mod registry;
pub mod types;

pub use registry::{Links, TypeRegistry};
pub use types::{Declaration, NodeId, PackageType, Relation};
