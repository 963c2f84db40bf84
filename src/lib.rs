//! Type-graph construction and analysis.
//!
//! Builds an immutable graph from declared classes, roles, modules and enums,
//! computes each type's method resolution order with C3, and keeps the
//! inverse `sub`/`doers` relations plus one deterministic global order.
//!
//! ```text
//! Declaration[] ──> GraphBuilder ──> TypeGraph (frozen)
//!                                      ├─ lookup / accessors
//!                                      ├─ sorted()
//!                                      └─ mro(id), memoized on first request
//! ```

pub mod analysis;
pub mod build;
pub mod config;
pub mod error;
pub mod graph;
pub mod store;

#[cfg(feature = "python")]
mod bindings {
    pub mod python;
}

pub use build::GraphBuilder;
pub use config::GraphConfig;
pub use error::{BuildError, ConfigError, HierarchyFault, LinearizeError};
pub use graph::{GraphSnapshot, TypeGraph, TypeView};
pub use store::{Declaration, NodeId, PackageType, Relation};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pyfunction]
fn rust_core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Defines the `typegraph._core` Python module.
#[cfg(feature = "python")]
#[pymodule]
fn _core(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rust_core_version, m)?)?;
    m.add_class::<bindings::python::PyTypeGraph>()?;
    Ok(())
}
