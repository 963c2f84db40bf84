//! Read-only algorithms over a built registry.
pub mod linearize;
pub mod topology;
