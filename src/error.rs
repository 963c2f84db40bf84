//! Error types for graph construction, linearization and configuration.
use thiserror::Error;

/// Failures that abort a build. No partial graph is handed out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Declaration #{index} has an empty type name")]
    EmptyName { index: usize },
    #[error("Unknown package type '{0}'")]
    UnknownPackageType(String),
    /// Only raised when role-cycle validation is switched on.
    #[error("Cyclic role composition among: {}", .roles.join(", "))]
    CyclicRoleComposition { roles: Vec<String> },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinearizeError {
    /// C3 could not pick a candidate, or `super` loops back on itself.
    /// Local to the `mro()` request that raised it.
    #[error("Inconsistent hierarchy for '{node}': {reason}")]
    InconsistentHierarchy { node: String, reason: HierarchyFault },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyFault {
    /// Merge stalled with at least one list still non-empty.
    NoValidCandidate,
    /// Expansion reached a type already being linearized.
    Cycle,
}

impl std::fmt::Display for HierarchyFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HierarchyFault::NoValidCandidate => f.write_str("no valid C3 merge candidate"),
            HierarchyFault::Cycle => f.write_str("inheritance cycle"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Root names must be non-empty and distinct (absolute root '{absolute_root}', base '{universal_base}')")]
    Roots { absolute_root: String, universal_base: String },
}

pub type BuildResult<T> = std::result::Result<T, BuildError>;
pub type LinearizeResult<T> = std::result::Result<T, LinearizeError>;
