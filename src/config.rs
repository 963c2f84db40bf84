//! Build and linearization settings.
//!
//! `GraphConfig::default()` is the reference behavior: `Mu` as the absolute
//! root, `Any` as the universal base, C3 merging parent linearizations only,
//! and no role-cycle check.

use crate::error::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    pub roots: RootConfig,
    pub linearization: LinearizationConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RootConfig {
    /// Never receives a default parent.
    pub absolute_root: String,
    /// Attached to every rootless non-role type.
    pub universal_base: String,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self { absolute_root: "Mu".to_string(), universal_base: "Any".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinearizationConfig {
    /// Append the ordered list of direct parents to the merge set, as in
    /// textbook C3.
    pub canonical_c3: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Fail the build on cyclic `does` chains instead of looping forever
    /// while flattening.
    pub reject_role_cycles: bool,
}

impl GraphConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GraphConfig = toml::from_str(source)?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        let r = &self.roots;
        if r.absolute_root.is_empty() || r.universal_base.is_empty() || r.absolute_root == r.universal_base {
            return Err(ConfigError::Roots {
                absolute_root: r.absolute_root.clone(),
                universal_base: r.universal_base.clone(),
            });
        }
        Ok(())
    }
}
