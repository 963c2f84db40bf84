use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Handle into the owning `TypeRegistry`. Every relation in the graph is a
/// list of these; identity comparison is a `u32` compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    #[default]
    Class,
    Role,
    Module,
    Enum,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Class => "class",
            PackageType::Role => "role",
            PackageType::Module => "module",
            PackageType::Enum => "enum",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(PackageType::Class),
            "role" => Ok(PackageType::Role),
            "module" => Ok(PackageType::Module),
            "enum" => Ok(PackageType::Enum),
            other => Err(BuildError::UnknownPackageType(other.to_string())),
        }
    }
}

/// Edge label used when exporting the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// `is` clause, or a superclass granted through role composition.
    Inherits,
    /// `does` clause.
    Does,
}

/// One decoded declaration line. Role signatures stay with the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub packagetype: PackageType,
    pub categories: BTreeSet<String>,
    pub super_names: Vec<String>,
    pub role_names: Vec<String>,
}

impl Declaration {
    pub fn new(packagetype: PackageType, name: impl Into<String>) -> Self {
        Self { name: name.into(), packagetype, ..Default::default() }
    }

    pub fn is(mut self, parent: impl Into<String>) -> Self {
        self.super_names.push(parent.into());
        self
    }

    pub fn does(mut self, role: impl Into<String>) -> Self {
        self.role_names.push(role.into());
        self
    }

    pub fn in_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("class", PackageType::Class)]
    #[case("role", PackageType::Role)]
    #[case("module", PackageType::Module)]
    #[case("enum", PackageType::Enum)]
    fn test_packagetype_keywords(#[case] input: &str, #[case] expected: PackageType) {
        let parsed: PackageType = input.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), input);
    }

    #[rstest]
    #[case("Class")]
    #[case("grammar")]
    #[case("")]
    fn test_packagetype_rejects_unknown(#[case] input: &str) {
        let err = input.parse::<PackageType>().unwrap_err();
        assert!(matches!(err, BuildError::UnknownPackageType(ref s) if s == input));
    }

    #[test]
    fn test_declaration_builder_keeps_clause_order() {
        let d = Declaration::new(PackageType::Class, "D").is("B").is("C").does("R");
        assert_eq!(d.super_names, vec!["B", "C"]);
        assert_eq!(d.role_names, vec!["R"]);
        assert_eq!(d.packagetype, PackageType::Class);
    }
}
