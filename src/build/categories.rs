//! Applies category headers to the declarations that follow them.
//!
//! The line parser hands over one event per source line. A header sets the
//! active categories until the next header or blank line; comments do not
//! touch them.

use crate::store::{Declaration, PackageType};
use std::collections::BTreeSet;

/// A declaration line before category context is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredType {
    pub name: String,
    pub packagetype: PackageType,
    pub super_names: Vec<String>,
    pub role_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    Blank,
    Comment,
    CategoryHeader(Vec<String>),
    Declaration(DeclaredType),
}

/// Turns a stream of source events into declaration records.
pub fn scope_categories<I>(events: I) -> Vec<Declaration>
where
    I: IntoIterator<Item = SourceEvent>,
{
    let mut active: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::new();

    for event in events {
        match event {
            SourceEvent::Blank => active.clear(),
            SourceEvent::Comment => {}
            SourceEvent::CategoryHeader(names) => {
                active = names.iter().map(|n| n.to_lowercase()).collect();
            }
            SourceEvent::Declaration(d) => out.push(Declaration {
                name: d.name,
                packagetype: d.packagetype,
                categories: active.clone(),
                super_names: d.super_names,
                role_names: d.role_names,
            }),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str) -> SourceEvent {
        SourceEvent::Declaration(DeclaredType { name: name.into(), ..Default::default() })
    }

    fn header(names: &[&str]) -> SourceEvent {
        SourceEvent::CategoryHeader(names.iter().map(|s| s.to_string()).collect())
    }

    fn cats(d: &Declaration) -> Vec<&str> {
        d.categories.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_header_applies_until_blank_line() {
        let out = scope_categories(vec![
            decl("Before"),
            header(&["Basic", "Numeric"]),
            decl("Int"),
            SourceEvent::Comment,
            decl("Num"),
            SourceEvent::Blank,
            decl("After"),
        ]);

        assert_eq!(out.len(), 4);
        assert!(out[0].categories.is_empty());
        assert_eq!(cats(&out[1]), vec!["basic", "numeric"]);
        assert_eq!(cats(&out[2]), vec!["basic", "numeric"]);
        assert!(out[3].categories.is_empty());
    }

    #[test]
    fn test_new_header_replaces_previous() {
        let out = scope_categories(vec![header(&["IO"]), decl("IO::Handle"), header(&["Exception"]), decl("X::AdHoc")]);
        assert_eq!(cats(&out[0]), vec!["io"]);
        assert_eq!(cats(&out[1]), vec!["exception"]);
    }

    #[test]
    fn test_clauses_pass_through() {
        let out = scope_categories(vec![SourceEvent::Declaration(DeclaredType {
            name: "Int".into(),
            packagetype: PackageType::Class,
            super_names: vec!["Cool".into()],
            role_names: vec!["Real".into()],
        })]);
        assert_eq!(out[0].super_names, vec!["Cool"]);
        assert_eq!(out[0].role_names, vec!["Real"]);
    }
}
