use crate::config::RootConfig;
use crate::store::{PackageType, TypeRegistry};

/// Gives every rootless non-role type the universal base as its only parent.
///
/// The absolute root and the universal base itself are left alone. The base
/// node is only created once some type needs it.
pub fn assign_default_roots(registry: &mut TypeRegistry, roots: &RootConfig) -> usize {
    let rootless: Vec<_> = registry
        .ids()
        .filter(|&id| {
            registry.packagetypes[id.index()] != PackageType::Role
                && registry.get_supers(id).is_empty()
                && registry.name(id) != roots.absolute_root
                && registry.name(id) != roots.universal_base
        })
        .collect();

    if rootless.is_empty() {
        return 0;
    }

    let base = registry.fetch_or_create(&roots.universal_base);
    for &id in &rootless {
        registry.supers[id.index()].push(base);
    }
    log::debug!("attached '{}' to {} rootless types", roots.universal_base, rootless.len());
    rootless.len()
}
