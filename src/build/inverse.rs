use crate::store::TypeRegistry;

/// Derives `subs` and `doers` from `supers` and `roles`.
///
/// Walks types in registry order, so the inverse lists come out in the order
/// the children were first referenced.
pub fn build_inverse_relations(registry: &mut TypeRegistry) {
    for list in registry.subs.iter_mut().chain(registry.doers.iter_mut()) {
        list.clear();
    }

    for id in registry.ids() {
        for k in 0..registry.supers[id.index()].len() {
            let parent = registry.supers[id.index()][k];
            registry.subs[parent.index()].push(id);
        }
        for k in 0..registry.roles[id.index()].len() {
            let role = registry.roles[id.index()][k];
            registry.doers[role.index()].push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_lists_follow_registry_order() {
        let mut reg = TypeRegistry::new();
        let a = reg.fetch_or_create("A");
        let r = reg.fetch_or_create("R");
        let c = reg.fetch_or_create("C");
        let b = reg.fetch_or_create("B");
        reg.supers[c.index()].push(a);
        reg.supers[b.index()].push(a);
        reg.roles[b.index()].push(r);
        reg.roles[c.index()].push(r);

        build_inverse_relations(&mut reg);

        assert_eq!(reg.subs[a.index()].as_slice(), &[c, b]);
        assert_eq!(reg.doers[r.index()].as_slice(), &[c, b]);
        assert!(reg.subs[b.index()].is_empty());
    }

    #[test]
    fn test_rerun_does_not_duplicate() {
        let mut reg = TypeRegistry::new();
        let a = reg.fetch_or_create("A");
        let b = reg.fetch_or_create("B");
        reg.supers[b.index()].push(a);
        build_inverse_relations(&mut reg);
        build_inverse_relations(&mut reg);
        assert_eq!(reg.subs[a.index()].as_slice(), &[b]);
    }

    #[test]
    fn test_duplicate_parent_is_mirrored() {
        let mut reg = TypeRegistry::new();
        let a = reg.fetch_or_create("A");
        let b = reg.fetch_or_create("B");
        reg.supers[b.index()].push(a);
        reg.supers[b.index()].push(a);
        build_inverse_relations(&mut reg);
        assert_eq!(reg.subs[a.index()].as_slice(), &[b, b]);
    }
}
