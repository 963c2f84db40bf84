//! Role flattening: composing a role grants the role's superclasses.
use crate::error::{BuildError, BuildResult};
use crate::store::{Links, NodeId, TypeRegistry};
use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;

/// Appends, for every type, the `super` entries of each role it composes,
/// directly or through nested `does` chains.
///
/// Each role contributes its *declared* superclasses, so the outcome does not
/// depend on which types were flattened first. The role graph must be acyclic;
/// a cycle makes the worklist grow forever (see `reject_role_cycles`).
pub fn flatten_roles(registry: &mut TypeRegistry) {
    let declared: Vec<Links> = registry.supers.clone();
    let mut granted = 0usize;

    for id in registry.ids() {
        let mut worklist: Vec<NodeId> = registry.get_roles(id).iter().rev().copied().collect();
        while let Some(role) = worklist.pop() {
            let inherited = &declared[role.index()];
            granted += inherited.len();
            registry.supers[id.index()].extend(inherited.iter().copied());
            // Nested roles are visited after the current one, in declaration order.
            worklist.extend(registry.roles[role.index()].iter().rev().copied());
        }
    }
    log::debug!("role flattening granted {} superclass entries", granted);
}

/// Fails if any set of roles composes itself, directly or transitively.
pub fn check_role_cycles(registry: &TypeRegistry) -> BuildResult<()> {
    let mut graph: DiGraph<NodeId, ()> = DiGraph::with_capacity(registry.count(), 0);
    let nodes: Vec<_> = registry.ids().map(|id| graph.add_node(id)).collect();
    for id in registry.ids() {
        for &role in registry.get_roles(id) {
            graph.add_edge(nodes[id.index()], nodes[role.index()], ());
        }
    }

    for component in tarjan_scc(&graph) {
        let looped = match component.as_slice() {
            [single] => graph.contains_edge(*single, *single),
            _ => true,
        };
        if looped {
            let mut roles: Vec<String> = component
                .iter()
                .map(|n| registry.name(graph[*n]).to_string())
                .collect();
            roles.sort();
            return Err(BuildError::CyclicRoleComposition { roles });
        }
    }
    Ok(())
}
