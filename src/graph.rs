//! The frozen, queryable type graph.
//!
//! A `TypeGraph` only comes out of `GraphBuilder::finish`, and nothing on it
//! takes `&mut self`. The only state that changes afterwards is the per-node
//! MRO memo, which is write-once and safe to fill from many threads.

use crate::analysis::linearize::{Linearizer, Mro};
use crate::build::GraphBuilder;
use crate::config::GraphConfig;
use crate::error::{BuildResult, LinearizeResult};
use crate::store::{Declaration, NodeId, PackageType, Relation, TypeRegistry};
use petgraph::graph::DiGraph;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct TypeGraph {
    registry: TypeRegistry,
    sorted: Vec<NodeId>,
    mro: Vec<OnceLock<Mro>>,
    config: GraphConfig,
}

impl TypeGraph {
    /// Runs the whole build pipeline over a complete declaration set.
    pub fn from_declarations(decls: &[Declaration], config: GraphConfig) -> BuildResult<Self> {
        let mut builder = GraphBuilder::new(config);
        builder.ingest(decls)?;
        builder.finish()
    }

    pub(crate) fn freeze(registry: TypeRegistry, sorted: Vec<NodeId>, config: GraphConfig) -> Self {
        let mro = (0..registry.count()).map(|_| OnceLock::new()).collect();
        Self { registry, sorted, mro, config }
    }

    pub fn len(&self) -> usize { self.registry.count() }
    pub fn is_empty(&self) -> bool { self.registry.count() == 0 }
    pub fn config(&self) -> &GraphConfig { &self.config }

    pub fn lookup(&self, name: &str) -> Option<NodeId> { self.registry.lookup(name) }

    /// Views over every type, in registry order.
    pub fn types(&self) -> impl Iterator<Item = TypeView<'_>> + '_ {
        self.registry.ids().map(move |id| self.view(id))
    }

    /// Every type, dependencies first.
    pub fn sorted(&self) -> &[NodeId] { &self.sorted }

    pub fn view(&self, id: NodeId) -> TypeView<'_> { TypeView { graph: self, id } }

    /// Like `view`, but `None` for an id this graph never issued.
    pub fn try_view(&self, id: NodeId) -> Option<TypeView<'_>> {
        (id.index() < self.len()).then(|| self.view(id))
    }

    pub fn get(&self, name: &str) -> Option<TypeView<'_>> {
        self.lookup(name).map(|id| self.view(id))
    }

    // --- Per-node accessors ---
    // Ids are only valid for the graph that issued them (via `lookup`,
    // `sorted` or a relation list). A foreign id panics on indexing; use
    // `try_view` when an id's origin is not known.
    pub fn name(&self, id: NodeId) -> &str { self.registry.name(id) }
    pub fn packagetype(&self, id: NodeId) -> PackageType { self.registry.packagetypes[id.index()] }
    pub fn categories(&self, id: NodeId) -> &BTreeSet<String> { &self.registry.categories[id.index()] }
    pub fn supers(&self, id: NodeId) -> &[NodeId] { self.registry.get_supers(id) }
    pub fn subs(&self, id: NodeId) -> &[NodeId] { &self.registry.subs[id.index()] }
    pub fn roles(&self, id: NodeId) -> &[NodeId] { self.registry.get_roles(id) }
    pub fn doers(&self, id: NodeId) -> &[NodeId] { &self.registry.doers[id.index()] }

    /// Method resolution order, computed on first request and memoized.
    pub fn mro(&self, id: NodeId) -> LinearizeResult<Mro> {
        Linearizer::new(&self.registry, &self.mro, self.config.linearization.canonical_c3).mro(id)
    }

    /// Linearizes every type in parallel. Results follow `sorted()`.
    pub fn linearize_all(&self) -> Vec<(NodeId, LinearizeResult<Mro>)> {
        let results: Vec<_> = self.sorted.par_iter().map(|&id| (id, self.mro(id))).collect();
        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        log::debug!("linearized {} types, {} inconsistent", results.len() - failed, failed);
        results
    }

    /// True when `ancestor` appears in the MRO of `id` (including `id` itself).
    pub fn is_subtype_of(&self, id: NodeId, ancestor: NodeId) -> LinearizeResult<bool> {
        Ok(self.mro(id)?.contains(&ancestor))
    }

    /// Types tagged with `category`, in sorted order.
    pub fn by_category(&self, category: &str) -> Vec<NodeId> {
        let folded = category.to_lowercase();
        self.sorted
            .iter()
            .copied()
            .filter(|&id| self.categories(id).contains(&folded))
            .collect()
    }

    /// Child → parent edges for every `super` and `roles` entry.
    pub fn to_petgraph(&self) -> DiGraph<NodeId, Relation> {
        let mut graph = DiGraph::with_capacity(self.len(), 0);
        let nodes: Vec<_> = self.registry.ids().map(|id| graph.add_node(id)).collect();
        for id in self.registry.ids() {
            for &p in self.supers(id) {
                graph.add_edge(nodes[id.index()], nodes[p.index()], Relation::Inherits);
            }
            for &r in self.roles(id) {
                graph.add_edge(nodes[id.index()], nodes[r.index()], Relation::Does);
            }
        }
        graph
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        let names = |ids: &[NodeId]| ids.iter().map(|id| self.name(*id).to_string()).collect::<Vec<_>>();
        GraphSnapshot {
            types: self
                .types()
                .map(|t| TypeRecord {
                    name: t.name().to_string(),
                    packagetype: t.packagetype(),
                    categories: t.categories().iter().cloned().collect(),
                    supers: names(t.supers()),
                    subs: names(t.subs()),
                    roles: names(t.roles()),
                    doers: names(t.doers()),
                })
                .collect(),
            sorted: names(&self.sorted),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}

/// Borrowed handle to one type.
#[derive(Debug, Clone, Copy)]
pub struct TypeView<'g> {
    graph: &'g TypeGraph,
    id: NodeId,
}

impl<'g> TypeView<'g> {
    pub fn id(&self) -> NodeId { self.id }
    pub fn name(&self) -> &'g str { self.graph.name(self.id) }
    pub fn packagetype(&self) -> PackageType { self.graph.packagetype(self.id) }
    pub fn categories(&self) -> &'g BTreeSet<String> { self.graph.categories(self.id) }
    pub fn supers(&self) -> &'g [NodeId] { self.graph.supers(self.id) }
    pub fn subs(&self) -> &'g [NodeId] { self.graph.subs(self.id) }
    pub fn roles(&self) -> &'g [NodeId] { self.graph.roles(self.id) }
    pub fn doers(&self) -> &'g [NodeId] { self.graph.doers(self.id) }
    pub fn mro(&self) -> LinearizeResult<Mro> { self.graph.mro(self.id) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSnapshot {
    pub types: Vec<TypeRecord>,
    pub sorted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRecord {
    pub name: String,
    pub packagetype: PackageType,
    pub categories: Vec<String>,
    #[serde(rename = "super")]
    pub supers: Vec<String>,
    #[serde(rename = "sub")]
    pub subs: Vec<String>,
    pub roles: Vec<String>,
    pub doers: Vec<String>,
}
