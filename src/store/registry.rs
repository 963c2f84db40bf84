use super::types::{NodeId, PackageType};
use smallvec::SmallVec;
use std::collections::{BTreeSet, HashMap};

/// Relation list. Most types have a handful of parents or roles at most.
pub type Links = SmallVec<[NodeId; 4]>;

/// Build-phase storage for the type graph.
///
/// Columnar: slot `i` of every vector belongs to `NodeId(i)`. Ids are handed
/// out in first-reference order, which is also the registry's iteration order.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    pub names: Vec<String>,
    pub packagetypes: Vec<PackageType>,
    pub categories: Vec<BTreeSet<String>>,

    // Declared (and flattened) edges
    pub supers: Vec<Links>,
    pub roles: Vec<Links>,

    // Derived inverses, empty until the inversion pass
    pub subs: Vec<Links>,
    pub doers: Vec<Links>,

    name_index: HashMap<String, NodeId>,
}

impl TypeRegistry {
    pub fn new() -> Self { Self::default() }
    pub fn count(&self) -> usize { self.names.len() }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator {
        (0..self.count()).map(NodeId::new)
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// Returns the node for `name`, creating a placeholder class with no
    /// categories and no edges if the name has not been seen yet.
    pub fn fetch_or_create(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let id = NodeId::new(self.count());
        self.names.push(name.to_string());
        self.packagetypes.push(PackageType::default());
        self.categories.push(BTreeSet::new());
        self.supers.push(Links::new());
        self.roles.push(Links::new());
        self.subs.push(Links::new());
        self.doers.push(Links::new());
        self.name_index.insert(name.to_string(), id);
        log::trace!("registered type '{}' as {:?}", name, id);
        id
    }

    #[inline(always)]
    pub fn name(&self, id: NodeId) -> &str { &self.names[id.index()] }

    #[inline(always)]
    pub fn get_supers(&self, id: NodeId) -> &[NodeId] { &self.supers[id.index()] }

    #[inline(always)]
    pub fn get_roles(&self, id: NodeId) -> &[NodeId] { &self.roles[id.index()] }

    /// Ids ordered by type name.
    pub fn ids_by_name(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.ids().collect();
        ids.sort_by(|a, b| self.name(*a).cmp(self.name(*b)));
        ids
    }
}
