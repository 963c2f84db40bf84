//! Method resolution order via C3 linearization.
//!
//! The merge set is the parent linearizations only. `canonical_c3` also
//! merges the direct-parent list, which enforces local precedence order.

use crate::error::{HierarchyFault, LinearizeError, LinearizeResult};
use crate::store::{NodeId, TypeRegistry};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

/// A computed MRO. Shared between the memo slot and every caller.
pub type Mro = Arc<[NodeId]>;

/// One memo slot per node. Set at most once; later writers keep the first
/// value, which is equal to theirs.
pub type MroCache = [OnceLock<Mro>];

pub struct Linearizer<'a> {
    registry: &'a TypeRegistry,
    memo: &'a MroCache,
    canonical: bool,
}

impl<'a> Linearizer<'a> {
    pub fn new(registry: &'a TypeRegistry, memo: &'a MroCache, canonical: bool) -> Self {
        Self { registry, memo, canonical }
    }

    /// Returns the MRO of `target`, computing and memoizing any ancestor
    /// linearizations that are still missing.
    ///
    /// Ancestors are resolved parents-first with an explicit stack. Reaching
    /// a node that is still on that stack means `super` loops, which is
    /// reported as an inconsistent hierarchy. Ancestors finished before a
    /// failure stay memoized.
    ///
    /// The error names the type that could not be linearized, which is not
    /// always `target`: a cycle is reported at the type where the loop
    /// closes, and a failed merge at the ancestor whose own merge failed.
    pub fn mro(&self, target: NodeId) -> LinearizeResult<Mro> {
        if let Some(done) = self.memo[target.index()].get() {
            return Ok(done.clone());
        }

        let mut stack: Vec<(NodeId, usize)> = vec![(target, 0)];
        let mut on_stack: HashSet<NodeId> = HashSet::from([target]);

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            if let Some(&parent) = self.registry.get_supers(node).get(next) {
                frame.1 += 1;
                if self.memo[parent.index()].get().is_some() {
                    continue;
                }
                if !on_stack.insert(parent) {
                    return Err(self.fail(parent, HierarchyFault::Cycle));
                }
                stack.push((parent, 0));
                continue;
            }

            stack.pop();
            on_stack.remove(&node);
            let merged: Mro = self.linearize_node(node)?.into();
            let stored = self.memo[node.index()].get_or_init(|| merged).clone();
            if stack.is_empty() {
                return Ok(stored);
            }
        }

        unreachable!("target frame is always popped last")
    }

    /// Builds the MRO of `node` from its parents' memoized MROs.
    fn linearize_node(&self, node: NodeId) -> LinearizeResult<Vec<NodeId>> {
        let supers = self.registry.get_supers(node);
        // Tie-break list for canonical mode. Flattening can repeat a parent;
        // only its first occurrence is kept.
        let mut direct: Vec<NodeId> = Vec::new();
        if self.canonical {
            for &p in supers {
                if !direct.contains(&p) {
                    direct.push(p);
                }
            }
        }
        let mut parent_mros: Vec<&[NodeId]> = Vec::with_capacity(supers.len() + 1);
        for &p in supers {
            match self.memo[p.index()].get() {
                Some(m) => parent_mros.push(m),
                None => return Err(self.fail(node, HierarchyFault::Cycle)),
            }
        }

        let mut out = Vec::with_capacity(1 + parent_mros.iter().map(|m| m.len()).max().unwrap_or(0));
        out.push(node);

        if let [only] = parent_mros.as_slice() {
            out.extend_from_slice(only);
            return Ok(out);
        }

        if !direct.is_empty() {
            parent_mros.push(&direct);
        }
        match c3_merge(&parent_mros) {
            Some(merged) => {
                out.extend(merged);
                log::trace!("linearized '{}' ({} entries)", self.registry.name(node), out.len());
                Ok(out)
            }
            None => Err(self.fail(node, HierarchyFault::NoValidCandidate)),
        }
    }

    fn fail(&self, node: NodeId, reason: HierarchyFault) -> LinearizeError {
        let name = self.registry.name(node).to_string();
        log::warn!("cannot linearize '{}': {}", name, reason);
        LinearizeError::InconsistentHierarchy { node: name, reason }
    }
}

/// C3 merge. Returns `None` when no list head is free to be taken while
/// some list still has elements.
///
/// A head is free when it does not appear past the head of any list. Lists
/// are scanned left to right and the first free head wins; it is removed
/// from the front of every list it currently heads.
pub fn c3_merge(lists: &[&[NodeId]]) -> Option<Vec<NodeId>> {
    let mut heads = vec![0usize; lists.len()];
    let mut out = Vec::new();

    loop {
        let mut pending = false;
        let mut chosen = None;

        for (list, &h) in lists.iter().zip(&heads) {
            let Some(&candidate) = list.get(h) else { continue };
            pending = true;
            let in_tail = lists
                .iter()
                .zip(&heads)
                .any(|(other, &oh)| other.get(oh + 1..).is_some_and(|tail| tail.contains(&candidate)));
            if !in_tail {
                chosen = Some(candidate);
                break;
            }
        }

        match chosen {
            Some(c) => {
                for (list, h) in lists.iter().zip(heads.iter_mut()) {
                    if list.get(*h) == Some(&c) {
                        *h += 1;
                    }
                }
                out.push(c);
            }
            None if pending => return None,
            None => return Some(out),
        }
    }
}
