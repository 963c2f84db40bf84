//! Build phase: declarations in, frozen `TypeGraph` out.
//!
//! ```text
//! Declaration[]
//!     │
//!     ├──> ingest          fetch-or-create nodes, append `is`/`does` edges
//!     ├──> roles           grant role superclasses to composing types
//!     ├──> roots           attach the universal base to rootless types
//!     ├──> inverse         derive `sub` and `doers`
//!     └──> topology::sort  one global dependencies-first order
//! ```

pub mod categories;
pub mod inverse;
pub mod roles;
pub mod roots;

use crate::analysis::topology;
use crate::config::GraphConfig;
use crate::error::{BuildError, BuildResult};
use crate::graph::TypeGraph;
use crate::store::{Declaration, TypeRegistry};

pub use categories::{scope_categories, DeclaredType, SourceEvent};

/// Single writer for a type graph under construction.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    registry: TypeRegistry,
    config: GraphConfig,
    declared: usize,
    // First ingestion failure; `finish` reports it instead of freezing.
    failed: Option<BuildError>,
}

impl GraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        Self { registry: TypeRegistry::new(), config, declared: 0, failed: None }
    }

    /// Adds declaration records in order. May be called more than once.
    ///
    /// Redeclaring a name overwrites its package type and categories and
    /// appends to its `super` and `roles` lists. Referenced names that were
    /// never declared become placeholder classes.
    ///
    /// A batch is checked before any record is applied. Once a batch has been
    /// rejected the builder is poisoned: later batches are refused and
    /// `finish` returns the same error.
    pub fn ingest(&mut self, decls: &[Declaration]) -> BuildResult<()> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        if let Some(offset) = decls.iter().position(|d| d.name.is_empty()) {
            let err = BuildError::EmptyName { index: self.declared + offset };
            self.failed = Some(err.clone());
            return Err(err);
        }

        for decl in decls {
            let id = self.registry.fetch_or_create(&decl.name);
            self.registry.packagetypes[id.index()] = decl.packagetype;
            self.registry.categories[id.index()] = decl.categories.clone();

            for parent in &decl.super_names {
                let p = self.registry.fetch_or_create(parent);
                self.registry.supers[id.index()].push(p);
            }
            for role in &decl.role_names {
                let r = self.registry.fetch_or_create(role);
                self.registry.roles[id.index()].push(r);
            }
        }
        self.declared += decls.len();
        Ok(())
    }

    /// Runs the post-ingestion passes and freezes the graph.
    pub fn finish(mut self) -> BuildResult<TypeGraph> {
        if let Some(err) = self.failed.take() {
            return Err(err);
        }
        log::debug!(
            "building type graph from {} declarations ({} types)",
            self.declared,
            self.registry.count()
        );

        if self.config.validation.reject_role_cycles {
            roles::check_role_cycles(&self.registry)?;
        }
        roles::flatten_roles(&mut self.registry);
        roots::assign_default_roots(&mut self.registry, &self.config.roots);
        inverse::build_inverse_relations(&mut self.registry);
        let sorted = topology::sort(&self.registry);

        log::debug!("type graph frozen with {} types", sorted.len());
        Ok(TypeGraph::freeze(self.registry, sorted, self.config))
    }
}
