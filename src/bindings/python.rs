use crate::config::GraphConfig;
use crate::error::BuildError;
use crate::graph::TypeGraph;
use crate::store::{Declaration, NodeId, PackageType};
use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

/// (packagetype, name, categories, super names, role names)
type RawDeclaration = (String, String, Vec<String>, Vec<String>, Vec<String>);

#[pyclass(name = "_TypeGraph")]
#[derive(Debug)]
pub struct PyTypeGraph {
    inner: TypeGraph,
}

impl PyTypeGraph {
    fn node(&self, name: &str) -> PyResult<NodeId> {
        self.inner.lookup(name).ok_or_else(|| PyKeyError::new_err(name.to_string()))
    }

    fn names(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|id| self.inner.name(*id).to_string()).collect()
    }
}

#[pymethods]
impl PyTypeGraph {
    #[new]
    #[pyo3(signature = (declarations, config_toml=None))]
    pub fn new(declarations: Vec<RawDeclaration>, config_toml: Option<String>) -> PyResult<Self> {
        let config = match config_toml {
            Some(src) => GraphConfig::from_toml_str(&src).map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => GraphConfig::default(),
        };
        let mut decls = Vec::with_capacity(declarations.len());
        for (kind, name, categories, supers, roles) in declarations {
            let packagetype: PackageType = kind.parse().map_err(|e: BuildError| PyValueError::new_err(e.to_string()))?;
            decls.push(Declaration {
                name,
                packagetype,
                categories: categories.into_iter().collect(),
                super_names: supers,
                role_names: roles,
            });
        }
        let inner = TypeGraph::from_declarations(&decls, config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn __len__(&self) -> usize { self.inner.len() }

    pub fn __contains__(&self, name: &str) -> bool { self.inner.lookup(name).is_some() }

    pub fn sorted(&self) -> Vec<String> { self.names(self.inner.sorted()) }

    pub fn packagetype(&self, name: &str) -> PyResult<String> {
        Ok(self.inner.packagetype(self.node(name)?).to_string())
    }

    pub fn categories(&self, name: &str) -> PyResult<Vec<String>> {
        Ok(self.inner.categories(self.node(name)?).iter().cloned().collect())
    }

    pub fn supers(&self, name: &str) -> PyResult<Vec<String>> { Ok(self.names(self.inner.supers(self.node(name)?))) }
    pub fn subs(&self, name: &str) -> PyResult<Vec<String>> { Ok(self.names(self.inner.subs(self.node(name)?))) }
    pub fn roles(&self, name: &str) -> PyResult<Vec<String>> { Ok(self.names(self.inner.roles(self.node(name)?))) }
    pub fn doers(&self, name: &str) -> PyResult<Vec<String>> { Ok(self.names(self.inner.doers(self.node(name)?))) }

    pub fn mro(&self, name: &str) -> PyResult<Vec<String>> {
        let mro = self.inner.mro(self.node(name)?).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(self.names(&mro))
    }

    pub fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }
}
