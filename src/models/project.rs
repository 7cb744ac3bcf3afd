//! The analysis root

use super::module::ModuleNode;
use serde::Serialize;
use std::path::PathBuf;

/// A top-level module that could not be discovered
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryFailure {
    pub module: String,
    pub path: PathBuf,
    pub message: String,
}

/// Project root with its top-level modules
#[derive(Debug, Clone, Serialize)]
pub struct ProjectNode {
    /// Root directory name
    pub name: String,
    pub root: PathBuf,
    pub modules: Vec<ModuleNode>,
    pub failures: Vec<DiscoveryFailure>,
}

impl ProjectNode {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            modules: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Name the project after the last component of its root directory
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .canonicalize()
            .ok()
            .as_deref()
            .and_then(|path| path.file_name())
            .or_else(|| root.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string());
        Self::new(name, root)
    }

    pub fn record_failure(&mut self, module: impl Into<String>, path: impl Into<PathBuf>, message: impl Into<String>) {
        self.failures.push(DiscoveryFailure {
            module: module.into(),
            path: path.into(),
            message: message.into(),
        });
    }

    /// Find a module by slash-separated path, e.g. `core/api`.
    /// The longest top-level name that prefixes the path wins.
    pub fn find_module(&self, path: &str) -> Option<&ModuleNode> {
        self.modules
            .iter()
            .filter_map(|module| module.find(path).map(|found| (module.name.len(), found)))
            .max_by_key(|(length, _)| *length)
            .map(|(_, found)| found)
    }

    /// Every module in the project, depth first
    pub fn all_modules(&self) -> Vec<&ModuleNode> {
        self.modules.iter().flat_map(|module| module.walk()).collect()
    }

    pub fn package_count(&self) -> usize {
        self.all_modules().iter().map(|module| module.packages.len()).sum()
    }
}
