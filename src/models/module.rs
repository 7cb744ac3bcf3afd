//! Build modules: the package arena and the sub-module tree

use super::class::{ClassId, ClassNode, PackageId};
use super::package::PackageNode;
use serde::Serialize;
use std::path::PathBuf;

/// How far the pipeline has progressed for a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisState {
    /// Packages and classes registered, no references yet
    Discovered,
    /// Direct references resolved for every package
    Scanned,
    /// Implied references and circularity computed
    Closed,
    /// Presentation order computed; ready to render
    Ordered,
}

/// A source file that could not be scanned
#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub message: String,
}

/// A build module
#[derive(Debug, Clone, Serialize)]
pub struct ModuleNode {
    /// Directory name
    pub name: String,
    pub path: PathBuf,
    /// Package arena; `PackageId(i)` is `packages[i]`
    pub packages: Vec<PackageNode>,
    /// Presentation order over the arena
    pub order: Vec<PackageId>,
    pub sub_modules: Vec<ModuleNode>,
    pub scan_failures: Vec<ScanFailure>,
    pub state: AnalysisState,
}

impl ModuleNode {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            packages: Vec::new(),
            order: Vec::new(),
            sub_modules: Vec::new(),
            scan_failures: Vec::new(),
            state: AnalysisState::Discovered,
        }
    }

    /// Take ownership of a discovered package and give it the next arena slot
    pub fn register_package(&mut self, mut package: PackageNode) -> PackageId {
        let id = PackageId(self.packages.len());
        package.reassign(id);
        package.module = self.name.clone();
        self.packages.push(package);
        id
    }

    /// Register an empty package by dotted name
    pub fn add_package(&mut self, name: &str) -> PackageId {
        let path = self.path.join(name.replace('.', "/"));
        let package = PackageNode::new(PackageId(0), name, path, self.name.clone());
        self.register_package(package)
    }

    /// Add a class to a registered package
    pub fn add_class(&mut self, package: PackageId, name: &str) -> ClassId {
        let node = &mut self.packages[package.0];
        let path = node.path.join(format!("{}.java", name));
        node.add_class(name, path)
    }

    /// Record that `from` imports `to`; same-package references are ignored
    pub fn link_classes(&mut self, from: ClassId, to: ClassId) -> bool {
        if from.package == to.package {
            return false;
        }
        let package = &mut self.packages[from.package.0];
        package.classes[from.index].references.insert(to);
        package.direct.insert(to.package);
        true
    }

    /// Move every package of a filtered sub-directory into this module
    pub fn absorb(&mut self, other: ModuleNode) {
        for package in other.packages {
            self.register_package(package);
        }
    }

    /// Whether a discovered sub-directory counts as a module of its own
    pub fn is_real_module(&self) -> bool {
        self.packages.len() > 1 || !self.sub_modules.is_empty()
    }

    /// Sort packages and sub-modules by name, renumbering the arena
    pub fn finish_registration(&mut self) {
        self.packages.sort_by(|a, b| a.name.cmp(&b.name));
        for (index, package) in self.packages.iter_mut().enumerate() {
            package.reassign(PackageId(index));
            package.sort_classes();
        }
        self.sub_modules.sort_by(|a, b| a.name.cmp(&b.name));
        self.order.clear();
        self.state = AnalysisState::Discovered;
    }

    pub fn package(&self, id: PackageId) -> Option<&PackageNode> {
        self.packages.get(id.0)
    }

    pub fn package_by_name(&self, name: &str) -> Option<&PackageNode> {
        self.packages.iter().find(|package| package.name == name)
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassNode> {
        self.package(id.package).and_then(|package| package.class(id.index))
    }

    /// `package.Class` name for a class id
    pub fn qualified_class_name(&self, id: ClassId) -> Option<String> {
        let package = self.package(id.package)?;
        let class = package.class(id.index)?;
        Some(package.qualified_class_name(class))
    }

    /// Packages in presentation order, or arena order before ordering ran
    pub fn ordered_packages(&self) -> Vec<&PackageNode> {
        if self.order.len() == self.packages.len() {
            self.order.iter().filter_map(|id| self.package(*id)).collect()
        } else {
            self.packages.iter().collect()
        }
    }

    /// Package at a presentation position
    pub fn package_at(&self, position: usize) -> Option<&PackageNode> {
        self.ordered_packages().get(position).copied()
    }

    /// Presentation position of a package
    pub fn position_of(&self, id: PackageId) -> Option<usize> {
        self.ordered_packages().iter().position(|package| package.id == id)
    }

    pub fn circular_packages(&self) -> impl Iterator<Item = &PackageNode> {
        self.packages.iter().filter(|package| package.circular)
    }

    /// Find a module by slash-separated path starting with this module's name.
    /// Declared names may themselves contain slashes, e.g. `services/billing`.
    pub fn find(&self, path: &str) -> Option<&ModuleNode> {
        let path = path.trim_matches('/');
        let rest = if path == self.name {
            ""
        } else {
            path.strip_prefix(self.name.as_str())?.strip_prefix('/')?
        };
        let mut current = self;
        for segment in rest.split('/').filter(|segment| !segment.is_empty()) {
            current = current.sub_modules.iter().find(|sub| sub.name == segment)?;
        }
        Some(current)
    }

    /// This module followed by every sub-module, depth first
    pub fn walk(&self) -> Vec<&ModuleNode> {
        let mut modules = vec![self];
        for sub in &self.sub_modules {
            modules.extend(sub.walk());
        }
        modules
    }
}
