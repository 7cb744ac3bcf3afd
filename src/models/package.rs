//! Package-level nodes

use super::class::{ClassId, ClassNode, PackageId};
use super::ref_set::RefSet;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A directory of classes, identified by its dotted name
#[derive(Debug, Clone, Serialize)]
pub struct PackageNode {
    pub id: PackageId,
    /// Fully qualified dotted name
    pub name: String,
    pub path: PathBuf,
    /// Name of the owning module
    pub module: String,
    pub classes: Vec<ClassNode>,
    /// Packages some class of this package imports from
    pub direct: RefSet<PackageId>,
    /// Transitive closure of `direct`
    pub implied: RefSet<PackageId>,
    /// Whether this package is in its own implied set
    pub circular: bool,
}

impl PackageNode {
    pub fn new(
        id: PackageId,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            module: module.into(),
            classes: Vec::new(),
            direct: RefSet::new(),
            implied: RefSet::new(),
            circular: false,
        }
    }

    /// Append a class by simple name and return its id
    pub fn add_class(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> ClassId {
        let id = ClassId::new(self.id, self.classes.len());
        self.classes.push(ClassNode::new(id, name, path));
        id
    }

    /// Append a class for a source file, named after the file stem
    pub fn add_class_file(&mut self, path: &Path) -> ClassId {
        let id = ClassId::new(self.id, self.classes.len());
        self.classes.push(ClassNode::from_path(id, path));
        id
    }

    pub fn class(&self, index: usize) -> Option<&ClassNode> {
        self.classes.get(index)
    }

    /// Full name of one of this package's classes
    pub fn qualified_class_name(&self, class: &ClassNode) -> String {
        format!("{}.{}", self.name, class.name)
    }

    /// Whether a class in this package references any class of `target`
    pub fn references_package(&self, target: PackageId) -> bool {
        self.direct.contains(&target)
    }

    /// Classes of this package that reference at least one class of `target`
    pub fn classes_referencing(&self, target: PackageId) -> impl Iterator<Item = &ClassNode> {
        self.classes
            .iter()
            .filter(move |class| class.references.iter().any(|r| r.package == target))
    }

    /// Give the package a new arena slot; class ids follow and scan state is reset
    pub(crate) fn reassign(&mut self, id: PackageId) {
        self.id = id;
        for (index, class) in self.classes.iter_mut().enumerate() {
            class.reassign(ClassId::new(id, index));
        }
        self.direct.clear();
        self.implied.clear();
        self.circular = false;
    }

    /// Sort classes by name so class ids follow file order deterministically
    pub(crate) fn sort_classes(&mut self) {
        self.classes.sort_by(|a, b| a.name.cmp(&b.name));
        let id = self.id;
        self.reassign(id);
    }
}
