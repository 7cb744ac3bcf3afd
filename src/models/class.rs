//! Class-level nodes

use super::ref_set::RefSet;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Index of a package inside its module's package arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PackageId(pub usize);

/// Index of a class: owning package plus position in that package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId {
    pub package: PackageId,
    pub index: usize,
}

impl ClassId {
    pub fn new(package: PackageId, index: usize) -> Self {
        Self { package, index }
    }
}

/// One source file
#[derive(Debug, Clone, Serialize)]
pub struct ClassNode {
    pub id: ClassId,
    /// Simple name: the file name without its extension
    pub name: String,
    pub path: PathBuf,
    /// Classes in other packages this class imports
    pub references: RefSet<ClassId>,
}

impl ClassNode {
    pub fn new(id: ClassId, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            references: RefSet::new(),
        }
    }

    /// Build a node from a source file, stripping the extension for the name
    pub fn from_path(id: ClassId, path: &Path) -> Self {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(id, name, path)
    }

    /// Move the class to another package slot, dropping scan results
    pub(crate) fn reassign(&mut self, id: ClassId) {
        self.id = id;
        self.references.clear();
    }
}

impl PartialEq for ClassNode {
    fn eq(&self, other: &Self) -> bool {
        self.id.package == other.id.package && self.name == other.name
    }
}

impl Eq for ClassNode {}
