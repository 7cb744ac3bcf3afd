//! Import resolution against the classes of one module

use crate::models::{ClassId, ModuleNode, PackageId};
use crate::parsers::ImportCandidate;
use std::collections::HashMap;

/// Lookup tables from dotted names to package and class ids
#[derive(Debug, Default)]
pub struct ResolutionIndex {
    packages: HashMap<String, PackageId>,
    classes: HashMap<PackageId, HashMap<String, usize>>,
}

impl ResolutionIndex {
    pub fn build(module: &ModuleNode) -> Self {
        let mut index = Self::default();
        for package in &module.packages {
            index.packages.insert(package.name.clone(), package.id);
            let classes = index.classes.entry(package.id).or_default();
            for class in &package.classes {
                classes.insert(class.name.clone(), class.id.index);
            }
        }
        index
    }

    pub fn package(&self, name: &str) -> Option<PackageId> {
        self.packages.get(name).copied()
    }

    /// Resolve an import to a class of this module
    ///
    /// Prefixes of the dotted name are tried longest first. The first prefix
    /// that names a package whose next segment names one of its classes wins,
    /// so nested and static member imports land on their outer class.
    /// Wildcard imports name packages and never resolve.
    pub fn resolve(&self, candidate: &ImportCandidate) -> Option<ClassId> {
        if candidate.is_wildcard {
            return None;
        }
        self.resolve_name(&candidate.path)
    }

    pub fn resolve_name(&self, dotted: &str) -> Option<ClassId> {
        let splits = dotted.match_indices('.').map(|(at, _)| at).collect::<Vec<_>>();

        for &at in splits.iter().rev() {
            let (prefix, rest) = (&dotted[..at], &dotted[at + 1..]);
            let Some(package) = self.package(prefix) else {
                continue;
            };
            let class_name = rest.split('.').next().unwrap_or(rest);
            if let Some(index) = self.classes.get(&package).and_then(|classes| classes.get(class_name)) {
                return Some(ClassId::new(package, *index));
            }
        }
        None
    }
}
