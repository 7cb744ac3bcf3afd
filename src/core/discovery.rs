//! Module, package and class discovery
//!
//! A module directory is walked one level at a time. The canonical sources
//! directory (`src/main/java` by default) holds the package tree; every other
//! sub-directory is a candidate sub-module. Candidates with a single package
//! and no sub-modules of their own are folded into the parent.

use crate::core::parallel::CancellationToken;
use crate::error::{handle_error, DsmError, Result, ResultExt};
use crate::models::{ModuleNode, PackageId, PackageNode, ProjectNode, Settings};
use crate::parsers::BuildDescriptor;
use glob::Pattern;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory conventions used while discovering a project
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub source_dir: String,
    pub source_root: PathBuf,
    pub source_extension: String,
    pub package_info_file: String,
    pub build_output_dir: String,
    pub special_prefix: String,
    pub exclude_patterns: Vec<Pattern>,
    pub follow_links: bool,
}

impl DiscoveryOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            source_dir: settings.source_dir.clone(),
            source_root: PathBuf::from(&settings.source_root),
            source_extension: settings.source_extension.clone(),
            package_info_file: settings.package_info_file.clone(),
            build_output_dir: settings.build_output_dir.clone(),
            special_prefix: settings.special_prefix.clone(),
            exclude_patterns: compile_exclude_patterns(&settings.exclude_patterns)?,
            follow_links: settings.follow_links,
        })
    }
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            source_dir: "src".to_string(),
            source_root: PathBuf::from("main/java"),
            source_extension: "java".to_string(),
            package_info_file: "package-info.java".to_string(),
            build_output_dir: "target".to_string(),
            special_prefix: ".".to_string(),
            exclude_patterns: Vec::new(),
            follow_links: false,
        }
    }
}

/// Compile exclude patterns into glob patterns
pub fn compile_exclude_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| Pattern::new(pattern).map_err(DsmError::from))
        .collect()
}

/// Builds the module tree of a project from disk
pub struct Discoverer {
    options: DiscoveryOptions,
    cancel: CancellationToken,
}

impl Discoverer {
    pub fn new(options: DiscoveryOptions, cancel: CancellationToken) -> Self {
        Self { options, cancel }
    }

    /// Discover every top-level module the descriptor declares
    ///
    /// A descriptor without modules makes the root directory the only module.
    /// A module that fails to be discovered is recorded on the project and
    /// skipped; descriptor errors and cancellation abort the whole run.
    pub fn discover_project(
        &self,
        root: &Path,
        descriptor: &dyn BuildDescriptor,
        parallel: bool,
    ) -> Result<ProjectNode> {
        let mut project = ProjectNode::for_root(root);
        let names = descriptor.module_names(root)?;

        let targets: Vec<(String, PathBuf)> = if names.is_empty() {
            vec![(project.name.clone(), root.to_path_buf())]
        } else {
            names
                .into_iter()
                .map(|name| {
                    let path = root.join(&name);
                    (name, path)
                })
                .collect()
        };
        tracing::debug!(
            "{} declares {} module(s) under {}",
            descriptor.name(),
            targets.len(),
            root.display()
        );

        let discovered: Vec<Result<ModuleNode>> = if parallel {
            targets
                .par_iter()
                .map(|(name, path)| self.discover_top_level(name, path))
                .collect()
        } else {
            targets
                .iter()
                .map(|(name, path)| self.discover_top_level(name, path))
                .collect()
        };

        for ((name, path), outcome) in targets.into_iter().zip(discovered) {
            match outcome {
                Ok(module) => project.modules.push(module),
                Err(err) => {
                    let message = err.to_string();
                    // Cancellation and descriptor problems are critical and abort the run
                    if let Some(critical) = handle_error(err) {
                        return Err(critical);
                    }
                    project.record_failure(name, path, message);
                }
            }
        }

        Ok(project)
    }

    fn discover_top_level(&self, name: &str, path: &Path) -> Result<ModuleNode> {
        if !path.is_dir() {
            return Err(DsmError::discovery_error(path, "module directory does not exist"));
        }
        let mut module = self.discover_module(path)?;
        // Declared names may contain separators, e.g. `services/billing`
        module.name = name.to_string();
        for package in &mut module.packages {
            package.module = module.name.clone();
        }
        Ok(module)
    }

    /// Discover one module directory and its sub-modules
    pub fn discover_module(&self, dir: &Path) -> Result<ModuleNode> {
        self.cancel.check()?;

        let mut module = ModuleNode::new(dir_name(dir), dir);
        let (sub_dirs, _) = self.list_entries(dir)?;

        for sub_dir in sub_dirs {
            let name = dir_name(&sub_dir);
            if name == self.options.source_dir {
                let source_root = sub_dir.join(&self.options.source_root);
                if source_root.is_dir() {
                    self.discover_packages(&source_root, &mut module)?;
                }
            } else if self.is_skipped(&name) {
                tracing::trace!("skipping {}", sub_dir.display());
            } else {
                let candidate = self.discover_module(&sub_dir)?;
                if candidate.is_real_module() {
                    module.sub_modules.push(candidate);
                } else if !candidate.packages.is_empty() {
                    tracing::debug!(
                        "folding {} into module {}",
                        sub_dir.display(),
                        module.name
                    );
                    module.absorb(candidate);
                }
            }
        }

        module.finish_registration();
        tracing::debug!(
            "discovered module {} with {} package(s) and {} sub-module(s)",
            module.name,
            module.packages.len(),
            module.sub_modules.len()
        );
        Ok(module)
    }

    /// Walk the package tree below a source root
    fn discover_packages(&self, source_root: &Path, module: &mut ModuleNode) -> Result<()> {
        let (dirs, _) = self.list_entries(source_root)?;
        for dir in dirs {
            let name = dir_name(&dir);
            if self.has_special_prefix(&name) {
                continue;
            }
            self.discover_package(&dir, name, module)?;
        }
        Ok(())
    }

    fn discover_package(&self, dir: &Path, name: String, module: &mut ModuleNode) -> Result<()> {
        self.cancel.check()?;

        let (sub_dirs, files) = self.list_entries(dir)?;
        let class_files: Vec<PathBuf> = files.into_iter().filter(|file| self.is_class_file(file)).collect();

        if !class_files.is_empty() {
            let mut package = PackageNode::new(PackageId(0), name.clone(), dir, module.name.clone());
            for file in &class_files {
                package.add_class_file(file);
            }
            let id = module.register_package(package);
            tracing::trace!("package {} ({:?}) with {} class(es)", name, id, class_files.len());
        }

        for sub_dir in sub_dirs {
            let child = dir_name(&sub_dir);
            if self.has_special_prefix(&child) {
                continue;
            }
            self.discover_package(&sub_dir, format!("{}.{}", name, child), module)?;
        }
        Ok(())
    }

    fn is_class_file(&self, path: &Path) -> bool {
        let matches_extension = path
            .extension()
            .map(|ext| ext.to_string_lossy() == self.options.source_extension.as_str())
            .unwrap_or(false);
        let is_package_info = path
            .file_name()
            .map(|name| name.to_string_lossy() == self.options.package_info_file.as_str())
            .unwrap_or(false);
        matches_extension && !is_package_info
    }

    fn has_special_prefix(&self, name: &str) -> bool {
        !self.options.special_prefix.is_empty() && name.starts_with(&self.options.special_prefix)
    }

    /// Exclude globs see the directory name only, never the full path
    fn is_skipped(&self, name: &str) -> bool {
        if self.has_special_prefix(name) || name == self.options.build_output_dir {
            return true;
        }
        self.options.exclude_patterns.iter().any(|pattern| pattern.matches(name))
    }

    /// Immediate children of a directory sorted by file name, split into
    /// directories and files
    fn list_entries(&self, dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.options.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.with_file_context(dir)?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            } else if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        Ok((dirs, files))
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
