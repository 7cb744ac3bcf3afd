//! Build descriptor access
//!
//! The analyzer only needs the list of module directories a project declares.
//! `PomDescriptor` pulls the `<module>` entries out of a Maven `pom.xml`;
//! `StaticDescriptor` serves a list supplied by the caller.

use crate::error::{DsmError, Result};
use crate::models::config::Settings;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Source of module directory names relative to the project root
pub trait BuildDescriptor: Send + Sync {
    /// Declared module directories; empty means the root is the only module
    fn module_names(&self, root: &Path) -> Result<Vec<String>>;

    /// Name used in log messages
    fn name(&self) -> &str;
}

/// Modules declared in a Maven project descriptor
#[derive(Debug, Clone)]
pub struct PomDescriptor {
    file_name: String,
}

impl PomDescriptor {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Extract module names from descriptor content
    pub fn parse(content: &str, path: &Path) -> Result<Vec<String>> {
        let invalid = |e: regex::Error| DsmError::descriptor_error(path, e.to_string());
        let comment_re = Regex::new(r"(?s)<!--.*?-->").map_err(invalid)?;
        let block_re = Regex::new(r"(?s)<modules\s*>(.*?)</modules\s*>").map_err(invalid)?;
        let open_re = Regex::new(r"<modules\s*>").map_err(invalid)?;
        let module_re = Regex::new(r"(?s)<module\s*>(.*?)</module\s*>").map_err(invalid)?;
        let module_open_re = Regex::new(r"<module\s*(/)?>").map_err(invalid)?;

        let content = comment_re.replace_all(content, "");

        let opened = open_re.find_iter(&content).count();
        let blocks: Vec<&str> = block_re
            .captures_iter(&content)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();
        if opened != blocks.len() {
            return Err(DsmError::descriptor_error(path, "unterminated <modules> block"));
        }

        let mut names: Vec<String> = Vec::new();
        for block in blocks {
            let declared = module_open_re.find_iter(block).count();
            let mut found = 0;
            for caps in module_re.captures_iter(block) {
                found += 1;
                let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
                if name.is_empty() {
                    return Err(DsmError::descriptor_error(path, "empty <module> entry"));
                }
                if !names.iter().any(|existing| existing == name) {
                    names.push(name.to_string());
                }
            }
            if found != declared {
                return Err(DsmError::descriptor_error(path, "malformed <module> entry"));
            }
        }

        Ok(names)
    }
}

impl BuildDescriptor for PomDescriptor {
    fn module_names(&self, root: &Path) -> Result<Vec<String>> {
        let path = root.join(&self.file_name);
        if !path.is_file() {
            tracing::debug!("no {} in {}, treating root as the only module", self.file_name, root.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| DsmError::descriptor_error(&path, e.to_string()))?;
        Self::parse(&content, &path)
    }

    fn name(&self) -> &str {
        &self.file_name
    }
}

/// A module list supplied directly by the caller
#[derive(Debug, Clone, Default)]
pub struct StaticDescriptor {
    modules: Vec<String>,
}

impl StaticDescriptor {
    pub fn new(modules: Vec<String>) -> Self {
        Self { modules }
    }
}

impl BuildDescriptor for StaticDescriptor {
    fn module_names(&self, _root: &Path) -> Result<Vec<String>> {
        Ok(self.modules.clone())
    }

    fn name(&self) -> &str {
        "explicit module list"
    }
}

/// Pick the descriptor the settings ask for
pub fn create_descriptor(settings: &Settings) -> Box<dyn BuildDescriptor> {
    if settings.modules.is_empty() {
        Box::new(PomDescriptor::new(settings.descriptor_file.clone()))
    } else {
        Box::new(StaticDescriptor::new(settings.modules.clone()))
    }
}
