//! Line-oriented import detection
//!
//! This is not a Java parser. A line is an import if, after leading
//! whitespace, it starts with the `import` keyword followed by a dotted name.
//! Reading stops at the first type declaration since imports cannot follow it.

use crate::error::{DsmError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// A dotted name taken from an import line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportCandidate {
    /// Fully qualified name with any trailing `.*` removed
    pub path: String,
    /// `import static ...`
    pub is_static: bool,
    /// `import a.b.*;`
    pub is_wildcard: bool,
}

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "abstract",
    "final",
    "static",
    "sealed",
    "non-sealed",
    "strictfp",
];

const TYPE_KEYWORDS: &[&str] = &["class", "interface", "enum", "record", "@interface"];

/// Parse a single source line
pub fn parse_import_line(line: &str) -> Option<ImportCandidate> {
    let line = strip_line_comment(line).trim();
    let rest = line.strip_prefix("import")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut rest = rest.trim_start();
    let mut is_static = false;
    if let Some(after) = rest.strip_prefix("static") {
        if after.starts_with(char::is_whitespace) {
            is_static = true;
            rest = after.trim_start();
        }
    }

    let body = rest.trim_end().trim_end_matches(';');
    let dotted: String = body.chars().filter(|c| !c.is_whitespace()).collect();

    let (path, is_wildcard) = match dotted.strip_suffix(".*") {
        Some(prefix) => (prefix.to_string(), true),
        None => (dotted, false),
    };

    if !is_dotted_name(&path) {
        return None;
    }

    Some(ImportCandidate {
        path,
        is_static,
        is_wildcard,
    })
}

/// Whether a line opens a top-level type declaration
pub fn is_type_declaration(line: &str) -> bool {
    let line = strip_line_comment(line);
    for token in line.split_whitespace() {
        if MODIFIERS.contains(&token) {
            continue;
        }
        // Annotations on the declaration line, e.g. `@Deprecated public class`
        if token.starts_with('@') && token != "@interface" {
            continue;
        }
        return TYPE_KEYWORDS.contains(&token);
    }
    false
}

/// Collect the imports from a reader, stopping at the first type declaration
pub fn scan_source<R: BufRead>(reader: R) -> io::Result<Vec<ImportCandidate>> {
    let mut imports = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if is_type_declaration(&line) {
            break;
        }
        if let Some(candidate) = parse_import_line(&line) {
            imports.push(candidate);
        }
    }

    Ok(imports)
}

/// Open a source file and collect its imports
pub fn scan_file(path: &Path) -> Result<Vec<ImportCandidate>> {
    let file = File::open(path).map_err(|e| DsmError::scan_error(path, e))?;
    scan_source(BufReader::new(file)).map_err(|e| DsmError::scan_error(path, e))
}

fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(index) => &line[..index],
        None => line,
    }
}

fn is_dotted_name(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
                    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            }
        })
}
