//! Output formatting functionality
//!
//! Text, JSON and CSV views of an analysed project. The HTML view lives in
//! the `html` module.

use crate::core::cycles::{cycle_groups, CycleGroup};
use crate::error::{DsmError, Result};
use crate::models::{AnalysisState, DiscoveryFailure, ModuleNode, PackageId, PackageNode, ProjectNode, ScanFailure};
use crate::output::keys::encode_key;
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Every module of a project with its slash-separated path, depth first
pub fn module_paths(project: &ProjectNode) -> Vec<(String, &ModuleNode)> {
    fn visit<'a>(prefix: &str, module: &'a ModuleNode, out: &mut Vec<(String, &'a ModuleNode)>) {
        let path = if prefix.is_empty() {
            module.name.clone()
        } else {
            format!("{}/{}", prefix, module.name)
        };
        out.push((path.clone(), module));
        for sub in &module.sub_modules {
            visit(&path, sub, out);
        }
    }

    let mut out = Vec::new();
    for module in &project.modules {
        visit("", module, &mut out);
    }
    out
}

/// Modules to report on: the selected one, or all of them
pub fn select_modules<'a>(project: &'a ProjectNode, selected: Option<&str>) -> Result<Vec<(String, &'a ModuleNode)>> {
    match selected {
        None => Ok(module_paths(project)),
        Some(path) => project
            .find_module(path)
            .map(|module| vec![(path.to_string(), module)])
            .ok_or_else(|| DsmError::UnknownModule { name: path.to_string() }),
    }
}

fn paint(use_colors: bool, style: Style, text: impl AsRef<str>) -> String {
    if use_colors {
        style.paint(text.as_ref()).to_string()
    } else {
        text.as_ref().to_string()
    }
}

/// Format one package as a text line
pub fn format_package_text(key: &str, package: &PackageNode, use_colors: bool) -> String {
    let marker = if package.circular {
        paint(use_colors, Red.bold(), " (circular)")
    } else {
        String::new()
    };
    format!(
        "    {:>2} {}{}  classes: {}, direct: {}, implied: {}\n",
        key,
        package.name,
        marker,
        package.classes.len(),
        package.direct.len(),
        package.implied.len()
    )
}

/// Format a project as a text summary
pub fn format_project_text(
    project: &ProjectNode,
    modules: &[(String, &ModuleNode)],
    use_colors: bool,
    verbose: bool,
) -> Result<String> {
    let mut output = String::new();

    output.push_str(&paint(use_colors, Blue.bold(), format!("Dependency Analysis: {}", project.name)));
    output.push_str("\n\n");

    let packages: usize = modules.iter().map(|(_, module)| module.packages.len()).sum();
    let circular: usize = modules.iter().map(|(_, module)| module.circular_packages().count()).sum();
    output.push_str(&format!("Modules: {}\n", modules.len()));
    output.push_str(&format!("Packages: {}\n", packages));
    let circular_line = format!("Circular packages: {}", circular);
    if circular > 0 {
        output.push_str(&paint(use_colors, Yellow.bold(), circular_line));
    } else {
        output.push_str(&paint(use_colors, Green.normal(), circular_line));
    }
    output.push('\n');

    for (path, module) in modules {
        output.push_str(&format!(
            "\n{} ({} packages)\n",
            paint(use_colors, Style::new().bold(), path),
            module.packages.len()
        ));

        for group in cycle_groups(module) {
            output.push_str(&format!("  Cycle: {}\n", group.packages.join(", ")));
        }

        if verbose {
            for (index, package) in module.ordered_packages().iter().enumerate() {
                output.push_str(&format_package_text(&encode_key(index)?, package, use_colors));
            }
        }

        for failure in &module.scan_failures {
            output.push_str(&format!(
                "  {} {}: {}\n",
                paint(use_colors, Yellow.normal(), "Unreadable"),
                failure.path.display(),
                failure.message
            ));
        }
    }

    if !project.failures.is_empty() {
        output.push_str(&format!("\n{}\n", paint(use_colors, Red.bold(), "Discovery failures:")));
        for failure in &project.failures {
            output.push_str(&format!("  {} ({}): {}\n", failure.module, failure.path.display(), failure.message));
        }
    }

    Ok(output)
}

/// Machine-readable report of an analysed project
#[derive(Debug, Serialize)]
pub struct ProjectReport {
    pub tool: String,
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub project: String,
    pub root: PathBuf,
    pub modules: Vec<ModuleReport>,
    pub failures: Vec<DiscoveryFailure>,
}

#[derive(Debug, Serialize)]
pub struct ModuleReport {
    pub path: String,
    pub state: AnalysisState,
    /// Packages in presentation order
    pub packages: Vec<PackageReport>,
    pub cycles: Vec<CycleGroup>,
    pub scan_failures: Vec<ScanFailure>,
}

#[derive(Debug, Serialize)]
pub struct PackageReport {
    pub key: String,
    pub name: String,
    pub classes: Vec<String>,
    pub direct: Vec<String>,
    pub implied: Vec<String>,
    pub circular: bool,
}

impl ProjectReport {
    pub fn build(project: &ProjectNode, modules: &[(String, &ModuleNode)]) -> Result<Self> {
        let modules = modules
            .iter()
            .map(|(path, module)| ModuleReport::build(path, module))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            tool: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
            generated_at: Utc::now(),
            project: project.name.clone(),
            root: project.root.clone(),
            modules,
            failures: project.failures.clone(),
        })
    }
}

impl ModuleReport {
    fn build(path: &str, module: &ModuleNode) -> Result<Self> {
        let names = |ids: &[PackageId]| -> Vec<String> {
            ids.iter()
                .filter_map(|id| module.package(*id))
                .map(|package| package.name.clone())
                .collect()
        };

        let packages = module
            .ordered_packages()
            .iter()
            .enumerate()
            .map(|(index, package)| {
                Ok(PackageReport {
                    key: encode_key(index)?,
                    name: package.name.clone(),
                    classes: package.classes.iter().map(|class| class.name.clone()).collect(),
                    direct: names(package.direct.as_slice()),
                    implied: names(package.implied.as_slice()),
                    circular: package.circular,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path: path.to_string(),
            state: module.state,
            packages,
            cycles: cycle_groups(module),
            scan_failures: module.scan_failures.clone(),
        })
    }
}

/// Format a project as JSON
pub fn format_project_json(project: &ProjectNode, modules: &[(String, &ModuleNode)], pretty: bool) -> Result<String> {
    let report = ProjectReport::build(project, modules)?;
    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}

/// Format the matrices of a project as CSV
///
/// Each module contributes a header row (`module`, `package`, `key`, then
/// the column keys) followed by one row per package. Cells hold the number
/// of classes of the column package importing the row package.
pub fn format_project_csv(modules: &[(String, &ModuleNode)]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(vec![]);

    for (path, module) in modules {
        let packages = module.ordered_packages();
        let keys = (0..packages.len()).map(encode_key).collect::<Result<Vec<_>>>()?;

        let mut header = vec!["module".to_string(), "package".to_string(), "key".to_string()];
        header.extend(keys.iter().cloned());
        writer.write_record(&header)?;

        for (row, row_package) in packages.iter().enumerate() {
            let mut record = vec![path.clone(), row_package.name.clone(), keys[row].clone()];
            for (column, column_package) in packages.iter().enumerate() {
                let count = if column == row {
                    0
                } else {
                    column_package.classes_referencing(row_package.id).count()
                };
                record.push(if count == 0 { String::new() } else { count.to_string() });
            }
            writer.write_record(&record)?;
        }
    }

    let data = String::from_utf8(writer.into_inner()?).map_err(|e| DsmError::CsvSerialize { source: e })?;
    Ok(data)
}
