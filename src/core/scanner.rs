//! Direct reference scanning
//!
//! Every package is scanned independently against a read-only
//! [`ResolutionIndex`]. The results are applied to the module only after all
//! packages are done, so the module graph is never mutated while workers run.

use crate::core::parallel::{process_with_progress, CancellationToken, ProgressUpdate};
use crate::core::resolver::ResolutionIndex;
use crate::error::{DsmError, Result};
use crate::models::{AnalysisState, ClassId, ModuleNode, PackageId, PackageNode, ScanFailure};
use crate::parsers::scan_file;

/// Resolved references of one class
#[derive(Debug, Clone)]
pub struct ClassScan {
    pub class: ClassId,
    pub references: Vec<ClassId>,
}

/// Scan output for one package
#[derive(Debug, Clone)]
pub struct PackageScan {
    pub package: PackageId,
    pub classes: Vec<ClassScan>,
    pub failures: Vec<ScanFailure>,
}

/// Read the imports of every class in a package and resolve them
///
/// An unreadable file is recorded as a failure and contributes no references.
pub fn scan_package(package: &PackageNode, index: &ResolutionIndex) -> PackageScan {
    let mut classes = Vec::with_capacity(package.classes.len());
    let mut failures = Vec::new();

    for class in &package.classes {
        let references = match scan_file(&class.path) {
            Ok(imports) => imports
                .iter()
                .filter_map(|candidate| index.resolve(candidate))
                .filter(|target| target.package != package.id)
                .collect(),
            Err(err) => {
                tracing::warn!("{}", err.user_message());
                failures.push(ScanFailure {
                    path: class.path.clone(),
                    message: err.to_string(),
                });
                Vec::new()
            }
        };
        classes.push(ClassScan {
            class: class.id,
            references,
        });
    }

    PackageScan {
        package: package.id,
        classes,
        failures,
    }
}

/// Scan every package of a module and record its direct references
pub fn scan_module<P>(
    module: &mut ModuleNode,
    parallel: bool,
    cancel: &CancellationToken,
    progress: &P,
) -> Result<()>
where
    P: Fn(ProgressUpdate) + Send + Sync,
{
    if module.state != AnalysisState::Discovered {
        return Err(DsmError::analysis_error(format!(
            "module {} was already scanned",
            module.name
        )));
    }

    let index = ResolutionIndex::build(module);
    let label = format!("Scanning {}", module.name);
    let scans = process_with_progress(
        module.packages.iter().collect(),
        parallel,
        &label,
        |package: &PackageNode| {
            cancel.check()?;
            Ok(scan_package(package, &index))
        },
        progress,
    )?;

    apply_scans(module, scans);
    Ok(())
}

/// Record scan results on the module graph
pub fn apply_scans(module: &mut ModuleNode, scans: Vec<PackageScan>) {
    for scan in scans {
        for class_scan in scan.classes {
            for target in class_scan.references {
                module.link_classes(class_scan.class, target);
            }
        }
        module.scan_failures.extend(scan.failures);
    }
    finalize_references(module);
}

/// Sort reference lists by name and mark the module scanned
///
/// Class references sort by fully qualified class name, package references
/// by package name, so every later traversal is deterministic.
pub fn finalize_references(module: &mut ModuleNode) {
    let package_names: Vec<String> = module.packages.iter().map(|p| p.name.clone()).collect();
    // Whole dotted strings: `a-b.A` sorts before `a.Z`
    let qualified_names: Vec<Vec<String>> = module
        .packages
        .iter()
        .map(|package| {
            package
                .classes
                .iter()
                .map(|class| package.qualified_class_name(class))
                .collect()
        })
        .collect();

    let qualified = |id: &ClassId| &qualified_names[id.package.0][id.index];

    for package in &mut module.packages {
        for class in &mut package.classes {
            class.references.sort_by(|a, b| qualified(a).cmp(qualified(b)));
        }
        package.direct.sort_by(|a, b| package_names[a.0].cmp(&package_names[b.0]));
    }

    module.state = AnalysisState::Scanned;
}
