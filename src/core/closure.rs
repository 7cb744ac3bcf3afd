//! Transitive closure of package references

use crate::error::{DsmError, Result};
use crate::models::{AnalysisState, ModuleNode, PackageId, RefSet};

/// Every package reachable from `start` through direct references
///
/// `start` itself is included only when it can reach itself again.
pub fn implied_references(module: &ModuleNode, start: PackageId) -> RefSet<PackageId> {
    let mut implied = RefSet::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        let Some(package) = module.package(current) else {
            continue;
        };
        for &next in package.direct.iter() {
            if implied.insert(next) {
                stack.push(next);
            }
        }
    }

    implied
}

/// Compute implied references and circularity for every package
pub fn close_module(module: &mut ModuleNode) -> Result<()> {
    if module.state != AnalysisState::Scanned {
        return Err(DsmError::analysis_error(format!(
            "module {} must be scanned before its closure is computed",
            module.name
        )));
    }

    let closures: Vec<RefSet<PackageId>> = module
        .packages
        .iter()
        .map(|package| implied_references(module, package.id))
        .collect();
    let names: Vec<String> = module.packages.iter().map(|p| p.name.clone()).collect();

    for (package, mut implied) in module.packages.iter_mut().zip(closures) {
        implied.sort_by(|a, b| names[a.0].cmp(&names[b.0]));
        package.circular = implied.contains(&package.id);
        package.implied = implied;
    }

    let circular = module.circular_packages().count();
    if circular > 0 {
        tracing::debug!("module {} has {} circular package(s)", module.name, circular);
    }
    module.state = AnalysisState::Closed;
    Ok(())
}
