//! Presentation ordering of a module's packages
//!
//! Packages that others depend on come first, so in an acyclic module every
//! populated cell lands on one side of the matrix diagonal.

use crate::error::{DsmError, Result};
use crate::models::{AnalysisState, ModuleNode, PackageId, PackageNode};
use std::cmp::Ordering;

/// Pairwise DSM comparison, first discriminating rule wins:
///
/// 1. `a` before `b` when `b` depends on `a` but not the other way round
/// 2. `b` before `a` in the reverse case
/// 3. more implied references first
/// 4. package name
///
/// Antisymmetric and never `Equal` for distinct packages. It is not
/// transitive when rules mix, so it must not be handed to `slice::sort_by`;
/// see [`presentation_order`].
pub fn compare_packages(a: &PackageNode, b: &PackageNode) -> Ordering {
    let a_in_b = b.implied.contains(&a.id);
    let b_in_a = a.implied.contains(&b.id);

    match (a_in_b, b_in_a) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => b
            .implied
            .len()
            .cmp(&a.implied.len())
            .then_with(|| a.name.cmp(&b.name)),
    }
}

/// Order packages by inserting them one at a time in alphabetical order
///
/// Each package goes after the last placed package it strictly depends on,
/// then before the first package from there on that it compares less than.
/// Because implied sets are transitively closed, every strict dependency
/// ends up ahead of its dependents whatever the tie-breakers decide.
pub fn presentation_order(module: &ModuleNode) -> Vec<PackageId> {
    let mut alphabetical: Vec<&PackageNode> = module.packages.iter().collect();
    alphabetical.sort_by(|a, b| a.name.cmp(&b.name));

    let mut ordered: Vec<&PackageNode> = Vec::with_capacity(alphabetical.len());
    for package in alphabetical {
        let lower = ordered
            .iter()
            .rposition(|placed| depends_strictly(package, placed))
            .map_or(0, |index| index + 1);
        let position = ordered[lower..]
            .iter()
            .position(|placed| compare_packages(package, placed) == Ordering::Less)
            .map_or(ordered.len(), |offset| lower + offset);
        ordered.insert(position, package);
    }

    ordered.into_iter().map(|package| package.id).collect()
}

/// `dependent` reaches `dependency` but not the other way round
fn depends_strictly(dependent: &PackageNode, dependency: &PackageNode) -> bool {
    dependent.implied.contains(&dependency.id) && !dependency.implied.contains(&dependent.id)
}

/// Compute and store the presentation order of a closed module
pub fn order_module(module: &mut ModuleNode) -> Result<()> {
    if module.state != AnalysisState::Closed {
        return Err(DsmError::analysis_error(format!(
            "module {} must be closed before it is ordered",
            module.name
        )));
    }
    module.order = presentation_order(module);
    module.state = AnalysisState::Ordered;
    Ok(())
}
