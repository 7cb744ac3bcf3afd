//! Cycle groups: strongly connected components of the direct reference graph

use crate::models::{ModuleNode, PackageId};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

/// Packages that all reach each other through direct references
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleGroup {
    /// Package names, alphabetical
    pub packages: Vec<String>,
}

/// Every cycle group of a module with at least two packages, sorted by their
/// first package name
///
/// A package is circular exactly when it belongs to one of these groups.
pub fn cycle_groups(module: &ModuleNode) -> Vec<CycleGroup> {
    let mut graph: DiGraph<PackageId, ()> = DiGraph::with_capacity(module.packages.len(), 0);
    let nodes: Vec<NodeIndex> = module.packages.iter().map(|package| graph.add_node(package.id)).collect();

    for package in &module.packages {
        for target in package.direct.iter() {
            graph.add_edge(nodes[package.id.0], nodes[target.0], ());
        }
    }

    let mut groups: Vec<CycleGroup> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| {
            let mut packages: Vec<String> = component
                .iter()
                .filter_map(|node| module.package(graph[*node]))
                .map(|package| package.name.clone())
                .collect();
            packages.sort();
            CycleGroup { packages }
        })
        .collect();

    groups.sort_by(|a, b| a.packages.cmp(&b.packages));
    groups
}
