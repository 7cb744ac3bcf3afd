//! Property tests over randomly generated package graphs

use std::cmp::Ordering;
use std::collections::BTreeSet;

use dsm::core::{close_module, compare_packages, finalize_references, order_module};
use dsm::models::{ModuleNode, PackageId};
use dsm::output::{decode_key, encode_key, parse_link};
use proptest::prelude::*;

/// Module with packages p00..pNN, one class each, linked by `edges`
fn build_module(size: usize, edges: &[(usize, usize)]) -> ModuleNode {
    let mut module = ModuleNode::new("generated", "/generated");
    let classes: Vec<_> = (0..size)
        .map(|index| {
            let package = module.add_package(&format!("p{:02}", index));
            module.add_class(package, &format!("C{:02}", index))
        })
        .collect();

    for &(from, to) in edges {
        module.link_classes(classes[from % size], classes[to % size]);
    }

    finalize_references(&mut module);
    close_module(&mut module).unwrap();
    order_module(&mut module).unwrap();
    module
}

/// Reachability by repeated expansion, independent of the closure code
fn reachable(module: &ModuleNode, start: PackageId) -> BTreeSet<usize> {
    let mut seen: BTreeSet<usize> = BTreeSet::new();
    let mut frontier: Vec<usize> = module.packages[start.0].direct.iter().map(|id| id.0).collect();
    while let Some(next) = frontier.pop() {
        if seen.insert(next) {
            frontier.extend(module.packages[next].direct.iter().map(|id| id.0));
        }
    }
    seen
}

fn graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|size| (Just(size), prop::collection::vec((0..size, 0..size), 0..30)))
}

proptest! {
    #[test]
    fn prop_implied_is_transitive_closure((size, edges) in graph()) {
        let module = build_module(size, &edges);
        for package in &module.packages {
            let implied: BTreeSet<usize> = package.implied.iter().map(|id| id.0).collect();
            prop_assert_eq!(implied, reachable(&module, package.id));
        }
    }

    #[test]
    fn prop_circular_iff_self_implied((size, edges) in graph()) {
        let module = build_module(size, &edges);
        for package in &module.packages {
            prop_assert_eq!(package.circular, package.implied.contains(&package.id));
        }
    }

    #[test]
    fn prop_comparator_is_antisymmetric((size, edges) in graph()) {
        let module = build_module(size, &edges);
        for a in &module.packages {
            prop_assert_eq!(compare_packages(a, a), Ordering::Equal);
            for b in &module.packages {
                prop_assert_eq!(compare_packages(a, b), compare_packages(b, a).reverse());
            }
        }
    }

    #[test]
    fn prop_strict_dependencies_come_first((size, edges) in graph()) {
        let module = build_module(size, &edges);

        let mut order = module.order.clone();
        order.sort();
        order.dedup();
        prop_assert_eq!(order.len(), size);

        for a in &module.packages {
            for b in &module.packages {
                let strict = a.implied.contains(&b.id) && !b.implied.contains(&a.id);
                if strict {
                    prop_assert!(module.position_of(b.id) < module.position_of(a.id));
                }
            }
        }
    }

    #[test]
    fn prop_links_name_matrix_positions(column in 0usize..702, row in 0usize..702) {
        let link = format!("{}-{}", encode_key(column).unwrap(), encode_key(row).unwrap());
        prop_assert_eq!(parse_link(&link).unwrap(), (column, row));
        prop_assert_eq!(decode_key(&encode_key(column).unwrap()).unwrap(), column);
    }
}
