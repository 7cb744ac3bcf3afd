//! Behavioural scenarios for references, circularity, keys, matrix cells and folding

use dsm::core::Analyzer;
use dsm::output::{decode_key, encode_key, html};
use tempfile::tempdir;

use super::common::{order_of, settings_for, write_class, write_pom};

#[test]
fn test_nested_package_is_a_distinct_reference() {
    let dir = tempdir().unwrap();
    write_class(dir.path(), "", "a", "A", &["a.b.B"]);
    write_class(dir.path(), "", "a.b", "B", &[]);
    write_class(dir.path(), "", "c", "C", &[]);

    let project = Analyzer::new(settings_for(dir.path(), false)).analyze().unwrap();
    let module = &project.modules[0];

    let a = module.package_by_name("a").unwrap();
    let ab = module.package_by_name("a.b").unwrap();
    let c = module.package_by_name("c").unwrap();

    assert_eq!(a.direct.as_slice(), &[ab.id]);
    assert!(!a.direct.contains(&a.id));
    assert!(ab.direct.is_empty());
    assert!(c.direct.is_empty());
    assert!(!a.circular);
}

#[test]
fn test_three_package_cycle() {
    let dir = tempdir().unwrap();
    write_class(dir.path(), "", "x", "X", &["y.Y"]);
    write_class(dir.path(), "", "y", "Y", &["z.Z"]);
    write_class(dir.path(), "", "z", "Z", &["x.X"]);

    let project = Analyzer::new(settings_for(dir.path(), true)).analyze().unwrap();
    let module = &project.modules[0];

    let ids: Vec<_> = ["x", "y", "z"]
        .iter()
        .map(|name| module.package_by_name(name).unwrap().id)
        .collect();

    for name in ["x", "y", "z"] {
        let package = module.package_by_name(name).unwrap();
        assert!(package.circular, "{} should be circular", name);
        assert_eq!(package.implied.len(), 3);
        for id in &ids {
            assert!(package.implied.contains(id));
        }
    }

    let groups = dsm::core::cycle_groups(module);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].packages, vec!["x", "y", "z"]);

    // Every package of the cycle is marked on its diagonal cell
    let matrix = html::render_matrix(module).unwrap();
    assert_eq!(matrix.matches("dsm-cell-self dsm-cell-circular").count(), 3);
}

#[test]
fn test_key_encoding_examples() {
    assert_eq!(encode_key(0).unwrap(), "A");
    assert_eq!(encode_key(25).unwrap(), "Z");
    assert_eq!(encode_key(26).unwrap(), "AA");
    assert_eq!(encode_key(27).unwrap(), "AB");
    assert_eq!(encode_key(701).unwrap(), "ZZ");
    assert!(encode_key(702).is_err());
    assert_eq!(decode_key("AB").unwrap(), 27);
}

#[test]
fn test_isolated_package_has_only_its_self_cell() {
    let dir = tempdir().unwrap();
    write_class(dir.path(), "", "a", "A", &["b.B"]);
    write_class(dir.path(), "", "b", "B", &[]);
    write_class(dir.path(), "", "p", "P", &[]);

    let project = Analyzer::new(settings_for(dir.path(), false)).analyze().unwrap();
    let module = &project.modules[0];
    assert_eq!(order_of(module), vec!["b", "a", "p"]);

    let matrix = html::render_matrix(module).unwrap();
    assert!(matrix.contains(
        "<td class=\"dsm-cell-name-left\">p</td><td>C</td>\
         <td class=\"dsm-col-count\"></td><td class=\"dsm-col-count\"></td>\
         <td class=\"dsm-cell-self\"></td></tr>"
    ));
    // Nothing links into or out of p's column
    assert!(!matrix.contains("#C-"));
    assert!(!matrix.contains("-C\""));
    assert!(matrix.contains("<a href=\"#B-A\">1</a>"));
}

#[test]
fn test_single_package_directory_is_folded_into_parent() {
    let dir = tempdir().unwrap();
    write_pom(dir.path(), &["core"]);
    write_class(dir.path(), "core", "shop.model", "Item", &["shop.tools.Helper"]);
    // One package, no modules of its own
    write_class(dir.path(), "core/tools", "shop.tools", "Helper", &[]);
    // Two packages: a real sub-module
    write_class(dir.path(), "core/api", "shop.api.v1", "Endpoint", &[]);
    write_class(dir.path(), "core/api", "shop.api.v2", "Schema", &[]);

    let project = Analyzer::new(settings_for(dir.path(), false)).analyze().unwrap();
    let core = project.find_module("core").unwrap();

    let sub_modules: Vec<&str> = core.sub_modules.iter().map(|module| module.name.as_str()).collect();
    assert_eq!(sub_modules, vec!["api"]);
    assert!(project.find_module("core/tools").is_none());

    // The folded package belongs to core and takes part in its matrix
    assert_eq!(order_of(core), vec!["shop.tools", "shop.model"]);
    let model = core.package_by_name("shop.model").unwrap();
    let tools = core.package_by_name("shop.tools").unwrap();
    assert!(model.references_package(tools.id));
    assert_eq!(tools.module, "core");
}
