//! Output tests: rendered matrices, drill-downs and machine-readable reports

use dsm::core::Analyzer;
use dsm::models::{OutputFormat, ProjectNode, Settings};
use dsm::output::{create_formatter, html, Formatter, JsonFormatter, TextFormatter};
use tempfile::tempdir;

use super::common::{settings_for, write_class};

/// model <-> util cycle; web's Cart and Page both use model, Cart also util
fn analysed_shop(parallel: bool) -> (tempfile::TempDir, ProjectNode, Settings) {
    let dir = tempdir().unwrap();
    write_class(dir.path(), "", "shop.model", "Item", &["shop.util.Money"]);
    write_class(dir.path(), "", "shop.util", "Money", &["shop.model.Item"]);
    write_class(dir.path(), "", "shop.web", "Cart", &["shop.model.Item", "shop.util.Money"]);
    write_class(dir.path(), "", "shop.web", "Page", &["shop.model.Item"]);

    let settings = settings_for(dir.path(), parallel);
    let project = Analyzer::new(settings.clone()).analyze().unwrap();
    (dir, project, settings)
}

#[test]
fn test_matrix_counts_and_links() {
    let (_dir, project, _) = analysed_shop(true);
    let module = &project.modules[0];

    let names: Vec<&str> = module.ordered_packages().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["shop.model", "shop.util", "shop.web"]);

    let matrix = html::render_matrix(module).unwrap();
    assert!(matrix.contains("<th>Package name</th><th>Key</th>"));
    assert!(matrix.contains("<th class=\"dsm-col-count\">C</th>"));
    // Two web classes use model, one uses util
    assert!(matrix.contains("<a href=\"#C-A\">2</a>"));
    assert!(matrix.contains("<a href=\"#C-B\">1</a>"));
    // model and util use each other
    assert!(matrix.contains("<a href=\"#B-A\">1</a>"));
    assert!(matrix.contains("<a href=\"#A-B\">1</a>"));
    assert_eq!(matrix.matches("dsm-cell-circular").count(), 2);
    assert!(matrix.contains("dsm-row-even"));
    assert!(matrix.contains("dsm-row-odd"));
}

#[test]
fn test_rendering_is_deterministic() {
    let (_dir, project, _) = analysed_shop(true);
    let module = &project.modules[0];

    let first = html::render_module(module).unwrap();
    let second = html::render_module(module).unwrap();
    assert_eq!(first, second);

    // Same sources elsewhere on disk: only the module name differs, the matrix does not
    let (_other, again, _) = analysed_shop(false);
    assert_eq!(
        html::render_matrix(module).unwrap(),
        html::render_matrix(&again.modules[0]).unwrap()
    );
}

#[test]
fn test_drill_down_lists_referencing_classes() {
    let (_dir, project, _) = analysed_shop(false);
    let module = &project.modules[0];

    let cell = html::render_link(module, "C-A").unwrap();
    assert!(cell.contains("<th>shop.web</th><th>shop.model</th>"));
    assert!(cell.contains(">Cart</td>"));
    assert!(cell.contains(">Page</td>"));
    assert!(cell.contains(">Item</td>"));
    // Cart refers to a single model class, so no row span
    assert!(!cell.contains("rowspan"));

    assert!(html::render_link(module, "#C-A").is_ok());
    assert!(html::render_link(module, "D-A").is_err());
    assert!(html::render_link(module, "CA").is_err());
}

#[test]
fn test_json_report() {
    let (_dir, project, _) = analysed_shop(true);
    let output = JsonFormatter::new(None, false).format(&project).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let packages = &value["modules"][0]["packages"];
    assert_eq!(packages[0]["name"], "shop.model");
    assert_eq!(packages[0]["circular"], true);
    assert_eq!(packages[2]["key"], "C");
    assert_eq!(packages[2]["circular"], false);
    assert_eq!(value["modules"][0]["cycles"][0]["packages"][0], "shop.model");
}

#[test]
fn test_text_and_csv_reports() {
    let (_dir, project, settings) = analysed_shop(true);

    let text = TextFormatter::new(None, false, true, false).format(&project).unwrap();
    assert!(text.contains("Circular packages: 2"));
    assert!(text.contains("Cycle: shop.model, shop.util"));

    let csv = create_formatter(OutputFormat::Csv, &settings).format(&project).unwrap();
    let header = csv.lines().next().unwrap();
    assert_eq!(header, "module,package,key,A,B,C");
    assert_eq!(csv.lines().count(), 4);
}
