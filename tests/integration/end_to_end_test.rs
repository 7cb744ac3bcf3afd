//! End-to-end tests: source trees on disk through the full analysis pipeline

use std::fs;

use dsm::core::Analyzer;
use dsm::error::DsmError;
use dsm::models::{AnalysisState, OutputFormat};
use dsm::output::{create_formatter, html, module_paths};
use tempfile::tempdir;

use super::common::{order_of, settings_for, write_class, write_pom};

/// core: shop.model <- shop.service <- shop.api, plus the core/api sub-module
/// web: shop.web importing from core, which stays unresolved
fn create_shop(root: &std::path::Path) {
    write_pom(root, &["core", "web"]);

    write_class(root, "core", "shop.model", "Item", &[]);
    write_class(root, "core", "shop.model", "Price", &["java.math.BigDecimal"]);
    write_class(root, "core", "shop.service", "Catalog", &["shop.model.Item", "shop.model.Price"]);
    write_class(root, "core", "shop.api", "CatalogResource", &["shop.service.Catalog"]);

    write_class(root, "core/api", "shop.api.v1", "Endpoint", &["shop.api.v2.Schema"]);
    write_class(root, "core/api", "shop.api.v2", "Schema", &[]);

    write_class(root, "web", "shop.web", "Page", &["shop.model.Item", "java.util.List"]);
}

#[test]
fn test_analyze_multi_module_project() {
    let dir = tempdir().unwrap();
    create_shop(dir.path());

    let project = Analyzer::new(settings_for(dir.path(), true)).analyze().unwrap();

    let names: Vec<&str> = project.modules.iter().map(|module| module.name.as_str()).collect();
    assert_eq!(names, vec!["core", "web"]);
    assert!(project.failures.is_empty());

    let core = project.find_module("core").unwrap();
    assert_eq!(core.state, AnalysisState::Ordered);
    assert_eq!(order_of(core), vec!["shop.model", "shop.service", "shop.api"]);
    assert!(core.circular_packages().next().is_none());

    let api = project.find_module("core/api").unwrap();
    assert_eq!(api.state, AnalysisState::Ordered);
    assert_eq!(order_of(api), vec!["shop.api.v2", "shop.api.v1"]);

    // Imports never resolve across modules
    let web = project.find_module("web").unwrap();
    let page_package = web.package_by_name("shop.web").unwrap();
    assert!(page_package.direct.is_empty());
    assert!(page_package.classes[0].references.is_empty());
}

#[test]
fn test_parallel_and_sequential_runs_agree() {
    let dir = tempdir().unwrap();
    create_shop(dir.path());

    let parallel = Analyzer::new(settings_for(dir.path(), true)).analyze().unwrap();
    let sequential = Analyzer::new(settings_for(dir.path(), false)).analyze().unwrap();

    for path in ["core", "core/api", "web"] {
        let a = parallel.find_module(path).unwrap();
        let b = sequential.find_module(path).unwrap();
        assert_eq!(order_of(a), order_of(b), "order of {}", path);
        assert_eq!(html::render_module(a).unwrap(), html::render_module(b).unwrap());
    }
}

#[test]
fn test_implicit_root_module_without_descriptor() {
    let dir = tempdir().unwrap();
    write_class(dir.path(), "", "app", "Main", &["lib.Util"]);
    write_class(dir.path(), "", "lib", "Util", &[]);

    let project = Analyzer::new(settings_for(dir.path(), false)).analyze().unwrap();

    assert_eq!(project.modules.len(), 1);
    assert_eq!(order_of(&project.modules[0]), vec!["lib", "app"]);
}

#[test]
fn test_missing_declared_module_is_recorded() {
    let dir = tempdir().unwrap();
    write_pom(dir.path(), &["core", "billing"]);
    write_class(dir.path(), "core", "shop.model", "Item", &[]);

    let project = Analyzer::new(settings_for(dir.path(), true)).analyze().unwrap();

    assert_eq!(project.modules.len(), 1);
    assert_eq!(project.failures.len(), 1);
    assert_eq!(project.failures[0].module, "billing");
}

#[test]
fn test_nested_declared_module_can_be_selected() {
    let dir = tempdir().unwrap();
    write_pom(dir.path(), &["services/billing"]);
    write_class(dir.path(), "services/billing", "billing.invoice", "Invoice", &["billing.tax.Rate"]);
    write_class(dir.path(), "services/billing", "billing.tax", "Rate", &[]);
    write_class(dir.path(), "services/billing/ledger", "ledger.entry", "Entry", &[]);
    write_class(dir.path(), "services/billing/ledger", "ledger.book", "Book", &["ledger.entry.Entry"]);

    let mut settings = settings_for(dir.path(), false);
    let project = Analyzer::new(settings.clone()).analyze().unwrap();

    let paths: Vec<String> = module_paths(&project).into_iter().map(|(path, _)| path).collect();
    assert_eq!(paths, vec!["services/billing", "services/billing/ledger"]);
    for path in &paths {
        assert!(project.find_module(path).is_some(), "lookup of {}", path);
    }

    let billing = project.find_module("services/billing").unwrap();
    assert_eq!(order_of(billing), vec!["billing.tax", "billing.invoice"]);

    settings.module = Some("services/billing/ledger".to_string());
    settings.output_format = OutputFormat::Json;
    let report = create_formatter(settings.output_format, &settings).format(&project).unwrap();
    assert!(report.contains("ledger.book"));
    assert!(!report.contains("billing.invoice"));
}

#[test]
fn test_malformed_descriptor_aborts() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("pom.xml"), "<project><modules><module>core</module></project>").unwrap();

    let result = Analyzer::new(settings_for(dir.path(), false)).analyze();
    assert!(matches!(result, Err(DsmError::Descriptor { .. })));
}

#[test]
fn test_explicit_module_list_overrides_descriptor() {
    let dir = tempdir().unwrap();
    create_shop(dir.path());

    let mut settings = settings_for(dir.path(), false);
    settings.modules = vec!["web".to_string()];
    let project = Analyzer::new(settings).analyze().unwrap();

    let names: Vec<&str> = project.modules.iter().map(|module| module.name.as_str()).collect();
    assert_eq!(names, vec!["web"]);
}

#[test]
fn test_excluded_directories_are_not_modules() {
    let dir = tempdir().unwrap();
    create_shop(dir.path());

    let mut settings = settings_for(dir.path(), false);
    settings.exclude_patterns = vec!["api".to_string()];
    let project = Analyzer::new(settings).analyze().unwrap();

    assert!(project.find_module("core/api").is_none());
    assert!(project.find_module("core").unwrap().package_by_name("shop.api.v1").is_none());
}

#[test]
fn test_wildcard_and_static_imports() {
    let dir = tempdir().unwrap();
    write_class(dir.path(), "", "app", "Main", &["lib.*", "static util.Strings.trim"]);
    write_class(dir.path(), "", "lib", "Helper", &[]);
    write_class(dir.path(), "", "util", "Strings", &[]);

    let project = Analyzer::new(settings_for(dir.path(), false)).analyze().unwrap();
    let module = &project.modules[0];

    let app = module.package_by_name("app").unwrap();
    let util = module.package_by_name("util").unwrap();
    let lib = module.package_by_name("lib").unwrap();
    assert!(app.references_package(util.id));
    assert!(!app.references_package(lib.id));
}

#[test]
fn test_unreadable_class_is_a_scan_failure() {
    let dir = tempdir().unwrap();
    write_class(dir.path(), "", "app", "Main", &["lib.Util"]);
    write_class(dir.path(), "", "lib", "Util", &[]);
    // Not valid UTF-8
    let broken = super::common::java_root(dir.path(), "").join("app").join("Broken.java");
    fs::write(&broken, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let project = Analyzer::new(settings_for(dir.path(), false)).analyze().unwrap();
    let module = &project.modules[0];

    assert_eq!(module.scan_failures.len(), 1);
    assert_eq!(order_of(module), vec!["lib", "app"]);
}

#[test]
fn test_missing_root_is_invalid() {
    let dir = tempdir().unwrap();
    let result = Analyzer::new(settings_for(&dir.path().join("missing"), false)).analyze();
    assert!(matches!(result, Err(DsmError::InvalidPath { .. })));
}

#[test]
fn test_cancelled_run_produces_no_project() {
    let dir = tempdir().unwrap();
    create_shop(dir.path());

    let analyzer = Analyzer::new(settings_for(dir.path(), true));
    analyzer.cancellation_token().cancel();

    assert!(matches!(analyzer.analyze(), Err(DsmError::Cancelled { .. })));
}
