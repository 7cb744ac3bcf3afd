//! Shared helpers for building Java source trees on disk

use std::fs;
use std::path::{Path, PathBuf};

use dsm::models::Settings;

/// Sources directory of a module below the project root
pub fn java_root(root: &Path, module: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    if !module.is_empty() {
        path = path.join(module);
    }
    path.join("src").join("main").join("java")
}

/// Write `<package>/<class>.java` below a module's sources with the given imports
pub fn write_class(root: &Path, module: &str, package: &str, class: &str, imports: &[&str]) {
    let dir = package
        .split('.')
        .fold(java_root(root, module), |path, segment| path.join(segment));
    fs::create_dir_all(&dir).unwrap();

    let mut source = format!("package {};\n\n", package);
    for import in imports {
        source.push_str(&format!("import {};\n", import));
    }
    source.push_str(&format!("\npublic class {} {{\n}}\n", class));
    fs::write(dir.join(format!("{}.java", class)), source).unwrap();
}

/// Write a POM listing the given modules
pub fn write_pom(root: &Path, modules: &[&str]) {
    let mut pom = String::from("<project>\n  <modules>\n");
    for module in modules {
        pom.push_str(&format!("    <module>{}</module>\n", module));
    }
    pom.push_str("  </modules>\n</project>\n");
    fs::write(root.join("pom.xml"), pom).unwrap();
}

/// Settings for analysing `root`, optionally single-threaded
pub fn settings_for(root: &Path, parallel: bool) -> Settings {
    Settings {
        project_root: root.to_path_buf(),
        parallel,
        show_progress: false,
        quiet: true,
        ..Default::default()
    }
}

/// Package names of a module in presentation order
pub fn order_of(module: &dsm::ModuleNode) -> Vec<String> {
    module.ordered_packages().iter().map(|package| package.name.clone()).collect()
}
