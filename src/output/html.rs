//! HTML rendering of the dependency matrix and its drill-down tables
//!
//! Rendering is a pure function of an ordered module: the same module always
//! produces the same bytes.

use crate::error::{DsmError, Result};
use crate::models::{AnalysisState, ClassNode, ModuleNode, PackageNode};
use crate::output::keys::{encode_key, format_link, parse_link};

const STYLE: &str = "table{border-collapse:collapse;font-family:monospace}\
td,th{border:1px solid #ccc;padding:2px 6px;text-align:center}\
.dsm-row-header{background:#dde}\
.dsm-row-even{background:#fff}\
.dsm-row-odd{background:#f4f4f8}\
.dsm-cell-name-left{text-align:left}\
.dsm-cell-self{background:#999}\
.dsm-cell-circular{background:#d33}\
.dsm-col-count{min-width:2em}";

pub(crate) fn html_escape(s: impl AsRef<str>) -> String {
    s.as_ref()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap rendered sections in a self-contained document
pub fn document(title: &str, body: &str) -> String {
    let mut s = String::new();
    s.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">");
    s.push_str("<title>");
    s.push_str(&html_escape(title));
    s.push_str("</title><style>");
    s.push_str(STYLE);
    s.push_str("</style></head><body>\n");
    s.push_str(body);
    s.push_str("</body></html>\n");
    s
}

/// Full HTML document for one module
pub fn render_module(module: &ModuleNode) -> Result<String> {
    let section = render_section(module)?;
    Ok(document(&format!("Dependency matrix: {}", module.name), &section))
}

/// Heading, matrix and circular package list for one module
pub fn render_section(module: &ModuleNode) -> Result<String> {
    let mut s = String::new();
    s.push_str("<h2>");
    s.push_str(&html_escape(&module.name));
    s.push_str("</h2>\n");
    s.push_str(&render_matrix(module)?);

    let circular: Vec<&PackageNode> = module
        .ordered_packages()
        .into_iter()
        .filter(|package| package.circular)
        .collect();
    if !circular.is_empty() {
        s.push_str("<p>Circular packages:</p><ul>");
        for package in circular {
            s.push_str("<li>");
            s.push_str(&html_escape(&package.name));
            s.push_str("</li>");
        }
        s.push_str("</ul>\n");
    }
    Ok(s)
}

/// The matrix table
///
/// Rows and columns follow the presentation order. The cell in row R and
/// column C holds the number of classes of C that import a class of R, linked
/// as `<key of C>-<key of R>`.
pub fn render_matrix(module: &ModuleNode) -> Result<String> {
    ensure_ordered(module)?;
    let packages = module.ordered_packages();
    let keys = packages
        .iter()
        .enumerate()
        .map(|(index, _)| encode_key(index))
        .collect::<Result<Vec<String>>>()?;

    let mut s = String::new();
    s.push_str("<table class=\"dsm\">\n<tr class=\"dsm-row-header\"><th>Package name</th><th>Key</th>");
    for key in &keys {
        s.push_str("<th class=\"dsm-col-count\">");
        s.push_str(key);
        s.push_str("</th>");
    }
    s.push_str("</tr>\n");

    for (row, row_package) in packages.iter().enumerate() {
        s.push_str(row_class(row));
        s.push_str("<td class=\"dsm-cell-name-left\">");
        s.push_str(&html_escape(&row_package.name));
        s.push_str("</td><td>");
        s.push_str(&keys[row]);
        s.push_str("</td>");

        for (column, column_package) in packages.iter().enumerate() {
            if column == row {
                if row_package.circular {
                    s.push_str("<td class=\"dsm-cell-self dsm-cell-circular\"></td>");
                } else {
                    s.push_str("<td class=\"dsm-cell-self\"></td>");
                }
                continue;
            }

            let count = column_package.classes_referencing(row_package.id).count();
            if count == 0 {
                s.push_str("<td class=\"dsm-col-count\"></td>");
            } else {
                s.push_str("<td class=\"dsm-col-count\"><a href=\"#");
                s.push_str(&format_link(column, row)?);
                s.push_str("\">");
                s.push_str(&count.to_string());
                s.push_str("</a></td>");
            }
        }
        s.push_str("</tr>\n");
    }

    s.push_str("</table>\n");
    Ok(s)
}

/// Classes of the column package that import classes of the row package
///
/// `column` and `row` are presentation positions, as carried by matrix links.
pub fn render_drill_down(module: &ModuleNode, column: usize, row: usize) -> Result<String> {
    ensure_ordered(module)?;
    let source = package_at(module, column)?;
    let target = package_at(module, row)?;

    let mut s = String::new();
    s.push_str("<table class=\"dsm-drill-down\">\n<tr class=\"dsm-row-header\"><th>");
    s.push_str(&html_escape(&source.name));
    s.push_str("</th><th>");
    s.push_str(&html_escape(&target.name));
    s.push_str("</th></tr>\n");

    for (group, class) in source.classes_referencing(target.id).enumerate() {
        let referenced: Vec<&ClassNode> = class
            .references
            .iter()
            .filter(|reference| reference.package == target.id)
            .filter_map(|reference| target.class(reference.index))
            .collect();

        for (line, referenced_class) in referenced.iter().enumerate() {
            s.push_str(row_class(group));
            if line == 0 {
                s.push_str("<td class=\"dsm-cell-name-left\"");
                if referenced.len() > 1 {
                    s.push_str(&format!(" rowspan=\"{}\"", referenced.len()));
                }
                s.push('>');
                s.push_str(&html_escape(&class.name));
                s.push_str("</td>");
            }
            s.push_str("<td class=\"dsm-cell-name-left\">");
            s.push_str(&html_escape(&referenced_class.name));
            s.push_str("</td></tr>\n");
        }
    }

    s.push_str("</table>\n");
    Ok(s)
}

/// Drill-down for a matrix link such as `B-A`
pub fn render_link(module: &ModuleNode, link: &str) -> Result<String> {
    let (column, row) = parse_link(link)?;
    render_drill_down(module, column, row)
}

/// Matrix positions only exist once the presentation order is computed
fn ensure_ordered(module: &ModuleNode) -> Result<()> {
    if module.state != AnalysisState::Ordered {
        return Err(DsmError::analysis_error(format!(
            "module {} must be ordered before it is rendered",
            module.name
        )));
    }
    Ok(())
}

fn package_at(module: &ModuleNode, position: usize) -> Result<&PackageNode> {
    module.package_at(position).ok_or_else(|| DsmError::UnknownPackage {
        module: module.name.clone(),
        index: position,
    })
}

fn row_class(index: usize) -> &'static str {
    if index % 2 == 0 {
        "<tr class=\"dsm-row-even\">"
    } else {
        "<tr class=\"dsm-row-odd\">"
    }
}
