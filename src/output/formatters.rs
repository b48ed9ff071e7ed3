//! Output formatting functionality
//!
//! Every format is a [`ModelVisitor`] over the finished tree, so all of them
//! list packages, units and edges in the same order.

use crate::core::builder::{Diagnostic, Model};
use crate::core::stats::ModelStatistics;
use crate::core::visit::{sorted_dependencies, walk, walk_dependencies, walk_packages, ModelVisitor};
use crate::error::{ErrorSeverity, PacktreeError, Result};
use crate::models::package::PackageId;
use crate::models::tree::PackageTree;
use crate::models::unit::UnitId;
use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;

const INDENT: &str = "  ";

fn paint(use_colors: bool, style: Style, text: &str) -> String {
    if use_colors {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Indented package tree with each unit's dependencies under it
struct TextTree<'a> {
    model: &'a Model,
    use_colors: bool,
    out: String,
}

impl ModelVisitor for TextTree<'_> {
    fn enter_package(
        &mut self,
        tree: &PackageTree,
        package: PackageId,
        depth: usize,
    ) -> Result<()> {
        let name = paint(self.use_colors, Blue.bold(), tree.package(package).name());
        let _ = writeln!(self.out, "{}{}", INDENT.repeat(depth), name);
        Ok(())
    }

    fn visit_unit(&mut self, tree: &PackageTree, unit: UnitId, depth: usize) -> Result<()> {
        let name = tree.unit(unit).name();
        let label = if self.model.is_declared(unit) {
            paint(self.use_colors, Green.normal(), name)
        } else {
            paint(self.use_colors, Style::new().dimmed(), &format!("{} (implicit)", name))
        };
        let _ = writeln!(self.out, "{}{}", INDENT.repeat(depth), label);

        for dep in sorted_dependencies(tree, unit) {
            let target = paint(self.use_colors, Cyan.normal(), &tree.unit_qualified_name(dep));
            let _ = writeln!(self.out, "{}-> {}", INDENT.repeat(depth + 1), target);
        }
        Ok(())
    }
}

/// Format the model as an indented tree followed by a summary
pub fn format_model_text(
    model: &Model,
    project_name: &str,
    use_colors: bool,
    verbose: bool,
) -> Result<String> {
    let mut text = TextTree {
        model,
        use_colors,
        out: String::new(),
    };

    let header = paint(use_colors, Blue.bold().underline(), project_name);
    let _ = writeln!(text.out, "{}\n", header);
    walk_packages(model.tree(), &mut text)?;

    let mut output = text.out;
    output.push('\n');
    output.push_str(&format_summary_text(model, use_colors, verbose));
    Ok(output)
}

/// One-line summary used in quiet mode
pub fn format_summary_line(model: &Model) -> String {
    let tree = model.tree();
    format!(
        "Packages: {}, Units: {}, Dependencies: {}, Failed files: {}\n",
        tree.package_count(),
        tree.unit_count(),
        tree.edge_count(),
        model.report().files_failed
    )
}

/// Counts, cycles and (in verbose mode) diagnostics
pub fn format_summary_text(model: &Model, use_colors: bool, verbose: bool) -> String {
    let stats = ModelStatistics::from_model(model);
    let report = model.report();
    let mut output = String::new();

    let _ = writeln!(output, "{}", paint(use_colors, Blue.bold(), "Model Summary"));
    let _ = writeln!(
        output,
        "Packages: {} ({} roots, max depth {})",
        stats.packages, stats.roots, stats.max_package_depth
    );
    let _ = writeln!(
        output,
        "Units: {} ({} declared, {} implicit)",
        stats.units, stats.declared_units, stats.implicit_units
    );
    let _ = writeln!(output, "Dependencies: {}", stats.dependencies);
    let _ = writeln!(
        output,
        "Files: {} processed, {} failed",
        report.files_processed, report.files_failed
    );
    if report.wildcard_imports > 0 {
        let _ = writeln!(output, "Wildcard imports: {}", report.wildcard_imports);
    }
    let _ = writeln!(output, "Build duration: {:.2?}", report.duration);

    if stats.has_cycles() {
        let title = format!("Dependency cycles: {}", stats.cycles.len());
        let _ = writeln!(output, "\n{}", paint(use_colors, Yellow.bold(), &title));
        for cycle in &stats.cycles {
            let _ = writeln!(output, "{}{}", INDENT, cycle.join(" <-> "));
        }
    }

    if report.has_diagnostics() {
        if verbose {
            let _ = writeln!(output, "\nDiagnostics:");
            for diagnostic in &report.diagnostics {
                let _ = writeln!(output, "{}{}", INDENT, format_diagnostic(diagnostic, use_colors));
            }
        } else {
            let note = format!(
                "{} diagnostics (use --verbose to list them)",
                report.diagnostics.len()
            );
            let _ = writeln!(output, "\n{}", paint(use_colors, Yellow.normal(), &note));
        }
    }

    output
}

fn format_diagnostic(diagnostic: &Diagnostic, use_colors: bool) -> String {
    let severity = match diagnostic.severity {
        ErrorSeverity::Warning => paint(use_colors, Yellow.normal(), "WARNING"),
        ErrorSeverity::Error => paint(use_colors, Red.normal(), "ERROR"),
        ErrorSeverity::Critical => paint(use_colors, Red.bold(), "CRITICAL"),
    };
    let location = match diagnostic.line {
        Some(line) => format!("{}:{}", diagnostic.path.display(), line),
        None => diagnostic.path.display().to_string(),
    };
    format!("[{}] {}: {}", severity, location, diagnostic.message)
}

#[derive(Debug, Serialize)]
struct JsonUnit {
    name: String,
    qualified_name: String,
    declared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<PathBuf>,
    dependencies: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonPackage {
    name: String,
    depth: usize,
    units: Vec<JsonUnit>,
}

#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    project: &'a str,
    generated_at: String,
    statistics: ModelStatistics,
    packages: Vec<JsonPackage>,
    files_processed: usize,
    files_failed: usize,
    wildcard_imports: usize,
    diagnostics: &'a [Diagnostic],
}

/// Collects packages in visitation order; a unit always belongs to the
/// package entered last
struct JsonCollector<'a> {
    model: &'a Model,
    packages: Vec<JsonPackage>,
}

impl ModelVisitor for JsonCollector<'_> {
    fn enter_package(
        &mut self,
        tree: &PackageTree,
        package: PackageId,
        _depth: usize,
    ) -> Result<()> {
        self.packages.push(JsonPackage {
            name: tree.qualified_name(package),
            depth: tree.depth(package),
            units: Vec::new(),
        });
        Ok(())
    }

    fn visit_unit(&mut self, tree: &PackageTree, unit: UnitId, _depth: usize) -> Result<()> {
        let entry = JsonUnit {
            name: tree.unit(unit).name().to_string(),
            qualified_name: tree.unit_qualified_name(unit),
            declared: self.model.is_declared(unit),
            file: self.model.declaring_file(unit).map(|p| p.to_path_buf()),
            dependencies: sorted_dependencies(tree, unit)
                .into_iter()
                .map(|dep| tree.unit_qualified_name(dep))
                .collect(),
        };
        if let Some(package) = self.packages.last_mut() {
            package.units.push(entry);
        }
        Ok(())
    }
}

/// Format the model as a pretty-printed JSON document
pub fn format_model_json(model: &Model, project_name: &str) -> Result<String> {
    let mut collector = JsonCollector {
        model,
        packages: Vec::new(),
    };
    walk_packages(model.tree(), &mut collector)?;

    let report = model.report();
    let document = JsonDocument {
        project: project_name,
        generated_at: chrono::Utc::now().to_rfc3339(),
        statistics: ModelStatistics::from_model(model),
        packages: collector.packages,
        files_processed: report.files_processed,
        files_failed: report.files_failed,
        wildcard_imports: report.wildcard_imports,
        diagnostics: &report.diagnostics,
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

fn dot_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Graphviz writer: nested clusters for packages, one node per unit
struct DotWriter {
    out: String,
    nodes: HashMap<UnitId, String>,
    next_cluster: usize,
}

impl DotWriter {
    /// Node identifier for a unit, declared on first use
    fn node_for(&mut self, tree: &PackageTree, unit: UnitId, depth: usize) -> String {
        if let Some(id) = self.nodes.get(&unit) {
            return id.clone();
        }

        let id = format!("u{}", unit.index());
        let _ = writeln!(
            self.out,
            "{}\"{}\" [label=\"{}\"];",
            INDENT.repeat(depth),
            id,
            dot_escape(tree.unit(unit).name())
        );
        self.nodes.insert(unit, id.clone());
        id
    }
}

impl ModelVisitor for DotWriter {
    fn enter_package(
        &mut self,
        tree: &PackageTree,
        package: PackageId,
        depth: usize,
    ) -> Result<()> {
        let indent = INDENT.repeat(depth + 1);
        let _ = writeln!(self.out, "{}subgraph cluster_{} {{", indent, self.next_cluster);
        let _ = writeln!(
            self.out,
            "{}{}label=\"{}\";",
            indent,
            INDENT,
            dot_escape(tree.package(package).name())
        );
        self.next_cluster += 1;
        Ok(())
    }

    fn visit_unit(&mut self, tree: &PackageTree, unit: UnitId, depth: usize) -> Result<()> {
        self.node_for(tree, unit, depth + 1);
        Ok(())
    }

    fn leave_package(
        &mut self,
        _tree: &PackageTree,
        _package: PackageId,
        depth: usize,
    ) -> Result<()> {
        let _ = writeln!(self.out, "{}}}", INDENT.repeat(depth + 1));
        Ok(())
    }

    fn visit_dependency(&mut self, tree: &PackageTree, from: UnitId, to: UnitId) -> Result<()> {
        let from = self.node_for(tree, from, 1);
        let to = self.node_for(tree, to, 1);
        let _ = writeln!(self.out, "{}\"{}\" -> \"{}\";", INDENT, from, to);
        Ok(())
    }
}

/// Format the model as a Graphviz DOT digraph titled with the project name
pub fn format_model_dot(model: &Model, project_name: &str) -> Result<String> {
    let title = dot_escape(project_name);
    let mut writer = DotWriter {
        out: String::new(),
        nodes: HashMap::new(),
        next_cluster: 0,
    };

    let _ = writeln!(writer.out, "digraph \"{}\" {{", title);
    let _ = writeln!(
        writer.out,
        "{}// edges point from the importing unit to the imported unit",
        INDENT
    );
    let _ = writeln!(writer.out, "{}label=\"{}\";", INDENT, title);
    let _ = writeln!(writer.out, "{}labelloc=t;", INDENT);
    let _ = writeln!(writer.out, "{}node [shape=box];", INDENT);
    walk(model.tree(), &mut writer)?;
    writer.out.push_str("}\n");

    Ok(writer.out)
}

/// Edge collector writing one CSV record per dependency
struct CsvEdges {
    writer: csv::Writer<Vec<u8>>,
}

impl ModelVisitor for CsvEdges {
    fn visit_dependency(&mut self, tree: &PackageTree, from: UnitId, to: UnitId) -> Result<()> {
        self.writer
            .write_record([tree.unit_qualified_name(from), tree.unit_qualified_name(to)])?;
        Ok(())
    }
}

/// Format the dependency edges as `source,target` CSV
pub fn format_model_csv(model: &Model) -> Result<String> {
    let mut edges = CsvEdges {
        writer: csv::Writer::from_writer(Vec::new()),
    };
    edges.writer.write_record(["source", "target"])?;
    walk_dependencies(model.tree(), &mut edges)?;

    let bytes = edges
        .writer
        .into_inner()
        .map_err(|e| PacktreeError::io_error(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        PacktreeError::io_error(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
