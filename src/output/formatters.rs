//! Output formatting for analysis results
//!
//! The JSON shape is a stable contract consumed by external tooling: path
//! strings are relativized to the analyzed root and keys are camelCase.

use crate::error::Result;
use crate::models::analysis::AnalysisResult;
use crate::models::cycle::SuggestionType;
use ansi_term::Colour::{Cyan, Green, Red, Yellow};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport {
    stats: JsonStats,
    cycles: Vec<JsonCycle>,
    graph: JsonGraph,
    errors: Vec<JsonError>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonStats {
    total_files: usize,
    total_dependencies: usize,
    circular_dependencies: usize,
    top_dependencies: Vec<JsonFileCount>,
    top_dependents: Vec<JsonFileCount>,
    duration: u64,
}

#[derive(Serialize)]
struct JsonFileCount {
    file: String,
    count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonCycle {
    chain: Vec<String>,
    length: usize,
    suggestions: Vec<JsonSuggestion>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSuggestion {
    #[serde(rename = "type")]
    kind: SuggestionType,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_edge: Option<JsonEdge>,
}

#[derive(Serialize)]
struct JsonEdge {
    from: String,
    to: String,
}

#[derive(Serialize)]
struct JsonGraph {
    nodes: Vec<String>,
    edges: Vec<JsonEdge>,
}

#[derive(Serialize)]
struct JsonError {
    file: String,
    error: String,
}

/// A path rendered relative to the analyzed root
fn relativize(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn build_report(result: &AnalysisResult) -> JsonReport {
    let root = &result.root;

    JsonReport {
        stats: JsonStats {
            total_files: result.stats.total_files,
            total_dependencies: result.stats.total_dependencies,
            circular_dependencies: result.stats.circular_dependencies,
            top_dependencies: result
                .stats
                .top_dependencies
                .iter()
                .map(|(file, count)| JsonFileCount {
                    file: relativize(file, root),
                    count: *count,
                })
                .collect(),
            top_dependents: result
                .stats
                .top_dependents
                .iter()
                .map(|(file, count)| JsonFileCount {
                    file: relativize(file, root),
                    count: *count,
                })
                .collect(),
            duration: result.stats.duration_ms,
        },
        cycles: result
            .cycles
            .iter()
            .map(|report| JsonCycle {
                chain: report
                    .cycle
                    .chain
                    .iter()
                    .map(|path| relativize(path, root))
                    .collect(),
                length: report.cycle.length,
                suggestions: report
                    .suggestions
                    .iter()
                    .map(|suggestion| JsonSuggestion {
                        kind: suggestion.kind,
                        description: suggestion.description.clone(),
                        target_edge: suggestion.target_edge.as_ref().map(|(from, to)| JsonEdge {
                            from: relativize(from, root),
                            to: relativize(to, root),
                        }),
                    })
                    .collect(),
            })
            .collect(),
        graph: JsonGraph {
            nodes: result
                .graph
                .nodes()
                .iter()
                .map(|path| relativize(path, root))
                .collect(),
            edges: result
                .graph
                .edges()
                .iter()
                .map(|(from, to)| JsonEdge {
                    from: relativize(from, root),
                    to: relativize(to, root),
                })
                .collect(),
        },
        errors: result
            .errors
            .iter()
            .map(|error| JsonError {
                file: relativize(&error.file, root),
                error: error.error.clone(),
            })
            .collect(),
    }
}

/// Serialize the result as the JSON report contract
pub fn format_json(result: &AnalysisResult) -> Result<String> {
    let report = build_report(result);
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Render a human-readable text report
pub fn format_text(result: &AnalysisResult, use_colors: bool, verbose: bool) -> String {
    let paint = |text: String, colour: ansi_term::Colour| {
        if use_colors {
            colour.paint(text).to_string()
        } else {
            text
        }
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Circular dependency analysis of {}\n",
        paint(result.root.display().to_string(), Cyan)
    ));
    out.push_str(&format!(
        "  {} files, {} dependencies, analyzed in {}ms\n\n",
        result.stats.total_files, result.stats.total_dependencies, result.stats.duration_ms
    ));

    if result.cycles.is_empty() {
        out.push_str(&format!(
            "{}\n",
            paint("No circular dependencies found".to_string(), Green)
        ));
    } else {
        out.push_str(&format!(
            "{}\n\n",
            paint(
                format!("Found {} circular dependencies", result.cycles.len()),
                Red
            )
        ));

        for (index, report) in result.cycles.iter().enumerate() {
            let chain = report
                .cycle
                .chain
                .iter()
                .map(|path| relativize(path, &result.root))
                .collect::<Vec<_>>()
                .join(" -> ");
            out.push_str(&format!(
                "Cycle {} ({} {}):\n",
                index + 1,
                report.cycle.length,
                if report.cycle.length == 1 { "file" } else { "files" }
            ));
            out.push_str(&format!("  {}\n", paint(chain, Red)));
            for suggestion in &report.suggestions {
                out.push_str(&format!(
                    "  - [{}] {}\n",
                    paint(suggestion.kind.to_string(), Yellow),
                    suggestion.description
                ));
            }
            out.push('\n');
        }
    }

    if !result.stats.top_dependencies.is_empty() {
        out.push_str("Top dependencies:\n");
        for (file, count) in &result.stats.top_dependencies {
            out.push_str(&format!(
                "  {:>4}  {}\n",
                count,
                relativize(file, &result.root)
            ));
        }
    }
    if !result.stats.top_dependents.is_empty() {
        out.push_str("Top dependents:\n");
        for (file, count) in &result.stats.top_dependents {
            out.push_str(&format!(
                "  {:>4}  {}\n",
                count,
                relativize(file, &result.root)
            ));
        }
    }

    if verbose {
        out.push_str(&format!(
            "\nGraph shape: {} orphans, {} leaves, {} roots\n",
            result.graph.orphans().len(),
            result.graph.leaves().len(),
            result.graph.roots().len()
        ));
    }

    if !result.errors.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            paint(format!("{} files failed to parse:", result.errors.len()), Yellow)
        ));
        for error in &result.errors {
            out.push_str(&format!(
                "  {}: {}\n",
                relativize(&error.file, &result.root),
                error.error
            ));
        }
    }

    out
}

/// Render cycles as CSV rows for spreadsheet triage
pub fn format_csv(result: &AnalysisResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["cycle", "length", "files", "suggestions"])?;

    for (index, report) in result.cycles.iter().enumerate() {
        let chain = report
            .cycle
            .chain
            .iter()
            .map(|path| relativize(path, &result.root))
            .collect::<Vec<_>>()
            .join(" -> ");
        let suggestions = report
            .suggestions
            .iter()
            .map(|s| s.kind.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        writer.write_record([
            (index + 1).to_string(),
            report.cycle.length.to_string(),
            chain,
            suggestions,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::error::TangleError::analysis(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| crate::error::TangleError::analysis(e.to_string()))
}

/// Render the graph in DOT form with cycle edges highlighted
pub fn format_dot(result: &AnalysisResult) -> String {
    let mut cycle_edges: HashSet<(PathBuf, PathBuf)> = HashSet::new();
    for report in &result.cycles {
        for edge in report.cycle.edges() {
            cycle_edges.insert(edge);
        }
    }
    result.graph.to_dot(&cycle_edges)
}
