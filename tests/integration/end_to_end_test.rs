//! End-to-end pipeline tests on realistic trees

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tangle::models::config::Settings;
use tangle::output::{format_json, format_text};
use tangle::{AnalysisResult, Analyzer};
use tempfile::TempDir;

fn analyze_with(settings: Settings) -> AnalysisResult {
    Analyzer::new(settings)
        .with_private_cache()
        .analyze()
        .unwrap()
}

fn analyze(root: &Path) -> AnalysisResult {
    analyze_with(Settings {
        root: root.to_path_buf(),
        ..Settings::default()
    })
}

fn canonical(dir: &TempDir) -> PathBuf {
    fs::canonicalize(dir.path()).unwrap()
}

#[test]
fn alias_resolution_produces_edge() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/app.ts"), "import \"@/util\";\n").unwrap();
    fs::write(dir.path().join("src/util.ts"), "export {};\n").unwrap();
    let root = canonical(&dir);

    let mut aliases = HashMap::new();
    aliases.insert("@/*".to_string(), vec!["src/*".to_string()]);

    let result = analyze_with(Settings {
        root: dir.path().to_path_buf(),
        aliases,
        // Relative to the analyzed root, tsconfig-style
        base_url: Some(PathBuf::from(".")),
        ..Settings::default()
    });

    assert!(result
        .graph
        .has_edge(&root.join("src/app.ts"), &root.join("src/util.ts")));
}

#[test]
fn compiled_extension_remap_produces_edge() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/a.ts"), "import \"./b.js\";\n").unwrap();
    fs::write(dir.path().join("src/b.ts"), "export {};\n").unwrap();
    let root = canonical(&dir);

    let result = analyze(dir.path());
    assert!(result
        .graph
        .has_edge(&root.join("src/a.ts"), &root.join("src/b.ts")));
}

#[test]
fn mixed_dialects_all_contribute_edges() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("esm.mjs"), "import './target.js';\n").unwrap();
    fs::write(
        dir.path().join("cjs.cjs"),
        "const target = require('./target.js');\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("dynamic.ts"),
        "export async function load() { return import('./target.js'); }\n",
    )
    .unwrap();
    fs::write(dir.path().join("reexport.ts"), "export * from './target.js';\n").unwrap();
    fs::write(dir.path().join("target.js"), "export const x = 1;\n").unwrap();
    let root = canonical(&dir);

    let result = analyze(dir.path());
    let target = root.join("target.js");

    assert_eq!(result.stats.total_files, 5);
    assert_eq!(result.stats.total_dependencies, 4);
    for source in ["esm.mjs", "cjs.cjs", "dynamic.ts", "reexport.ts"] {
        assert!(
            result.graph.has_edge(&root.join(source), &target),
            "missing edge from {}",
            source
        );
    }
}

#[test]
fn tsx_and_jsx_files_are_analyzed() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("App.tsx"),
        "import { Widget } from './Widget';\nexport const App = () => <Widget />;\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("Widget.jsx"),
        "export const Widget = () => <div>hi</div>;\n",
    )
    .unwrap();

    let result = analyze(dir.path());
    assert_eq!(result.stats.total_files, 2);
    assert_eq!(result.stats.total_dependencies, 1);
    assert!(result.errors.is_empty());
}

#[test]
fn ignored_directories_and_patterns_are_skipped() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("node_modules/lib")).unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("node_modules/lib/index.js"), "export {};\n").unwrap();
    fs::write(dir.path().join("src/a.ts"), "import './a.test';\n").unwrap();
    fs::write(dir.path().join("src/a.test.ts"), "import './a';\n").unwrap();

    let result = analyze_with(Settings {
        root: dir.path().to_path_buf(),
        ignore_patterns: vec!["*.test.ts".to_string()],
        ..Settings::default()
    });

    assert_eq!(result.stats.total_files, 1);
    // The reference into the ignored file does not become an edge
    assert_eq!(result.stats.total_dependencies, 0);
}

#[test]
fn unreadable_and_broken_files_do_not_abort() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ok.ts"), "import './peer';\n").unwrap();
    fs::write(dir.path().join("peer.ts"), "export {};\n").unwrap();
    fs::write(dir.path().join("broken.ts"), "import { } from from;;; {\n").unwrap();

    let result = analyze(dir.path());
    assert_eq!(result.stats.total_files, 3);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].file.ends_with("broken.ts"));
    assert_eq!(result.stats.total_dependencies, 1);
}

#[test]
fn json_report_relativizes_paths() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/a.ts"), "import './b';\n").unwrap();
    fs::write(dir.path().join("src/b.ts"), "import './a';\n").unwrap();

    let result = analyze(dir.path());
    let json: serde_json::Value = serde_json::from_str(&format_json(&result).unwrap()).unwrap();

    assert_eq!(json["stats"]["totalFiles"], 2);
    assert_eq!(json["stats"]["totalDependencies"], 2);
    assert_eq!(json["stats"]["circularDependencies"], 1);

    let nodes = json["graph"]["nodes"].as_array().unwrap();
    assert!(nodes.iter().all(|n| {
        let s = n.as_str().unwrap();
        s.starts_with("src/") && !s.starts_with('/')
    }));

    let chain = json["cycles"][0]["chain"].as_array().unwrap();
    assert_eq!(chain.first(), chain.last());
    assert!(json["cycles"][0]["suggestions"]
        .as_array()
        .map(|s| !s.is_empty())
        .unwrap_or(false));
}

#[test]
fn text_report_renders_for_dirty_tree() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.ts"), "import './b';\n").unwrap();
    fs::write(dir.path().join("b.ts"), "import './a';\n").unwrap();

    let result = analyze(dir.path());
    let text = format_text(&result, false, true);
    assert!(text.contains("Found 1 circular dependencies"));
    assert!(text.contains("a.ts"));
    assert!(text.contains("Graph shape:"));
}

#[test]
fn analysis_is_reproducible() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/x.ts"), "import './y';\nimport './z';\n").unwrap();
    fs::write(dir.path().join("src/y.ts"), "import './z';\n").unwrap();
    fs::write(dir.path().join("src/z.ts"), "import './x';\n").unwrap();

    let first = analyze(dir.path());
    let second = analyze(dir.path());

    assert_eq!(first.graph, second.graph);
    assert_eq!(first.cycles, second.cycles);
    assert_eq!(first.stats.top_dependencies, second.stats.top_dependencies);
}

#[test]
fn edge_insertion_respects_graph_invariant() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.ts"), "import './b';\nimport './c';\n").unwrap();
    fs::write(dir.path().join("b.ts"), "import './c';\n").unwrap();
    fs::write(dir.path().join("c.ts"), "export {};\n").unwrap();

    let result = analyze(dir.path());
    for node in result.graph.nodes() {
        for out in result.graph.outgoing(&node) {
            assert!(result.graph.incoming(&out).contains(&node));
        }
        for inc in result.graph.incoming(&node) {
            assert!(result.graph.outgoing(&inc).contains(&node));
        }
    }

    let edge_sum: usize = result
        .graph
        .nodes()
        .iter()
        .map(|n| result.graph.outgoing(n).len())
        .sum();
    assert_eq!(result.graph.edge_count(), edge_sum);
}
