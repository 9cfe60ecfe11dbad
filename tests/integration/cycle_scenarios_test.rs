//! Cycle detection scenarios against real file trees

use std::fs;
use std::path::{Path, PathBuf};
use tangle::models::config::Settings;
use tangle::models::cycle::SuggestionType;
use tangle::{AnalysisResult, Analyzer};
use tempfile::TempDir;

fn analyze(root: &Path) -> AnalysisResult {
    let settings = Settings {
        root: root.to_path_buf(),
        ..Settings::default()
    };
    Analyzer::new(settings)
        .with_private_cache()
        .analyze()
        .unwrap()
}

fn canonical(dir: &TempDir) -> PathBuf {
    fs::canonicalize(dir.path()).unwrap()
}

#[test]
fn two_file_cycle() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.ts"), "import './b';\n").unwrap();
    fs::write(dir.path().join("b.ts"), "import './a';\n").unwrap();
    let root = canonical(&dir);

    let result = analyze(dir.path());
    assert_eq!(result.cycles.len(), 1);

    let report = &result.cycles[0];
    assert_eq!(report.cycle.length, 2);
    assert_eq!(report.cycle.chain.first(), report.cycle.chain.last());

    // Either rotation of the same cycle is acceptable
    let a = root.join("a.ts");
    let b = root.join("b.ts");
    let chain = &report.cycle.chain;
    assert!(
        *chain == vec![a.clone(), b.clone(), a.clone()]
            || *chain == vec![b.clone(), a.clone(), b.clone()],
        "unexpected chain: {:?}",
        chain
    );

    let kinds: Vec<SuggestionType> = report.suggestions.iter().map(|s| s.kind).collect();
    assert!(kinds.contains(&SuggestionType::ExtractInterface));
    assert!(kinds.contains(&SuggestionType::MergeFiles));
}

#[test]
fn three_file_cycle() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.ts"), "import './b';\n").unwrap();
    fs::write(dir.path().join("b.ts"), "import './c';\n").unwrap();
    fs::write(dir.path().join("c.ts"), "import './a';\n").unwrap();

    let result = analyze(dir.path());
    assert_eq!(result.cycles.len(), 1);

    let report = &result.cycles[0];
    assert_eq!(report.cycle.length, 3);

    let extract = report
        .suggestions
        .iter()
        .find(|s| s.kind == SuggestionType::ExtractInterface)
        .expect("extract-interface suggestion");
    assert!(extract.target_edge.is_some());

    assert!(report
        .suggestions
        .iter()
        .any(|s| s.kind == SuggestionType::DependencyInjection));
}

#[test]
fn self_loop() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.ts"), "import './a';\n").unwrap();
    let root = canonical(&dir);

    let result = analyze(dir.path());
    assert_eq!(result.cycles.len(), 1);

    let report = &result.cycles[0];
    let a = root.join("a.ts");
    assert_eq!(report.cycle.chain, vec![a.clone(), a.clone()]);
    assert_eq!(report.cycle.length, 1);

    assert_eq!(report.suggestions.len(), 1);
    assert_eq!(report.suggestions[0].kind, SuggestionType::ReorderImports);
    assert_eq!(report.suggestions[0].target_edge, Some((a.clone(), a)));
}

#[test]
fn diamond_without_cycle() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.ts"), "import './b';\nimport './c';\n").unwrap();
    fs::write(dir.path().join("b.ts"), "import './d';\n").unwrap();
    fs::write(dir.path().join("c.ts"), "import './d';\n").unwrap();
    fs::write(dir.path().join("d.ts"), "export {};\n").unwrap();
    let root = canonical(&dir);

    let result = analyze(dir.path());
    assert!(result.cycles.is_empty());
    assert_eq!(result.stats.total_dependencies, 4);
    assert_eq!(
        result.graph.top_k_by_incoming(1),
        vec![(root.join("d.ts"), 2)]
    );
}

#[test]
fn self_loop_and_two_cycle_both_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("u.ts"), "import './v';\nimport './u';\n").unwrap();
    fs::write(dir.path().join("v.ts"), "import './u';\n").unwrap();
    let root = canonical(&dir);

    let result = analyze(dir.path());
    assert_eq!(result.cycles.len(), 2);

    let u = root.join("u.ts");
    assert!(result
        .cycles
        .iter()
        .any(|report| report.cycle.length == 2));
    assert!(result
        .cycles
        .iter()
        .any(|report| report.cycle.chain == vec![u.clone(), u.clone()]));
}

#[test]
fn cycles_length_four_include_architecture_note() {
    let dir = TempDir::new().unwrap();
    let names = ["a", "b", "c", "d"];
    for (i, name) in names.iter().enumerate() {
        let next = names[(i + 1) % names.len()];
        fs::write(
            dir.path().join(format!("{}.ts", name)),
            format!("import './{}';\n", next),
        )
        .unwrap();
    }

    let result = analyze(dir.path());
    assert_eq!(result.cycles.len(), 1);
    assert_eq!(result.cycles[0].cycle.length, 4);
    assert!(result.cycles[0]
        .suggestions
        .iter()
        .any(|s| s.kind == SuggestionType::ReorderImports));
    assert!(result.cycles[0]
        .suggestions
        .iter()
        .any(|s| s.kind == SuggestionType::LazyImport));
}

#[test]
fn elementary_cycle_enumeration_finds_overlapping_cycles() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.ts"), "import './b';\n").unwrap();
    fs::write(dir.path().join("b.ts"), "import './a';\nimport './c';\n").unwrap();
    fs::write(dir.path().join("c.ts"), "import './a';\n").unwrap();

    let settings = Settings {
        root: dir.path().to_path_buf(),
        elementary_cycles: true,
        max_cycles: 100,
        ..Settings::default()
    };
    let result = Analyzer::new(settings)
        .with_private_cache()
        .analyze()
        .unwrap();

    // a<->b and a->b->c->a are distinct elementary cycles
    assert_eq!(result.cycles.len(), 2);
    let lengths: Vec<usize> = result.cycles.iter().map(|r| r.cycle.length).collect();
    assert!(lengths.contains(&2));
    assert!(lengths.contains(&3));
}

#[test]
fn cycle_chains_walk_real_edges() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.ts"), "import './b';\nimport './c';\n").unwrap();
    fs::write(dir.path().join("b.ts"), "import './c';\n").unwrap();
    fs::write(dir.path().join("c.ts"), "import './a';\n").unwrap();

    let result = analyze(dir.path());
    for report in &result.cycles {
        for window in report.cycle.chain.windows(2) {
            assert!(
                result.graph.has_edge(&window[0], &window[1]),
                "{:?} -> {:?} missing from graph",
                window[0],
                window[1]
            );
        }
    }
}
