//! Performance bounds on synthetic trees

use std::fs;
use std::time::Instant;
use tangle::models::config::Settings;
use tangle::Analyzer;
use tempfile::TempDir;

#[test]
fn hundred_file_ring_detects_quickly() {
    let dir = TempDir::new().unwrap();
    for i in 0..=100 {
        let next = (i + 1) % 101;
        fs::write(
            dir.path().join(format!("file{}.ts", i)),
            format!("import './file{}';\n", next),
        )
        .unwrap();
    }

    let settings = Settings {
        root: dir.path().to_path_buf(),
        ..Settings::default()
    };

    let start = Instant::now();
    let result = Analyzer::new(settings)
        .with_private_cache()
        .analyze()
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(result.stats.total_files, 101);
    assert_eq!(result.cycles.len(), 1);
    assert_eq!(result.cycles[0].cycle.length, 101);
    assert!(
        elapsed.as_secs() < 1,
        "ring detection took {:?}, expected well under a second",
        elapsed
    );
}

#[test]
fn wide_fanout_tree_analyzes_quickly() {
    let dir = TempDir::new().unwrap();
    let mut hub = String::new();
    for i in 0..200 {
        fs::write(dir.path().join(format!("leaf{}.ts", i)), "export {};\n").unwrap();
        hub.push_str(&format!("import './leaf{}';\n", i));
    }
    fs::write(dir.path().join("hub.ts"), hub).unwrap();

    let settings = Settings {
        root: dir.path().to_path_buf(),
        ..Settings::default()
    };

    let start = Instant::now();
    let result = Analyzer::new(settings)
        .with_private_cache()
        .analyze()
        .unwrap();

    assert_eq!(result.stats.total_files, 201);
    assert_eq!(result.stats.total_dependencies, 200);
    assert!(result.cycles.is_empty());
    assert!(start.elapsed().as_secs() < 5);
}
