//! Resolver behavior across the analyzer boundary

use std::collections::HashMap;
use std::fs;
use tangle::utils::path_resolver::PathResolver;
use tempfile::TempDir;

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn scoped_specifier_without_alias_is_external() {
    let dir = TempDir::new().unwrap();
    let resolver = PathResolver::new(dir.path(), None, HashMap::new(), default_extensions());

    assert_eq!(
        resolver.resolve("@org/anything", &dir.path().join("a.ts")),
        None
    );
}

#[test]
fn relative_sibling_resolves_to_absolute_path() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/x.ts"), "export {};").unwrap();

    let resolver = PathResolver::new(dir.path(), None, HashMap::new(), default_extensions());
    let resolved = resolver
        .resolve("./x", &dir.path().join("src/from.ts"))
        .unwrap();

    assert!(resolved.is_absolute());
    assert_eq!(resolved, dir.path().join("src/x.ts"));
}

#[test]
fn tsconfig_style_paths_with_base_url() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src/components")).unwrap();
    fs::write(dir.path().join("src/a.ts"), "export {};").unwrap();
    fs::write(dir.path().join("src/components/button.tsx"), "export {};").unwrap();

    let mut aliases = HashMap::new();
    aliases.insert("@/*".to_string(), vec!["src/*".to_string()]);
    let resolver = PathResolver::new(
        dir.path(),
        Some(dir.path().to_path_buf()),
        aliases,
        default_extensions(),
    );

    let from = dir.path().join("anywhere/deep/file.ts");
    assert_eq!(
        resolver.resolve("@/a", &from),
        Some(dir.path().join("src/a.ts"))
    );
    assert_eq!(
        resolver.resolve("@/components/button", &from),
        Some(dir.path().join("src/components/button.tsx"))
    );
    assert_eq!(resolver.resolve("@/missing", &from), None);
}

#[test]
fn alias_replacement_list_is_tried_in_order() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("vendor/lib")).unwrap();
    fs::write(dir.path().join("vendor/lib/thing.ts"), "export {};").unwrap();

    let mut aliases = HashMap::new();
    aliases.insert(
        "lib/*".to_string(),
        vec!["src/lib/*".to_string(), "vendor/lib/*".to_string()],
    );
    let resolver = PathResolver::new(dir.path(), None, aliases, default_extensions());

    // src/lib does not exist, so the second replacement wins
    assert_eq!(
        resolver.resolve("lib/thing", &dir.path().join("a.ts")),
        Some(dir.path().join("vendor/lib/thing.ts"))
    );
}

#[test]
fn parent_traversal_is_normalized() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src/sub")).unwrap();
    fs::write(dir.path().join("src/shared.ts"), "export {};").unwrap();

    let resolver = PathResolver::new(dir.path(), None, HashMap::new(), default_extensions());
    let resolved = resolver
        .resolve("../shared", &dir.path().join("src/sub/deep.ts"))
        .unwrap();

    // The result compares equal to the discovery-produced path, no ".." inside
    assert_eq!(resolved, dir.path().join("src/shared.ts"));
    assert!(!resolved
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir)));
}

#[test]
fn index_files_and_explicit_extensions() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("pkg")).unwrap();
    fs::write(dir.path().join("pkg/index.js"), "module.exports = {};").unwrap();
    fs::write(dir.path().join("exact.mjs"), "export {};").unwrap();

    let resolver = PathResolver::new(dir.path(), None, HashMap::new(), default_extensions());
    let from = dir.path().join("main.ts");

    assert_eq!(
        resolver.resolve("./pkg", &from),
        Some(dir.path().join("pkg/index.js"))
    );
    assert_eq!(
        resolver.resolve("./exact.mjs", &from),
        Some(dir.path().join("exact.mjs"))
    );
}

#[test]
fn js_specifier_prefers_real_js_over_remap() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.js"), "export {};").unwrap();
    fs::write(dir.path().join("b.ts"), "export {};").unwrap();

    let resolver = PathResolver::new(dir.path(), None, HashMap::new(), default_extensions());
    // The exact file exists, so the remap never fires
    assert_eq!(
        resolver.resolve("./b.js", &dir.path().join("a.ts")),
        Some(dir.path().join("b.js"))
    );
}

#[test]
fn jsx_remap_for_compiled_extension() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("view.tsx"), "export {};").unwrap();

    let resolver = PathResolver::new(dir.path(), None, HashMap::new(), default_extensions());
    assert_eq!(
        resolver.resolve("./view.js", &dir.path().join("a.ts")),
        Some(dir.path().join("view.tsx"))
    );
}
