//! Configuration layer tests

use crate::config::{
    parse_config_content, parse_config_file, ConfigBuilder, ConfigSource, FileConfig,
    SettingsValidator,
};
use crate::models::config::{OutputFormat, PartialSettings, Settings};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn parse_config_file_reads_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("tangle.toml");

    let config_content = r#"
        root = "/test/path"
        ignore_patterns = ["node_modules", "*.test.ts"]
        concurrency = 8
        output_format = "json"
        cache_enabled = false

        [aliases]
        "@/*" = ["src/*"]
    "#;

    fs::write(&config_path, config_content).unwrap();

    let settings = parse_config_file(&config_path).unwrap();

    assert_eq!(settings.root, Some(PathBuf::from("/test/path")));
    assert_eq!(settings.concurrency, Some(8));
    assert_eq!(settings.output_format, Some(OutputFormat::Json));
    assert_eq!(settings.cache_enabled, Some(false));
    let aliases = settings.aliases.unwrap();
    assert_eq!(aliases.get("@/*"), Some(&vec!["src/*".to_string()]));
}

#[test]
fn parse_config_content_rejects_bad_globs() {
    let result = parse_config_content(
        r#"ignore_patterns = ["[invalid"]"#,
        "virtual.toml",
    );
    assert!(result.is_err());
}

#[test]
fn parse_config_content_rejects_zero_concurrency() {
    let result = parse_config_content("concurrency = 0", "virtual.toml");
    assert!(result.is_err());
}

#[test]
fn missing_config_file_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let result = parse_config_file(temp_dir.path().join("nope.toml"));
    assert!(result.is_err());
}

#[test]
fn builder_merges_in_priority_order() {
    let file_layer = PartialSettings {
        concurrency: Some(4),
        quiet: Some(true),
        ..Default::default()
    };
    let cli_layer = PartialSettings {
        concurrency: Some(16),
        ..Default::default()
    };

    let settings = ConfigBuilder::new()
        .merge(file_layer)
        .merge(cli_layer)
        .build()
        .unwrap();

    assert_eq!(settings.concurrency, 16);
    assert!(settings.quiet);
}

#[test]
fn file_config_source_availability() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("conf.toml");

    let source = FileConfig::with_path(path.clone());
    assert!(!source.is_available());

    fs::write(&path, "concurrency = 2").unwrap();
    assert!(source.is_available());
    assert_eq!(source.load().unwrap().concurrency, Some(2));
}

#[test]
fn create_default_config_round_trips() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("default.toml");

    crate::config::create_default_config(&config_path).unwrap();
    assert!(config_path.exists());

    // The template is fully commented out, so parsing yields no overrides
    let settings = parse_config_file(&config_path).unwrap();
    assert!(settings.root.is_none());
    assert!(settings.concurrency.is_none());
}

#[test]
fn validator_accepts_defaults() {
    assert!(SettingsValidator::validate(&Settings::default()).is_ok());
}

#[test]
fn validator_rejects_bad_settings() {
    let mut settings = Settings::default();
    settings.concurrency = 0;
    assert!(SettingsValidator::validate(&settings).is_err());

    let mut settings = Settings::default();
    settings.extensions = vec!["py".to_string()];
    assert!(SettingsValidator::validate(&settings).is_err());

    let mut settings = Settings::default();
    settings.top_n = 0;
    assert!(SettingsValidator::validate(&settings).is_err());

    let mut settings = Settings::default();
    settings.aliases.insert("@/*".to_string(), Vec::new());
    assert!(SettingsValidator::validate(&settings).is_err());
}
