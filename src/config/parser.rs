//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TangleError};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TangleError::ConfigMissing {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| TangleError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings =
        toml::from_str(content).map_err(|e| TangleError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(
    settings: &PartialSettings,
    path: P,
) -> Result<()> {
    let path = path.as_ref();

    if let Some(root) = &settings.root {
        if root.as_os_str().is_empty() {
            return Err(TangleError::config(format!(
                "{} sets an empty root",
                path.display()
            )));
        }
    }

    if let Some(patterns) = &settings.ignore_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(TangleError::config(format!(
                    "{} contains an empty ignore pattern",
                    path.display()
                )));
            }
            if pattern.contains('*') || pattern.contains('?') {
                glob::Pattern::new(pattern).map_err(|e| {
                    TangleError::config(format!(
                        "{} has an unusable ignore pattern '{}': {}",
                        path.display(),
                        pattern,
                        e
                    ))
                })?;
            }
        }
    }

    if let Some(concurrency) = settings.concurrency {
        if concurrency == 0 {
            return Err(TangleError::config(format!(
                "{} sets concurrency to 0; at least one file must be in flight",
                path.display()
            )));
        }
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(TangleError::config(format!(
                "{} sets an empty output_file",
                path.display()
            )));
        }
    }

    Ok(())
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    // Check current directory first
    let current_dir_config = PathBuf::from(".tangle.toml");
    if current_dir_config.exists() {
        return Ok(Some(parse_config_file(current_dir_config)?));
    }

    // Check user home directory next
    if let Some(home_dir) = dirs::home_dir() {
        let home_config = home_dir.join(".tangle.toml");
        if home_config.exists() {
            return Ok(Some(parse_config_file(home_config)?));
        }
    }

    // Check XDG config directory if available
    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("tangle").join("config.toml");
        if xdg_config.exists() {
            return Ok(Some(parse_config_file(xdg_config)?));
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let default_config = include_str!("default_config.toml");

    fs::write(path, default_config)?;

    Ok(())
}
