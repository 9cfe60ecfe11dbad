//! File and environment configuration sources

use crate::config::{parser, ConfigSource};
use crate::error::{Result, TangleError};
use crate::models::config::{OutputFormat, PartialSettings};
use std::path::PathBuf;

/// Configuration loaded from a TOML file
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    /// Create a file source for a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The configured path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.exists()
    }

    fn name(&self) -> &str {
        "config file"
    }
}

/// Configuration loaded from prefixed environment variables
///
/// Recognized keys (for prefix `TANGLE`): `TANGLE_ROOT`, `TANGLE_BASE_URL`,
/// `TANGLE_CONCURRENCY`, `TANGLE_CACHE`, `TANGLE_OUTPUT`,
/// `TANGLE_FOLLOW_SYMLINKS`, `TANGLE_QUIET`, `TANGLE_VERBOSE`,
/// `TANGLE_MAX_CYCLES`, `TANGLE_TOP_N`.
pub struct EnvConfig {
    prefix: String,
}

impl EnvConfig {
    /// Create an environment source with the given variable prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key)).ok()
    }

    fn bool_var(&self, key: &str) -> Result<Option<bool>> {
        match self.var(key) {
            None => Ok(None),
            Some(raw) => match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(Some(true)),
                "0" | "false" | "no" | "off" => Ok(Some(false)),
                _ => Err(TangleError::config(format!(
                    "Invalid boolean '{}' for {}_{}",
                    raw, self.prefix, key
                ))),
            },
        }
    }

    fn usize_var(&self, key: &str) -> Result<Option<usize>> {
        match self.var(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<usize>().map(Some).map_err(|_| {
                TangleError::config(format!(
                    "Invalid number '{}' for {}_{}",
                    raw, self.prefix, key
                ))
            }),
        }
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut partial = PartialSettings::default();

        partial.root = self.var("ROOT").map(PathBuf::from);
        partial.base_url = self.var("BASE_URL").map(PathBuf::from);
        partial.concurrency = self.usize_var("CONCURRENCY")?;
        partial.cache_enabled = self.bool_var("CACHE")?;
        partial.follow_symlinks = self.bool_var("FOLLOW_SYMLINKS")?;
        partial.quiet = self.bool_var("QUIET")?;
        partial.verbose = self.bool_var("VERBOSE")?;
        partial.max_cycles = self.usize_var("MAX_CYCLES")?;
        partial.top_n = self.usize_var("TOP_N")?;

        if let Some(raw) = self.var("OUTPUT") {
            let format = raw
                .parse::<OutputFormat>()
                .map_err(TangleError::config)?;
            partial.output_format = Some(format);
        }

        Ok(partial)
    }

    fn is_available(&self) -> bool {
        std::env::vars().any(|(key, _)| key.starts_with(&format!("{}_", self.prefix)))
    }

    fn name(&self) -> &str {
        "environment"
    }
}
