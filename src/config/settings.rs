//! Settings validation

use crate::error::{Result, TangleError};
use crate::models::config::Settings;
use crate::models::record::Language;

/// Validates assembled settings before a run starts
pub struct SettingsValidator;

impl SettingsValidator {
    /// Check a settings value for inconsistencies
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.root.as_os_str().is_empty() {
            return Err(TangleError::config("root must not be empty"));
        }

        if settings.concurrency == 0 {
            return Err(TangleError::config(
                "concurrency must be at least 1",
            ));
        }

        if settings.extensions.is_empty() {
            return Err(TangleError::config(
                "at least one file extension is required",
            ));
        }
        for ext in &settings.extensions {
            if !Language::supports_extension(&ext.to_lowercase()) {
                return Err(TangleError::config(format!(
                    "unsupported extension '{}': only the JavaScript/TypeScript matrix is analyzable",
                    ext
                )));
            }
        }

        if settings.elementary_cycles && settings.max_cycles == 0 {
            return Err(TangleError::config(
                "max_cycles must be at least 1 when elementary cycle enumeration is on",
            ));
        }

        if settings.top_n == 0 {
            return Err(TangleError::config("top_n must be at least 1"));
        }

        for pattern in &settings.ignore_patterns {
            if pattern.is_empty() {
                return Err(TangleError::config("ignore patterns must not be empty"));
            }
        }

        for (pattern, replacements) in &settings.aliases {
            if pattern.is_empty() || replacements.is_empty() {
                return Err(TangleError::config(format!(
                    "alias '{}' needs a pattern and at least one replacement",
                    pattern
                )));
            }
        }

        Ok(())
    }
}
