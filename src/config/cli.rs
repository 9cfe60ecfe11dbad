//! Command-line configuration source

use crate::config::ConfigSource;
use crate::error::Result;
use crate::models::config::PartialSettings;

/// Configuration carried by parsed command-line flags
///
/// The flags themselves are translated into a `PartialSettings` by the CLI
/// layer; this wrapper slots them into the source chain at the highest
/// priority.
pub struct CliConfig {
    partial: PartialSettings,
}

impl CliConfig {
    /// Wrap a partial settings value produced from parsed flags
    pub fn new(partial: PartialSettings) -> Self {
        Self { partial }
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        Ok(self.partial.clone())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "command line"
    }
}
