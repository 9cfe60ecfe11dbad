//! Import records and language selection

use crate::error::{Result, TangleError};
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The module-system dialect an import was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// Static ES module import: `import x from './m'`
    StaticEsm,
    /// Dynamic import expression: `import('./m')`
    DynamicEsm,
    /// CommonJS require call: `require('./m')`
    CommonjsRequire,
    /// Re-export form: `export { x } from './m'` / `export * from './m'`
    Reexport,
}

/// One outbound module reference extracted from a file
///
/// `source` is the specifier exactly as written, unquoted, and is never
/// empty: candidates with an empty or non-string-literal specifier are
/// dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// The module specifier string as it appeared in the source
    pub source: String,
    /// Which import construct produced this record
    pub kind: ImportKind,
    /// Locally-introduced binding names (`foo`, `* as utils`, `*`, ...)
    pub specifiers: Vec<String>,
    /// 1-indexed line of the containing statement
    pub line: usize,
}

/// Language selector for the extractor, one grammar each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// `.ts`, `.mts`, `.cts`
    TypeScript,
    /// `.tsx`
    Tsx,
    /// `.js`, `.mjs`, `.cjs`
    JavaScript,
    /// `.jsx`
    Jsx,
}

impl Language {
    /// Map a lowercased file extension onto a language selector
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext {
            "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "tsx" => Some(Language::Tsx),
            "js" | "mjs" | "cjs" => Some(Language::JavaScript),
            "jsx" => Some(Language::Jsx),
            _ => None,
        }
    }

    /// Derive the language for a path, failing for anything outside the matrix
    pub fn from_path(path: &Path) -> Result<Language> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| Language::from_extension(&ext))
            .ok_or_else(|| TangleError::unsupported(path))
    }

    /// Whether an extension (lowercased, without the dot) is analyzable at all
    pub fn supports_extension(ext: &str) -> bool {
        Language::from_extension(ext).is_some()
    }

    /// The OXC source type matching this language selector
    pub fn source_type(self) -> SourceType {
        match self {
            Language::TypeScript => SourceType::ts(),
            Language::Tsx => SourceType::tsx(),
            Language::JavaScript => SourceType::mjs(),
            Language::Jsx => SourceType::jsx(),
        }
    }
}
