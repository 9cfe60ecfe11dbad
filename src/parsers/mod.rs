//! Source parsing and import extraction

pub mod ast_parser;
pub mod import_extractor;

pub use ast_parser::{AllocatorPool, SourceParser};
pub use import_extractor::extract_imports;
