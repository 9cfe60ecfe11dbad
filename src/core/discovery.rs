//! File discovery
//!
//! Walks the root directory, filters by extension, applies ignore rules,
//! and produces a deterministic sorted list of absolute file paths.
//! Subdirectories are traversed in parallel; unreadable directories are
//! silently skipped.

use crate::error::Result;
use crate::models::config::Settings;
use crate::models::record::Language;
use glob::Pattern;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Ignore pattern matcher
///
/// Patterns containing `*` or `?` are compiled as globs with the default
/// options, under which both wildcards may cross path separators. A pattern
/// with neither wildcard matches as a substring of the full path or as the
/// exact basename. Every pattern is tried against the full path and against
/// the basename.
pub struct IgnoreMatcher {
    literals: Vec<String>,
    globs: Vec<Pattern>,
}

impl IgnoreMatcher {
    /// Compile a pattern list, failing on malformed globs
    pub fn compile(patterns: &[String]) -> Result<Self> {
        let mut literals = Vec::new();
        let mut globs = Vec::new();

        for pattern in patterns {
            if pattern.contains('*') || pattern.contains('?') {
                globs.push(Pattern::new(pattern)?);
            } else {
                literals.push(pattern.clone());
            }
        }

        Ok(Self { literals, globs })
    }

    /// Whether a path is excluded by any pattern
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        let basename = path.file_name().map(|name| name.to_string_lossy());

        for literal in &self.literals {
            if path_str.contains(literal.as_str()) {
                return true;
            }
            if let Some(name) = &basename {
                if name.as_ref() == literal.as_str() {
                    return true;
                }
            }
        }

        for pattern in &self.globs {
            if pattern.matches(&path_str) {
                return true;
            }
            if let Some(name) = &basename {
                if pattern.matches(name.as_ref()) {
                    return true;
                }
            }
        }

        false
    }
}

/// Directory walker producing the analyzable file set
pub struct FileDiscovery {
    extensions: Vec<String>,
    ignore_dirs: HashSet<String>,
    matcher: IgnoreMatcher,
    follow_symlinks: bool,
}

impl FileDiscovery {
    /// Build a discovery pass from analyzer settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            extensions: settings
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            ignore_dirs: settings.ignore_dirs.iter().cloned().collect(),
            matcher: IgnoreMatcher::compile(&settings.ignore_patterns)?,
            follow_symlinks: settings.follow_symlinks,
        })
    }

    /// Discover all analyzable files under `root`, sorted
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = self.walk(root);
        files.sort();
        files
    }

    fn walk(&self, dir: &Path) -> Vec<PathBuf> {
        // Unreadable directories are not an error
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        for entry in entries.flatten() {
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(_) => continue,
            };

            if file_type.is_symlink() && !self.follow_symlinks {
                continue;
            }

            if path.is_dir() {
                if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                    if self.ignore_dirs.contains(name) {
                        continue;
                    }
                }
                if self.matcher.matches(&path) {
                    continue;
                }
                subdirs.push(path);
            } else if path.is_file() && self.admits(&path) {
                files.push(path);
            }
        }

        // Each subdirectory traversal is independent
        let nested: Vec<Vec<PathBuf>> = subdirs.par_iter().map(|sub| self.walk(sub)).collect();
        for mut sub_files in nested {
            files.append(&mut sub_files);
        }

        files
    }

    fn admits(&self, path: &Path) -> bool {
        let ext = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => return false,
        };
        if !self.extensions.contains(&ext) {
            return false;
        }
        if !Language::supports_extension(&ext) {
            return false;
        }
        !self.matcher.matches(path)
    }
}
