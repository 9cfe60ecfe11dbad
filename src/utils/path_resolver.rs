//! Module specifier resolution
//!
//! Maps a specifier string plus context (importing file, alias table, base
//! URL, root) onto an absolute path inside the analyzed tree, or nothing for
//! external and unresolvable references.

use crate::models::config::Settings;
use crate::utils::paths::normalize_path;
use dashmap::DashMap;
use lru::LruCache;
use parking_lot::Mutex;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

const RESOLUTION_CACHE_SIZE: usize = 4096;

/// Path resolver with alias support and probe caching
///
/// Stateless apart from file-existence probes; given the same file system
/// and inputs it always returns the same result.
pub struct PathResolver {
    root: PathBuf,
    base_url: Option<PathBuf>,
    /// Alias patterns sorted by pattern string so multi-pattern tables
    /// resolve the same way on every run
    aliases: Vec<(String, Vec<String>)>,
    /// Probe extensions in declared order
    extensions: Vec<String>,
    file_exists_cache: DashMap<PathBuf, bool>,
    resolution_cache: Mutex<LruCache<(PathBuf, String), Option<PathBuf>>>,
}

impl PathResolver {
    /// Create a new resolver
    pub fn new(
        root: impl Into<PathBuf>,
        base_url: Option<PathBuf>,
        aliases: impl IntoIterator<Item = (String, Vec<String>)>,
        extensions: Vec<String>,
    ) -> Self {
        let mut aliases: Vec<(String, Vec<String>)> = aliases.into_iter().collect();
        aliases.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            root: root.into(),
            base_url,
            aliases,
            extensions,
            file_exists_cache: DashMap::new(),
            resolution_cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(RESOLUTION_CACHE_SIZE).unwrap(),
            )),
        }
    }

    /// Build a resolver from analyzer settings, rooted at `root`
    ///
    /// A relative `base_url` is interpreted against the root, tsconfig-style.
    pub fn from_settings(root: &Path, settings: &Settings) -> Self {
        let base_url = settings.base_url.as_ref().map(|base| {
            if base.is_absolute() {
                base.clone()
            } else {
                normalize_path(&root.join(base))
            }
        });
        Self::new(
            root,
            base_url,
            settings.aliases.clone(),
            settings.extensions.clone(),
        )
    }

    /// Resolve a module specifier to an absolute path in the tree
    ///
    /// Returns `None` for external packages, unresolvable specifiers, and
    /// anything outside the analyzed tree's file set.
    pub fn resolve(&self, specifier: &str, from: &Path) -> Option<PathBuf> {
        if specifier.is_empty() {
            return None;
        }

        let key = (from.to_path_buf(), specifier.to_string());
        {
            let mut cache = self.resolution_cache.lock();
            if let Some(cached) = cache.get(&key) {
                return cached.clone();
            }
        }

        let resolved = self.resolve_uncached(specifier, from);
        self.resolution_cache.lock().put(key, resolved.clone());
        resolved
    }

    fn resolve_uncached(&self, specifier: &str, from: &Path) -> Option<PathBuf> {
        // Aliases are consulted before everything else; a pattern like `@/`
        // would otherwise be mistaken for a scoped external package.
        if let Some(resolved) = self.resolve_alias(specifier) {
            return Some(resolved);
        }

        if specifier.starts_with('.') {
            let base = from.parent().unwrap_or(from);
            return self.probe(&normalize_path(&base.join(specifier)));
        }

        if Path::new(specifier).is_absolute() {
            return self.probe(&normalize_path(Path::new(specifier)));
        }

        // Scoped packages are external once aliases had their chance
        if specifier.starts_with('@') && specifier.contains('/') {
            return None;
        }

        // Bare word: only a base-URL (or root) probe can still rescue it
        let base = self.base_url.as_deref().unwrap_or(&self.root);
        self.probe(&normalize_path(&base.join(specifier)))
    }

    /// Try the alias table; the first replacement that probes wins
    fn resolve_alias(&self, specifier: &str) -> Option<PathBuf> {
        let base = self.base_url.as_deref().unwrap_or(&self.root);

        for (pattern, replacements) in &self.aliases {
            if let Some(prefix) = pattern.strip_suffix("/*") {
                // Wildcard pattern: substitute the tail into each replacement
                let tail = match specifier
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.strip_prefix('/'))
                {
                    Some(tail) => tail,
                    None => continue,
                };
                for replacement in replacements {
                    let substituted = match replacement.strip_suffix("/*") {
                        Some(replacement_prefix) => format!("{}/{}", replacement_prefix, tail),
                        None => format!("{}/{}", replacement.trim_end_matches('/'), tail),
                    };
                    if let Some(resolved) = self.probe(&normalize_path(&base.join(substituted))) {
                        return Some(resolved);
                    }
                }
            } else {
                // Exact match, or prefix with the remainder carried over
                let remainder = if specifier == pattern {
                    Some("")
                } else {
                    specifier
                        .strip_prefix(pattern.as_str())
                        .and_then(|rest| rest.strip_prefix('/'))
                };
                let remainder = match remainder {
                    Some(remainder) => remainder,
                    None => continue,
                };
                for replacement in replacements {
                    let substituted = if remainder.is_empty() {
                        replacement.clone()
                    } else {
                        format!("{}/{}", replacement.trim_end_matches('/'), remainder)
                    };
                    if let Some(resolved) = self.probe(&normalize_path(&base.join(substituted))) {
                        return Some(resolved);
                    }
                }
            }
        }

        None
    }

    /// File-existence probe ladder for one candidate path
    fn probe(&self, candidate: &Path) -> Option<PathBuf> {
        if self.is_file(candidate) {
            return Some(candidate.to_path_buf());
        }

        let raw = candidate.to_string_lossy().into_owned();

        for ext in &self.extensions {
            let with_ext = PathBuf::from(format!("{}.{}", raw, ext));
            if self.is_file(&with_ext) {
                return Some(with_ext);
            }
        }

        for ext in &self.extensions {
            let index = candidate.join(format!("index.{}", ext));
            if self.is_file(&index) {
                return Some(index);
            }
        }

        // Compiled-extension remap: sources often name the emitted `.js`
        // file while only the `.ts`/`.tsx` original exists on disk.
        if let Some(stem) = raw.strip_suffix(".js") {
            for ext in ["ts", "tsx"] {
                let remapped = PathBuf::from(format!("{}.{}", stem, ext));
                if self.is_file(&remapped) {
                    return Some(remapped);
                }
            }
        }

        None
    }

    /// Check if a path names a regular file, with caching
    fn is_file(&self, path: &Path) -> bool {
        if let Some(cached) = self.file_exists_cache.get(path) {
            return *cached;
        }

        let exists = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
        self.file_exists_cache.insert(path.to_path_buf(), exists);
        exists
    }
}
