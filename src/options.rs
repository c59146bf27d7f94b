//! Configuration options for loading documents.
//!
//! This module provides [`LoadOptions`], which controls how include
//! directives are recognized and resolved:
//!
//! - the directive key prefix (default [`DEFAULT_INCLUDE_KEY`])
//! - the base directory against which in-memory sources resolve paths
//! - whether directive keys are removed from the returned document
//! - whether the including file's own values keep precedence
//!
//! ## Examples
//!
//! ```rust
//! use jsonc_include::LoadOptions;
//!
//! // Defaults: `_include_json` prefix, paths relative to ".", directive
//! // keys retained, top-file values win.
//! let options = LoadOptions::new();
//!
//! // Custom configuration
//! let options = LoadOptions::new()
//!     .with_include_key("$import")
//!     .with_base_dir("config/")
//!     .with_remove_include_keys(true);
//! ```

use std::path::{Path, PathBuf};

/// The default key prefix marking an include directive.
///
/// Any object key starting with this prefix is treated as a directive, so
/// several includes can coexist in one object by suffixing the prefix
/// (`_include_json1`, `_include_json2`, ...).
pub const DEFAULT_INCLUDE_KEY: &str = "_include_json";

/// Configuration for loading commented, include-bearing JSON.
///
/// The include key is an explicit per-load value rather than a process-wide
/// constant, so resolvers with different markers can coexist.
///
/// # Examples
///
/// ```rust
/// use jsonc_include::{LoadOptions, DEFAULT_INCLUDE_KEY};
///
/// let options = LoadOptions::new();
/// assert_eq!(options.include_key(), DEFAULT_INCLUDE_KEY);
/// assert!(!options.remove_include_keys());
/// ```
#[derive(Clone, Debug)]
pub struct LoadOptions {
    include_key: String,
    base_dir: PathBuf,
    remove_include_keys: bool,
    keep_top_values: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            include_key: DEFAULT_INCLUDE_KEY.to_string(),
            base_dir: PathBuf::from("."),
            remove_include_keys: false,
            keep_top_values: true,
        }
    }
}

impl LoadOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key prefix that marks include directives.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonc_include::LoadOptions;
    ///
    /// let options = LoadOptions::new().with_include_key("$import");
    /// assert_eq!(options.include_key(), "$import");
    /// ```
    #[must_use]
    pub fn with_include_key(mut self, key: impl Into<String>) -> Self {
        self.include_key = key.into();
        self
    }

    /// Sets the directory against which directive paths in in-memory
    /// sources are resolved.
    ///
    /// Files loaded from disk ignore this and resolve their directives
    /// relative to their own location.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Sets whether directive keys are stripped from the returned document.
    ///
    /// Default is `false`, which leaves the directive entries (and their
    /// path values) in place after their targets have been merged in.
    #[must_use]
    pub fn with_remove_include_keys(mut self, remove: bool) -> Self {
        self.remove_include_keys = remove;
        self
    }

    /// Sets whether the including file's own values take precedence over
    /// values pulled in through its directives.
    ///
    /// Default is `true`: anything written literally in a file wins, and
    /// included files only fill the gaps. With `false`, included files
    /// overwrite on collision instead.
    #[must_use]
    pub fn with_keep_top_values(mut self, keep: bool) -> Self {
        self.keep_top_values = keep;
        self
    }

    /// The configured directive key prefix.
    #[must_use]
    pub fn include_key(&self) -> &str {
        &self.include_key
    }

    /// The configured base directory for in-memory sources.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Whether directive keys are removed from results.
    #[must_use]
    pub fn remove_include_keys(&self) -> bool {
        self.remove_include_keys
    }

    /// Whether top-file values keep precedence.
    #[must_use]
    pub fn keep_top_values(&self) -> bool {
        self.keep_top_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::new();
        assert_eq!(options.include_key(), DEFAULT_INCLUDE_KEY);
        assert_eq!(options.base_dir(), Path::new("."));
        assert!(!options.remove_include_keys());
        assert!(options.keep_top_values());
    }

    #[test]
    fn test_builder_chain() {
        let options = LoadOptions::new()
            .with_include_key("$ref")
            .with_base_dir("/etc/app")
            .with_remove_include_keys(true)
            .with_keep_top_values(false);

        assert_eq!(options.include_key(), "$ref");
        assert_eq!(options.base_dir(), Path::new("/etc/app"));
        assert!(options.remove_include_keys());
        assert!(!options.keep_top_values());
    }
}
