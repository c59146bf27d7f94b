//! Error types for loading commented, include-bearing JSON.
//!
//! ## Error Categories
//!
//! - **Decode Errors**: the stripped text is not valid JSON — surfaced
//!   directly from `serde_json`, untouched
//! - **Include Errors**: an include directive names a file that cannot be
//!   read, is not object-rooted, or participates in a cycle
//! - **Merge Errors**: precedence restoration hit incompatible container
//!   kinds at the same tree position
//!
//! Every error is fatal to the load that produced it; no partial document
//! is ever returned.
//!
//! ## Examples
//!
//! ```rust
//! use jsonc_include::{from_str, Error, Value};
//!
//! let result: Result<Value, Error> = from_str("{\"a\": [1, 2");
//! assert!(result.is_err());
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents all possible errors that can occur while loading or writing
/// a document.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying JSON decoder or encoder rejected the text. Reported
    /// verbatim; this crate adds nothing to the message.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// An included file could not be read.
    #[error("cannot read included file `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading text from a caller-supplied source failed before any
    /// decoding began.
    #[error("cannot read source text")]
    Read(#[from] std::io::Error),

    /// A file pulled in through an include directive must be object-rooted;
    /// arrays and scalars cannot be merged into the including object.
    #[error("included file `{}` must contain a top-level object", path.display())]
    IncludedNotObject { path: PathBuf },

    /// The value of an include directive was not a string path.
    #[error("include directive `{key}` expects a string path")]
    DirectivePath { key: String },

    /// Precedence restoration found two different container kinds at the
    /// same position.
    #[error("cannot merge {found} into {expected}")]
    MergeConflict {
        expected: &'static str,
        found: &'static str,
    },

    /// An include chain reached a file that is already being loaded.
    #[error("circular include: {chain}")]
    CircularInclude { chain: String },
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn included_not_object(path: &Path) -> Self {
        Error::IncludedNotObject {
            path: path.to_path_buf(),
        }
    }

    pub(crate) fn directive_path(key: &str) -> Self {
        Error::DirectivePath {
            key: key.to_string(),
        }
    }

    pub(crate) fn merge_conflict(expected: &'static str, found: &'static str) -> Self {
        Error::MergeConflict { expected, found }
    }

    /// Builds the cycle error from the in-flight include stack plus the
    /// path that closed the loop.
    pub(crate) fn circular<'a, I>(in_flight: I, repeated: &Path) -> Self
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        let mut chain: Vec<String> = in_flight
            .into_iter()
            .map(|p| p.display().to_string())
            .collect();
        chain.push(repeated.display().to_string());
        Error::CircularInclude {
            chain: chain.join(" -> "),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
