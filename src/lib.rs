//! # jsonc_include
//!
//! JSON for configuration files: C/JS-style comments and recursive file
//! inclusion with deep-merge precedence, on top of [`serde_json`].
//!
//! ## What it adds to JSON
//!
//! - **Comments**: `// line` and `/* block */` comments anywhere outside
//!   string literals, plus tolerance for the trailing commas they tend to
//!   leave behind
//! - **Includes**: an object entry like `"_include_json": "base.json"`
//!   pulls another file into the object holding it, recursively, with the
//!   including file's own values always winning on conflict
//! - **Serde Compatible**: loads straight into `#[derive(Deserialize)]`
//!   types; writing delegates to `serde_json` unchanged
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! jsonc_include = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Loading commented configuration
//!
//! ```rust
//! use serde::Deserialize;
//! use jsonc_include::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let text = r#"{
//!     // where to listen
//!     "host": "127.0.0.1",
//!     "port": 8080, /* dev default */
//! }"#;
//!
//! let server: Server = from_str(text).unwrap();
//! assert_eq!(server.port, 8080);
//! ```
//!
//! ### Includes
//!
//! Given `base.json` containing `{"port": 80, "workers": 4}`, a file
//!
//! ```json
//! {
//!     "port": 8080,
//!     "_include_json": "base.json"
//! }
//! ```
//!
//! loads as `{"port": 8080, "workers": 4, "_include_json": "base.json"}`:
//! the including file keeps its own `port`, the include fills in
//! `workers`, and the directive key itself stays unless
//! [`LoadOptions::with_remove_include_keys`] asks for its removal. Several
//! directives can share an object by suffixing the key
//! (`_include_json1`, `_include_json2`, ...); on keys none of them
//! overrides locally, the later directive wins.
//!
//! Directive paths in files loaded with [`from_file`] resolve relative to
//! the including file's directory; for in-memory sources they resolve
//! against [`LoadOptions::with_base_dir`]. Include cycles are detected and
//! reported as errors.
//!
//! ## Writing
//!
//! Output is plain strict JSON via `serde_json`: comments are gone and
//! includes are already flattened into the value being written.
//!
//! ## Performance Characteristics
//!
//! - **Comment stripping**: single pass, O(n) except for a backward scan
//!   over trailing whitespace at each `]`/`}`
//! - **Include resolution**: every directive re-reads and re-resolves its
//!   target; nothing is cached between or within loads

pub mod error;
pub mod options;
mod resolve;
pub mod strip;

pub use error::{Error, Result};
pub use options::{LoadOptions, DEFAULT_INCLUDE_KEY};
pub use strip::strip_comments;

/// The document tree produced by loading: `serde_json`'s value type with
/// object key order preserved.
pub use serde_json::{Map, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::Path;

/// Deserialize an instance of type `T` from commented, include-bearing
/// JSON text, using default [`LoadOptions`].
///
/// Use `T = Value` to get the raw document tree.
///
/// # Examples
///
/// ```rust
/// use jsonc_include::{from_str, Value};
///
/// let value: Value = from_str("[1, 2, /* not yet */ ]").unwrap();
/// assert_eq!(value, serde_json::json!([1, 2]));
/// ```
///
/// # Errors
///
/// Returns an error if the stripped text is not valid JSON, an include
/// cannot be resolved, or the resulting document does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(text, &LoadOptions::default())
}

/// Deserialize an instance of type `T` from commented, include-bearing
/// JSON text with custom options.
///
/// # Examples
///
/// ```rust
/// use jsonc_include::{from_str_with_options, LoadOptions, Value};
///
/// let options = LoadOptions::new().with_remove_include_keys(true);
/// let value: Value = from_str_with_options("{\"a\": 1}", &options).unwrap();
/// assert_eq!(value, serde_json::json!({"a": 1}));
/// ```
///
/// # Errors
///
/// Returns an error if the stripped text is not valid JSON, an include
/// cannot be resolved, or the resulting document does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(text: &str, options: &LoadOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = resolve::load_str(text, options)?;
    Ok(serde_json::from_value(value)?)
}

/// Deserialize an instance of type `T` from an I/O stream of commented,
/// include-bearing JSON.
///
/// The stream is read to the end first; loading is fully synchronous.
///
/// # Errors
///
/// Returns an error if reading fails or the text does not load.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_reader_with_options(reader, &LoadOptions::default())
}

/// Deserialize an instance of type `T` from an I/O stream with custom
/// options.
///
/// # Errors
///
/// Returns an error if reading fails or the text does not load.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R, T>(mut reader: R, options: &LoadOptions) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    from_str_with_options(&text, options)
}

/// Deserialize an instance of type `T` from a file of commented,
/// include-bearing JSON.
///
/// Include directives inside the file (and inside the files it pulls in)
/// resolve relative to the directory of the file that states them, so an
/// include chain can be moved around as a unit. The named file itself
/// participates in cycle detection.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its text does not load.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: DeserializeOwned,
{
    from_file_with_options(path, &LoadOptions::default())
}

/// Deserialize an instance of type `T` from a file with custom options.
///
/// The options' base directory is ignored here; the file's own directory
/// anchors its directive paths.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its text does not load.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file_with_options<T>(path: impl AsRef<Path>, options: &LoadOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = resolve::load_path(path.as_ref(), options)?;
    Ok(serde_json::from_value(value)?)
}

/// Serialize `value` as a JSON string.
///
/// Pure delegation to [`serde_json::to_string`]: no comment or include
/// semantics apply to output, so round-tripping a loaded document drops
/// comments and writes includes already flattened.
///
/// # Examples
///
/// ```rust
/// use jsonc_include::{from_str, to_string, Value};
///
/// let value: Value = from_str("{\"a\": 1, // note\n}").unwrap();
/// assert_eq!(to_string(&value).unwrap(), "{\"a\":1}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(serde_json::to_string(value)?)
}

/// Serialize `value` as a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serialize `value` as JSON into a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    Ok(serde_json::to_writer(writer, value)?)
}

/// Serialize `value` as pretty-printed JSON into a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_pretty<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    Ok(serde_json::to_writer_pretty(writer, value)?)
}
