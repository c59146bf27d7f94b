//! Include-directive expansion and merge precedence.
//!
//! After the decoder has produced a [`Value`] tree, this module expands
//! include directives: object entries whose key starts with the configured
//! include prefix and whose value names another file. The referenced file
//! is loaded through the same pipeline (comments stripped, decoded, its own
//! includes expanded) and merged into the object holding the directive.
//!
//! Precedence is the heart of the contract: values written literally in a
//! file always beat values pulled in through its directives. Expansion
//! first lets includes overwrite freely, then replays a snapshot of the
//! file's own values over the result, so the file wins every collision
//! while include-only keys survive.
//!
//! Cyclic include graphs are refused. The resolver keeps the ordered set of
//! files currently being loaded; a directive that re-enters one of them
//! fails with [`Error::CircularInclude`](crate::Error::CircularInclude)
//! instead of recursing forever.

use crate::error::{Error, Result};
use crate::options::LoadOptions;
use crate::strip::strip_comments;
use indexmap::IndexSet;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Loads a top-level in-memory source. Directive paths resolve against the
/// options' base directory.
pub(crate) fn load_str(text: &str, options: &LoadOptions) -> Result<Value> {
    let mut resolver = Resolver::new(options);
    let mut doc = resolver.resolve_str(text, options.base_dir())?;
    if options.remove_include_keys() {
        strip_include_keys(&mut doc, options.include_key());
    }
    Ok(doc)
}

/// Loads a top-level file. Directive paths resolve against the file's own
/// directory, and the file itself participates in cycle tracking.
pub(crate) fn load_path(path: &Path, options: &LoadOptions) -> Result<Value> {
    let mut resolver = Resolver::new(options);
    let mut doc = resolver.resolve_file(path, false)?;
    if options.remove_include_keys() {
        strip_include_keys(&mut doc, options.include_key());
    }
    Ok(doc)
}

/// One document load in progress. A fresh resolver is built per public
/// call; nothing is cached across loads, and repeated inclusion of the
/// same path at different tree positions re-reads it every time.
struct Resolver<'a> {
    options: &'a LoadOptions,
    /// Canonical paths currently being loaded, outermost first.
    in_flight: IndexSet<PathBuf>,
}

impl<'a> Resolver<'a> {
    fn new(options: &'a LoadOptions) -> Self {
        Resolver {
            options,
            in_flight: IndexSet::new(),
        }
    }

    /// Strips, decodes, and expands one source text. `dir` is the
    /// directory its directive paths resolve against.
    fn resolve_str(&mut self, text: &str, dir: &Path) -> Result<Value> {
        let mut doc: Value = serde_json::from_str(&strip_comments(text))?;
        self.apply(&mut doc, dir)?;
        Ok(doc)
    }

    /// Loads one file. `nested` marks a file reached through a directive,
    /// which must be object-rooted; a file requested directly by the
    /// caller may have any root.
    fn resolve_file(&mut self, path: &Path, nested: bool) -> Result<Value> {
        let canonical = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());
        if self.in_flight.contains(&canonical) {
            return Err(Error::circular(&self.in_flight, &canonical));
        }

        let text = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        let mut doc: Value = serde_json::from_str(&strip_comments(&text))?;
        if nested && !doc.is_object() {
            return Err(Error::included_not_object(path));
        }

        debug!(path = %path.display(), nested, "loading document");
        self.in_flight.insert(canonical);
        let dir = path.parent().unwrap_or(Path::new("")).to_path_buf();
        let expanded = self.apply(&mut doc, &dir);
        self.in_flight.pop();
        expanded.map(|()| doc)
    }

    /// Expands a freshly decoded document in place, then restores the
    /// document's own values on top of whatever its includes brought in.
    fn apply(&mut self, doc: &mut Value, dir: &Path) -> Result<()> {
        let snapshot = self.options.keep_top_values().then(|| doc.clone());
        self.expand(doc, dir)?;
        if let Some(snapshot) = snapshot {
            restore(doc, &snapshot)?;
        }
        Ok(())
    }

    /// Depth-first walk that loads every directive target. Loaded objects
    /// are collected during the iteration and applied afterwards, so the
    /// object is never mutated while its entries are being visited; with
    /// several directives in one object, the later one wins collisions
    /// neither the object itself resolves.
    fn expand(&mut self, value: &mut Value, dir: &Path) -> Result<()> {
        match value {
            Value::Object(entries) => {
                let mut pending: Vec<Map<String, Value>> = Vec::new();
                for (key, child) in entries.iter_mut() {
                    if key.starts_with(self.options.include_key()) {
                        let target = child
                            .as_str()
                            .ok_or_else(|| Error::directive_path(key))?;
                        let included = self.resolve_file(&dir.join(target), true)?;
                        if let Value::Object(included) = included {
                            pending.push(included);
                        }
                    } else if child.is_object() || child.is_array() {
                        self.expand(child, dir)?;
                    }
                }
                for included in pending {
                    for (key, value) in included {
                        entries.insert(key, value);
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if item.is_object() || item.is_array() {
                        self.expand(item, dir)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Replays `snapshot` (the document's pre-expansion values) over `target`
/// (the include-expanded document). Snapshot values win: scalars overwrite
/// unconditionally, containers recurse, and keys only the expanded side
/// has are left alone. Array pairs merge positionally up to the shorter
/// length, recursing into paired containers only; paired scalar elements
/// are never overwritten and excess elements stay as they are.
fn restore(target: &mut Value, snapshot: &Value) -> Result<()> {
    match snapshot {
        Value::Object(snapshot) => match target {
            Value::Object(target) => {
                for (key, snap_value) in snapshot {
                    match snap_value {
                        Value::Object(_) => {
                            let slot = target
                                .entry(key.clone())
                                .or_insert_with(|| Value::Object(Map::new()));
                            restore(slot, snap_value)?;
                        }
                        Value::Array(_) => {
                            let slot = target
                                .entry(key.clone())
                                .or_insert_with(|| Value::Array(Vec::new()));
                            restore(slot, snap_value)?;
                        }
                        _ => {
                            target.insert(key.clone(), snap_value.clone());
                        }
                    }
                }
                Ok(())
            }
            other => Err(Error::merge_conflict(kind(other), "object")),
        },
        Value::Array(snapshot) => match target {
            Value::Array(target) => {
                for (item, snap_item) in target.iter_mut().zip(snapshot) {
                    if snap_item.is_object() || snap_item.is_array() {
                        restore(item, snap_item)?;
                    }
                }
                Ok(())
            }
            other => Err(Error::merge_conflict(kind(other), "array")),
        },
        _ => Ok(()),
    }
}

/// Removes every directive key, at any depth, from an already-resolved
/// document. Idempotent; a document without directives passes through
/// unchanged.
pub(crate) fn strip_include_keys(value: &mut Value, include_key: &str) {
    match value {
        Value::Object(entries) => {
            let before = entries.len();
            entries.retain(|key, _| !key.starts_with(include_key));
            if entries.len() != before {
                trace!(removed = before - entries.len(), "stripped directive keys");
            }
            for child in entries.values_mut() {
                strip_include_keys(child, include_key);
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_include_keys(item, include_key);
            }
        }
        _ => {}
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
