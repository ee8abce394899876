//! Genesis document loading, sectioned access and atomic output
//!
//! A [`GenesisDocument`] owns the whole JSON tree. Transforms read the
//! subtrees they need as typed views with [`GenesisDocument::section`] and
//! write them back with [`GenesisDocument::put_section`]; everything they
//! never name passes through untouched.

use crate::error::{GenesisError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Dotted path into the document, e.g. `["app_state", "staking"]`.
pub type SectionPath<'a> = &'a [&'a str];

pub const STAKING: SectionPath<'static> = &["app_state", "staking"];
pub const DISTRIBUTION: SectionPath<'static> = &["app_state", "distribution"];
pub const SUPPLY: SectionPath<'static> = &["app_state", "supply"];
pub const AUTH_ACCOUNTS: SectionPath<'static> = &["app_state", "auth", "accounts"];

pub fn display_path(path: SectionPath<'_>) -> String {
    path.join(".")
}

/// Where a rewritten document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `None` and `-` both mean stdout.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if p.as_os_str() != "-" => OutputTarget::File(p),
            _ => OutputTarget::Stdout,
        }
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "<stdout>"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Encoding options for the emitted document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub pretty: bool,
    pub sort_keys: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenesisDocument {
    root: Map<String, Value>,
}

impl GenesisDocument {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(GenesisDocument { root }),
            other => Err(GenesisError::malformed(
                "<root>",
                format!("expected a JSON object, found {}", kind_of(&other)),
            )),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| GenesisError::malformed("<root>", e.to_string()))?;
        Self::from_value(value)
    }

    /// Read and parse a genesis file. The file is fully read and closed before
    /// parsing starts.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| GenesisError::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read genesis file");

        Self::from_slice(&bytes).map_err(|e| match e {
            GenesisError::MalformedGenesis { path: field, reason } => GenesisError::malformed(
                field,
                format!("{} (in {})", reason, path.display()),
            ),
            other => other,
        })
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn get(&self, path: SectionPath<'_>) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.root.get(*first)?, |node, key| node.get(*key))
    }

    /// Deserialize a copy of the subtree at `path`. The document itself is
    /// left as it is, so a transform can validate before it mutates.
    pub fn section<T: DeserializeOwned>(&self, path: SectionPath<'_>) -> Result<T> {
        let raw = self.slot(path)?.clone();
        serde_json::from_value(raw)
            .map_err(|e| GenesisError::malformed(display_path(path), e.to_string()))
    }

    /// Write `section` back over the object at `path`. Keys already present
    /// keep their position; keys the section does not emit are left alone.
    pub fn put_section<T: Serialize>(&mut self, path: SectionPath<'_>, section: &T) -> Result<()> {
        let value = serde_json::to_value(section)?;
        let slot = self.slot_mut(path)?;
        match (slot, value) {
            (Value::Object(existing), Value::Object(fields)) => {
                for (key, field) in fields {
                    existing.insert(key, field);
                }
            }
            (slot, value) => *slot = value,
        }
        Ok(())
    }

    /// Detach the raw subtree at `path`, requiring it to be present.
    pub fn take_raw(&mut self, path: SectionPath<'_>) -> Result<Value> {
        Ok(self.slot_mut(path)?.take())
    }

    /// Replace the raw subtree at `path`; every parent must already exist.
    pub fn put_raw(&mut self, path: SectionPath<'_>, value: Value) -> Result<()> {
        *self.slot_mut(path)? = value;
        Ok(())
    }

    /// Set the subtree at `path`, creating the last key if it is absent. The
    /// parent must exist and be an object.
    pub fn insert_raw(&mut self, path: SectionPath<'_>, value: Value) -> Result<()> {
        let (last, parent) = path
            .split_last()
            .ok_or_else(|| GenesisError::malformed("<root>", "empty section path"))?;
        let container = if parent.is_empty() {
            &mut self.root
        } else {
            self.slot_mut(parent)?.as_object_mut().ok_or_else(|| {
                GenesisError::malformed(display_path(parent), "expected a JSON object")
            })?
        };
        container.insert(last.to_string(), value);
        Ok(())
    }

    /// Remove a top-level field, returning its previous value.
    pub fn remove_field(&mut self, key: &str) -> Option<Value> {
        self.root.shift_remove(key)
    }

    pub fn set_field(&mut self, key: &str, value: Value) {
        self.root.insert(key.to_string(), value);
    }

    pub fn genesis_time(&self) -> Option<&str> {
        self.root.get("genesis_time").and_then(Value::as_str)
    }

    pub fn set_genesis_time(&mut self, time: &DateTime<Utc>) {
        self.set_field(
            "genesis_time",
            Value::String(time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );
    }

    pub fn chain_id(&self) -> Option<&str> {
        self.root.get("chain_id").and_then(Value::as_str)
    }

    pub fn set_chain_id(&mut self, chain_id: &str) {
        self.set_field("chain_id", Value::String(chain_id.to_string()));
    }

    fn slot(&self, path: SectionPath<'_>) -> Result<&Value> {
        let (first, rest) = path
            .split_first()
            .ok_or_else(|| GenesisError::malformed("<root>", "empty section path"))?;

        let mut node = self.root.get(*first).ok_or_else(|| missing(&path[..1]))?;
        for (depth, key) in rest.iter().enumerate() {
            let object = node.as_object().ok_or_else(|| {
                GenesisError::malformed(display_path(&path[..depth + 1]), "expected a JSON object")
            })?;
            node = object.get(*key).ok_or_else(|| missing(&path[..depth + 2]))?;
        }
        Ok(node)
    }

    fn slot_mut(&mut self, path: SectionPath<'_>) -> Result<&mut Value> {
        let (first, rest) = path
            .split_first()
            .ok_or_else(|| GenesisError::malformed("<root>", "empty section path"))?;

        let mut node = self
            .root
            .get_mut(*first)
            .ok_or_else(|| missing(&path[..1]))?;
        for (depth, key) in rest.iter().enumerate() {
            let walked = &path[..depth + 1];
            let object = node.as_object_mut().ok_or_else(|| {
                GenesisError::malformed(display_path(walked), "expected a JSON object")
            })?;
            node = object
                .get_mut(*key)
                .ok_or_else(|| missing(&path[..depth + 2]))?;
        }
        Ok(node)
    }

    /// Encode the whole document. Nothing is written anywhere until this
    /// succeeds.
    pub fn to_bytes(&self, options: OutputOptions) -> Result<Vec<u8>> {
        let mut bytes = if options.sort_keys {
            let sorted = sort_keys(Value::Object(self.root.clone()));
            encode(&sorted, options.pretty)?
        } else {
            encode(&self.root, options.pretty)?
        };
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Write the document to `target`. File output goes through a temporary
    /// file in the destination directory that is renamed into place only once
    /// it is complete.
    pub fn write(&self, target: &OutputTarget, options: OutputOptions) -> Result<()> {
        let bytes = self.to_bytes(options)?;
        match target {
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle
                    .write_all(&bytes)
                    .and_then(|_| handle.flush())
                    .map_err(|e| GenesisError::Serialization(format!("writing stdout: {}", e)))?;
            }
            OutputTarget::File(path) => write_atomic(path, &bytes)?,
        }
        info!(output = %target, bytes = bytes.len(), "wrote genesis document");
        Ok(())
    }
}

fn encode<T: Serialize>(value: &T, pretty: bool) -> Result<Vec<u8>> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    Ok(bytes)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let fail = |what: &str, e: io::Error| {
        GenesisError::Serialization(format!("{} {}: {}", what, path.display(), e))
    };

    let temp = NamedTempFile::new_in(dir).map_err(|e| fail("creating temp file for", e))?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        writer
            .write_all(bytes)
            .and_then(|_| writer.flush())
            .map_err(|e| fail("writing", e))?;
    }
    temp.as_file().sync_all().map_err(|e| fail("syncing", e))?;
    temp.persist(path).map_err(|e| fail("renaming into", e.error))?;
    Ok(())
}

/// Recursively order object keys lexicographically.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn missing(path: SectionPath<'_>) -> GenesisError {
    GenesisError::malformed(display_path(path), "required field is missing")
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
