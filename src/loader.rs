//! Config file loading and merging
//!
//! A [`ConfigLoader`] scans one directory level for files whose stem
//! matches a requested base name, parses each match with the parser
//! registered for its extension, and deep-merges the documents into a
//! single object. Merge precedence follows directory-listing order,
//! which is filesystem-dependent and not guaranteed sorted; applications
//! that need deterministic precedence across formats should register a
//! single extension per base name.

use crate::encoding;
use crate::merge::deep_merge;
use crate::registry::{ParseFn, ParserRegistry};
use crate::types::{ConfigError, LoadRequest, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::debug;

const DEFAULT_ENCODING: &str = "utf-8";

/// Loads same-named config files from a directory and merges them.
///
/// Long-lived: construct once, call [`load`](Self::load) or
/// [`load_sync`](Self::load_sync) per request. The parser registry is
/// live state and may be extended at any time via [`parsers`](Self::parsers).
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base_dir: PathBuf,
    default_encoding: String,
    parsers: ParserRegistry,
}

impl ConfigLoader {
    /// Loader rooted at the current directory, decoding UTF-8, with only
    /// the JSON parser registered.
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            default_encoding: DEFAULT_ENCODING.to_string(),
            parsers: ParserRegistry::new(),
        }
    }

    /// Loader rooted at `base_dir` with otherwise default configuration.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let mut loader = Self::new();
        loader.base_dir = base_dir.into();
        loader
    }

    /// Process-wide default loader: current directory, UTF-8, JSON only.
    ///
    /// Created on first use. Its registry stays live-mutable; register
    /// additional parsers during startup, before concurrent use begins.
    pub fn global() -> &'static ConfigLoader {
        static GLOBAL: OnceLock<ConfigLoader> = OnceLock::new();
        GLOBAL.get_or_init(ConfigLoader::new)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn set_base_dir(&mut self, base_dir: impl Into<PathBuf>) {
        self.base_dir = base_dir.into();
    }

    pub fn default_encoding(&self) -> &str {
        &self.default_encoding
    }

    pub fn set_default_encoding(&mut self, encoding: impl Into<String>) {
        self.default_encoding = encoding.into();
    }

    /// The live parser registry for this loader.
    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    /// Load and merge all matching config files, blocking the caller.
    ///
    /// Zero matching files is not an error: the result is an empty object.
    pub fn load_sync(&self, request: impl Into<LoadRequest>) -> Result<Value> {
        let request = request.into();
        let (search_dir, base_name) = self.resolve(&request);
        debug!("Scanning {} for {}.*", search_dir.display(), base_name);

        let entries = std::fs::read_dir(&search_dir).map_err(|source| {
            ConfigError::DirectoryAccess {
                path: search_dir.clone(),
                source,
            }
        })?;

        let mut merged = Value::Object(Map::new());
        for entry in entries {
            let entry = entry.map_err(|source| ConfigError::DirectoryAccess {
                path: search_dir.clone(),
                source,
            })?;

            let Some(parser) = self.match_entry(&entry.file_name(), &base_name) else {
                continue;
            };

            let path = entry.path();
            let bytes = std::fs::read(&path).map_err(|source| ConfigError::FileRead {
                path: path.clone(),
                source,
            })?;

            merged = self.parse_into(merged, &path, &bytes, &request, parser)?;
        }

        Ok(merged)
    }

    /// Load and merge all matching config files without blocking.
    ///
    /// Same semantics as [`load_sync`](Self::load_sync). All selected
    /// files are read concurrently; the first read failure resolves the
    /// call with that error and results from reads still in flight are
    /// discarded. Decoding, parsing, and merging happen in listing order
    /// once every read has completed.
    pub async fn load(&self, request: impl Into<LoadRequest>) -> Result<Value> {
        let request = request.into();
        let (search_dir, base_name) = self.resolve(&request);
        debug!("Scanning {} for {}.*", search_dir.display(), base_name);

        let mut entries = tokio::fs::read_dir(&search_dir).await.map_err(|source| {
            ConfigError::DirectoryAccess {
                path: search_dir.clone(),
                source,
            }
        })?;

        let mut selected: Vec<(PathBuf, Arc<ParseFn>)> = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|source| {
            ConfigError::DirectoryAccess {
                path: search_dir.clone(),
                source,
            }
        })? {
            if let Some(parser) = self.match_entry(&entry.file_name(), &base_name) {
                selected.push((entry.path(), parser));
            }
        }

        let reads = selected.iter().map(|(path, _)| async move {
            tokio::fs::read(path).await.map_err(|source| ConfigError::FileRead {
                path: path.clone(),
                source,
            })
        });
        let contents = futures::future::try_join_all(reads).await?;

        let mut merged = Value::Object(Map::new());
        for ((path, parser), bytes) in selected.iter().zip(contents) {
            merged = self.parse_into(merged, path, &bytes, &request, Arc::clone(parser))?;
        }

        Ok(merged)
    }

    /// Blocking variant of [`load_as`](Self::load_as).
    pub fn load_sync_as<T: DeserializeOwned>(&self, request: impl Into<LoadRequest>) -> Result<T> {
        serde_json::from_value(self.load_sync(request)?).map_err(ConfigError::Deserialize)
    }

    /// Load, merge, and deserialize the result into a typed config struct.
    pub async fn load_as<T: DeserializeOwned>(&self, request: impl Into<LoadRequest>) -> Result<T> {
        serde_json::from_value(self.load(request).await?).map_err(ConfigError::Deserialize)
    }

    /// Split a request into the effective search directory and base name.
    ///
    /// An absolute `file` makes the join discard `base_dir` entirely, so
    /// absolute requests search exactly where they point.
    fn resolve(&self, request: &LoadRequest) -> (PathBuf, String) {
        let relative = Path::new(&request.file);
        let base_name = relative
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent = relative.parent().unwrap_or_else(|| Path::new(""));
        (self.base_dir.join(parent), base_name)
    }

    /// A directory entry participates iff its stem equals the base name,
    /// case-sensitively, and its lowercased extension has a parser
    /// registered right now.
    fn match_entry(&self, file_name: &OsStr, base_name: &str) -> Option<Arc<ParseFn>> {
        let name = Path::new(file_name);
        if name.file_stem()?.to_str()? != base_name {
            return None;
        }

        let extension = name.extension()?.to_str()?.to_ascii_lowercase();
        let parser = self.parsers.get(&extension)?;
        debug!("Selected {:?} (.{} parser)", file_name, extension);
        Some(parser)
    }

    fn parse_into(
        &self,
        merged: Value,
        path: &Path,
        bytes: &[u8],
        request: &LoadRequest,
        parser: Arc<ParseFn>,
    ) -> Result<Value> {
        let label = request
            .encoding
            .as_deref()
            .unwrap_or(&self.default_encoding);
        let text = encoding::decode(bytes, label)?;
        let value = parser(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(deep_merge(merged, value))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
