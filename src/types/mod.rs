//! Shared types for confstack

mod errors;

pub use errors::{ConfigError, Result};

/// A request to load and merge config files sharing one base name.
///
/// `file` is the base file name without extension, optionally prefixed
/// with subdirectories relative to the loader's base directory
/// (`"app"`, `"conf/app"`). `encoding` overrides the loader's default
/// encoding for this call only.
#[derive(Debug, Clone, Default)]
pub struct LoadRequest {
    pub file: String,
    pub encoding: Option<String>,
}

impl LoadRequest {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            encoding: None,
        }
    }

    /// Set an encoding label (WHATWG style, e.g. `"utf-8"`, `"utf-16le"`).
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

impl From<&str> for LoadRequest {
    fn from(file: &str) -> Self {
        Self::new(file)
    }
}

impl From<String> for LoadRequest {
    fn from(file: String) -> Self {
        Self::new(file)
    }
}
