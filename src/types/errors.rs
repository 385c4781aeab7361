use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot list directory {path}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Merged config does not match the requested type: {0}")]
    Deserialize(#[source] serde_json::Error),
}

impl ConfigError {
    /// Path of the file or directory the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::DirectoryAccess { path, .. }
            | Self::FileRead { path, .. }
            | Self::Parse { path, .. } => Some(path),
            Self::UnknownEncoding(_) | Self::Deserialize(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
