use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single materialization. Every variant is terminal for the
/// invocation and leaves the filesystem untouched.
#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("You requested this to fail")]
    RequestedFailure,
    #[error("Cannot expand '~': home directory is unknown")]
    HomeUnavailable,
    #[error("{source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("Failed to read arguments file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid module arguments: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find home directory")]
    NoHome,
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
