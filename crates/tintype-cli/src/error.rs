use std::path::PathBuf;

use tintype_core::CatalogError;
use tintype_gpu::EngineError;

/// Errors that can occur while running the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no input image given")]
    MissingInput,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("invalid parameter file {path}: {source}")]
    Params {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("failed to serialize parameters: {0}")]
    Serialize(#[from] serde_json::Error),
}
