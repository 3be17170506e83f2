//! Error types for mesh scans.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a scan.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or empty mesh geometry.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// The input file extension does not name a known mesh format.
    #[error("unsupported mesh format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Wavefront OBJ could not be loaded.
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    /// NumPy array header or payload could not be parsed.
    #[error("NPY error: {0}")]
    Npy(#[from] binrw::Error),

    /// Projection could not be encoded as TIFF.
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// Output path template is unusable.
    #[error("output template error: {0}")]
    Template(String),

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Compute device could not be initialized.
    #[error("device {index} failed to initialize: {source}")]
    Device {
        index: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },

    /// Worker stopped because a sibling worker failed.
    #[error("worker {worker} aborted after failure of another worker")]
    Aborted { worker: usize },

    /// Worker thread panicked.
    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    /// Logger was already installed.
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for scan operations.
pub type Result<T> = std::result::Result<T, Error>;
