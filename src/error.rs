use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the interaction shell.
///
/// Analysis never fails; degenerate selections produce a zero density instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to access result file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write record to {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unknown color name '{0}'")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
