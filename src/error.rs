use std::path::PathBuf;

use thiserror::Error;

/// Failures the loader and the output writer can report.
///
/// The application layer wraps these in `anyhow` with extra context; tests
/// recover the variant with `downcast_ref`.
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("data directory '{}' not found; create it and add one .txt file per dataset", .0.display())]
    DataDirMissing(PathBuf),

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("no .txt files found in '{}'", .0.display())]
    NoDatasets(PathBuf),

    #[error("failed to read '{}'", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}'", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TallyError>;
