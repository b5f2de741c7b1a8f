use std::path::PathBuf;

use thiserror::Error;

/// Failures while placing accepted uploads on disk. All of these are
/// infrastructure problems, never shown to the submitter verbatim.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Upload path component {0:?} is not a plain file name")]
    InvalidPathComponent(String),
    #[error("Resolved upload path {0:?} escapes the upload root")]
    PathEscapesRoot(PathBuf),
    #[error("Failed to prepare upload directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write uploaded file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
