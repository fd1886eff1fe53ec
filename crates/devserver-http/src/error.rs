//! Errors raised while serving a request.

use std::path::PathBuf;

/// A filesystem fault other than "file does not exist".
///
/// Missing files never surface as a `ServeError`; they become 404 responses.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Reading metadata or opening the resolved file failed.
    #[error("failed to serve {path}: {source}")]
    Io {
        /// The resolved filesystem path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for serving operations.
pub type ServeResult<T> = Result<T, ServeError>;

/// Whether an I/O error means the path simply is not there.
#[must_use]
pub(crate) fn is_not_found(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
    )
}
