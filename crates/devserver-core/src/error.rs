//! Error types for configuration loading and handler validation.

use std::path::PathBuf;

/// Error raised while loading or validating handler configuration.
///
/// Every variant is fatal at startup: a server never starts with a partially
/// built route table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A handler entry has no `url` key.
    #[error("invalid handler #{index}, missing \"url\"")]
    MissingUrl {
        /// Position of the handler in the `handlers` list.
        index: usize,
    },

    /// A handler entry defines zero or several handler kinds.
    #[error(
        "invalid handler #{index} ({url}), must define exactly 1 of script, static_dir, static_files"
    )]
    AmbiguousHandler {
        /// Position of the handler in the `handlers` list.
        index: usize,
        /// The handler's url pattern.
        url: String,
    },

    /// A handler url is not a valid regular expression.
    #[error("invalid handler #{index}, url pattern {url:?} does not compile: {reason}")]
    InvalidPattern {
        /// Position of the handler in the `handlers` list.
        index: usize,
        /// The offending url pattern.
        url: String,
        /// Compiler message from the regex engine.
        reason: String,
    },

    /// No config file was found walking up from the start directory.
    #[error("cannot find {filename} in {start_dir} or any parent directory")]
    ConfigNotFound {
        /// Name of the file being searched for.
        filename: String,
        /// Directory the search started from.
        start_dir: PathBuf,
    },

    /// Reading the config file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML or has the wrong shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Convenience result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
