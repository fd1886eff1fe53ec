//! `app.yaml` discovery and parsing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::handler::HandlerConfig;

/// The parts of an `app.yaml` this server reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppYaml {
    /// Ordered handler list; earlier entries take priority.
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,
}

/// Find `filename` in `start_dir` or the nearest parent directory containing it.
#[must_use]
pub fn find_config_file(filename: &str, start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.exists())
}

/// Read the handler list from the config file at `path`.
///
/// Entries are returned unvalidated.
pub fn load_handler_config(path: &Path) -> ConfigResult<Vec<HandlerConfig>> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    let app: AppYaml = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        handlers = app.handlers.len(),
        "loaded handler config",
    );

    Ok(app.handlers)
}

/// Discover `filename` upward from `start_dir` and read its handler list.
pub fn read_handler_config(filename: &str, start_dir: &Path) -> ConfigResult<Vec<HandlerConfig>> {
    let path =
        find_config_file(filename, start_dir).ok_or_else(|| ConfigError::ConfigNotFound {
            filename: filename.to_owned(),
            start_dir: start_dir.to_owned(),
        })?;
    load_handler_config(&path)
}
