//! Handler descriptors as declared in the `handlers` section of `app.yaml`.
//!
//! A raw [`HandlerConfig`] mirrors the YAML entry verbatim. Validation turns
//! it into a [`HandlerDescriptor`], which is guaranteed to carry a url and
//! exactly one handler kind.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// A single, unvalidated entry of the `handlers` list.
///
/// Keys this server does not act on (`secure`, `upload`, `login`, ...) are
/// accepted and ignored so real App Engine configs load unchanged.
///
/// A handler kind counts as defined when its key is present, even with a null
/// value; `script: ~` reads as `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// URL pattern (a regular expression anchored at the start of the path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Delegate to the wrapped application.
    #[serde(
        default,
        deserialize_with = "present_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub script: Option<String>,
    /// Serve files below this directory.
    #[serde(
        default,
        deserialize_with = "present_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub static_dir: Option<String>,
    /// Serve the file named by this backreference template.
    #[serde(
        default,
        deserialize_with = "present_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub static_files: Option<String>,
}

/// Deserialize a key that is present in the mapping, null or not.
///
/// Only called when the key exists; absent keys fall back to `None` through
/// `#[serde(default)]`.
fn present_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(
        Option::<String>::deserialize(deserializer)?.unwrap_or_default(),
    ))
}

impl HandlerConfig {
    /// A `script` handler forwarding `url` to the wrapped application.
    #[must_use]
    pub fn script(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            script: Some("auto".to_owned()),
            ..Self::default()
        }
    }

    /// A `static_dir` handler serving `dir` under `url`.
    #[must_use]
    pub fn static_dir(url: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            static_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// A `static_files` handler mapping `url` captures into `template`.
    #[must_use]
    pub fn static_files(url: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            static_files: Some(template.into()),
            ..Self::default()
        }
    }

    /// Validate this entry, `index` being its position in the handler list.
    ///
    /// The url is checked first, then the handler kind, so an entry lacking
    /// both reports the missing url.
    pub fn validate(&self, index: usize) -> ConfigResult<HandlerDescriptor> {
        let url = self.url.clone().ok_or(ConfigError::MissingUrl { index })?;

        match (&self.script, &self.static_dir, &self.static_files) {
            (Some(_), None, None) => Ok(HandlerDescriptor::Delegate { url }),
            (None, Some(dir), None) => Ok(HandlerDescriptor::StaticDir {
                url,
                dir: PathBuf::from(dir),
            }),
            (None, None, Some(template)) => Ok(HandlerDescriptor::StaticFiles {
                url,
                template: template.clone(),
            }),
            _ => Err(ConfigError::AmbiguousHandler { index, url }),
        }
    }
}

/// A validated handler: a url pattern plus exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerDescriptor {
    /// Forward matching requests to the wrapped application.
    Delegate {
        /// URL prefix pattern.
        url: String,
    },
    /// Append the path remainder after `url` to `dir`.
    StaticDir {
        /// URL prefix pattern.
        url: String,
        /// Base directory.
        dir: PathBuf,
    },
    /// Substitute `url` captures into `template`.
    StaticFiles {
        /// URL pattern, normally with a capture group.
        url: String,
        /// File path template with `\1`-style backreferences.
        template: String,
    },
}

impl HandlerDescriptor {
    /// The url pattern of this handler.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Delegate { url } | Self::StaticDir { url, .. } | Self::StaticFiles { url, .. } => {
                url
            }
        }
    }

    /// Short name of the handler kind, as used in `app.yaml`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Delegate { .. } => "script",
            Self::StaticDir { .. } => "static_dir",
            Self::StaticFiles { .. } => "static_files",
        }
    }
}

/// Validate every entry, failing on the first invalid one.
///
/// Nothing is returned unless the whole list is valid.
pub fn validate_handlers(handlers: &[HandlerConfig]) -> ConfigResult<Vec<HandlerDescriptor>> {
    handlers
        .iter()
        .enumerate()
        .map(|(index, handler)| handler.validate(index))
        .collect()
}
