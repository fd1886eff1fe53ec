//! Process configuration for devserver.
//!
//! All configuration is driven by environment variables. The hosted-mode
//! indicator is resolved here, once, and handed to the gate as a plain bool.

use typed_builder::TypedBuilder;

/// Environment variable set by the hosting platform.
pub const HOSTED_ENV_VAR: &str = "GAE_ENV";

/// Value of [`HOSTED_ENV_VAR`] that marks the hosted (production) environment.
pub const HOSTED_ENV_VALUE: &str = "standard";

/// Returns `true` if `value` (the content of [`HOSTED_ENV_VAR`]) marks hosted mode.
#[must_use]
pub fn is_hosted(value: Option<&str>) -> bool {
    value == Some(HOSTED_ENV_VALUE)
}

/// devserver configuration.
///
/// # Examples
///
/// ```
/// use devserver_core::DevServerConfig;
///
/// let config = DevServerConfig::default();
/// assert_eq!(config.config_file, "app.yaml");
/// assert!(!config.hosted);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct DevServerConfig {
    /// Bind address for the HTTP listener.
    #[builder(default = String::from("127.0.0.1:8080"))]
    pub listen: String,

    /// Config filename, searched for from the working directory upward.
    #[builder(default = String::from("app.yaml"))]
    pub config_file: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Whether the process runs on the hosting platform itself.
    #[builder(default = false)]
    pub hosted: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DevServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DEVSERVER_LISTEN` | `127.0.0.1:8080` |
    /// | `DEVSERVER_CONFIG` | `app.yaml` |
    /// | `LOG_LEVEL` | `info` |
    /// | `GAE_ENV` | *(unset)* |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("DEVSERVER_LISTEN") {
            config.listen = v;
        }
        if let Some(v) = lookup("DEVSERVER_CONFIG") {
            config.config_file = v;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        config.hosted = is_hosted(lookup(HOSTED_ENV_VAR).as_deref());

        config
    }
}
