//! Core types, configuration, and config-file loading for devserver.
//!
//! This crate holds everything the HTTP layer needs to know before the first
//! request arrives: the handler descriptors declared in `app.yaml`, their
//! validation rules, and the process configuration read from environment
//! variables.

mod config;
mod error;
mod handler;
mod loader;

pub use config::{DevServerConfig, HOSTED_ENV_VALUE, HOSTED_ENV_VAR, is_hosted};
pub use error::{ConfigError, ConfigResult};
pub use handler::{HandlerConfig, HandlerDescriptor, validate_handlers};
pub use loader::{AppYaml, find_config_file, load_handler_config, read_handler_config};
