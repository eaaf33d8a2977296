//! Shared value types and configuration for `placefind`.
//!
//! Every other crate in the workspace depends on this one for the
//! [`Query`] newtype, the derived [`MapQuery`], the [`ResolutionResult`]
//! returned by the encyclopedia resolver, and the process-wide
//! [`AppConfig`] loaded from the environment.

mod app_config;
mod config;
pub mod map;
pub mod query;
pub mod resolution;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use map::{derive_map_query, MapQuery, MAP_SEARCH_URL};
pub use query::{InputError, Query};
pub use resolution::ResolutionResult;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
