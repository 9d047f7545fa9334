//! TOML parsing into typed configuration.
use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Deserialize `content` as TOML, naming `source` in any error.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSyntax`] if the content is not valid TOML
/// or does not match the schema of `T`.
pub fn parse<T: DeserializeOwned>(content: &str, source: &str) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
        file: source.to_string(),
        message: e.message().to_string(),
    })
}
