//! Client configuration.
//!
//! Settings come from an optional config file (any format the `config`
//! crate recognises by extension) with `GITGATE_*` environment variables
//! layered on top, e.g. `GITGATE_ADDRESS=http://gitaly:8075`.

use crate::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use validator::Validate;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "GITGATE";

/// Connection settings for the smart HTTP backend.
#[derive(Clone, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend address, e.g. `http://127.0.0.1:8075`.
    #[validate(url(message = "address must be a URL"))]
    pub address: String,
    /// Seconds allowed for establishing the connection.
    #[validate(range(min = 1, max = 300))]
    pub connect_timeout_secs: u64,
    /// Transport deadline for each call, unset for none.
    #[validate(range(min = 1))]
    pub request_timeout_secs: Option<u64>,
    /// Largest response message accepted from the backend.
    #[validate(range(min = 1024))]
    pub max_decoding_message_size: usize,
    /// Bearer token sent with every call.
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8075".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            max_decoding_message_size: 4 * 1024 * 1024,
            token: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("address", &self.address)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_decoding_message_size", &self.max_decoding_message_size)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ClientConfig {
    /// Loads the configuration from `path` (if given) and the environment,
    /// then validates it.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(prefix).try_parsing(true))
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        let config: ClientConfig = settings
            .try_deserialize()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;
        config
            .validate()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        tracing::debug!(config = ?config, "Loaded client configuration");
        Ok(config)
    }
}
