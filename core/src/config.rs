//! Endpoint configuration for the command/query split.
//!
//! # Design
//! Writes and reads may be served by different hosts, so the client is built
//! from two independent base URLs and never derives one from the other. The
//! command base is scoped to the person collection (`…/api/persons`); the
//! query base is scoped to the query root (`…/api/query`) and the client
//! appends `/persons` itself.

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Path of the command side below a gateway host.
pub const GATEWAY_COMMAND_PATH: &str = "/api/persons";
/// Path of the query side below a gateway host.
pub const GATEWAY_QUERY_PATH: &str = "/api/query";

/// The two base URLs a `PersonClient` talks to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawClientConfig")]
pub struct ClientConfig {
    command_base_url: String,
    query_base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClientConfig {
    command_base_url: String,
    query_base_url: String,
}

impl TryFrom<RawClientConfig> for ClientConfig {
    type Error = ConfigError;

    fn try_from(raw: RawClientConfig) -> Result<Self, Self::Error> {
        ClientConfig::new(&raw.command_base_url, &raw.query_base_url)
    }
}

impl ClientConfig {
    /// Two independent endpoints, possibly on different hosts.
    pub fn new(command_base_url: &str, query_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            command_base_url: normalize("command", command_base_url)?,
            query_base_url: normalize("query", query_base_url)?,
        })
    }

    /// Both sides behind one gateway host, distinguished by sub-path.
    pub fn gateway(gateway_url: &str) -> Result<Self, ConfigError> {
        let root = normalize("gateway", gateway_url)?;
        Self::new(
            &format!("{root}{GATEWAY_COMMAND_PATH}"),
            &format!("{root}{GATEWAY_QUERY_PATH}"),
        )
    }

    pub fn command_base_url(&self) -> &str {
        &self.command_base_url
    }

    pub fn query_base_url(&self) -> &str {
        &self.query_base_url
    }
}

/// Validate `raw` as an absolute http(s) URL and strip trailing slashes.
///
/// The input string is kept (minus the slashes) rather than `Url`'s
/// serialization so that a bare host does not gain a `/` path.
fn normalize(endpoint: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { endpoint });
    }
    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::Invalid {
        endpoint,
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            endpoint,
            url: raw.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
