//! Client configuration.

use serde::{Deserialize, Serialize};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.dialogflow.com/v1/";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Protocol version returning `sys.number` values as strings (default).
pub const PROTOCOL_V1: &str = "20150910";

/// Protocol version returning `sys.number` values as integers.
pub const PROTOCOL_V2: &str = "20170712";

/// Settings shared by every request made through a client.
///
/// The struct is serde-friendly so callers can keep it in their own
/// configuration files; the crate itself never reads files or environment
/// variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Agent access token sent as a bearer token.
    pub access_token: String,

    /// Base URL for the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Protocol version sent as the `v` query parameter.
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Default language for queries.
    #[serde(default = "default_language")]
    pub language: String,

    /// Session id. A random one is generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_protocol() -> String {
    PROTOCOL_V1.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl ClientConfig {
    /// Create a config with the given access token and default settings.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: default_base_url(),
            protocol: default_protocol(),
            language: default_language(),
            session_id: None,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the protocol version.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Set the default language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the session id.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}
