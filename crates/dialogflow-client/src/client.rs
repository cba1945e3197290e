//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{ContextsApi, EntitiesApi, IntentsApi, QueryApi, UserEntitiesApi};
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_LANGUAGE, PROTOCOL_V1};
use crate::error::{Error, Result};
use crate::request::{PreparedRequest, RequestOptions};

/// Dialogflow agent-management client.
///
/// Cheap to clone; clones share the configuration and the session id.
///
/// # Example
///
/// ```no_run
/// use dialogflow_client::{DialogflowClient, Query};
///
/// # async fn example() -> dialogflow_client::Result<()> {
/// let client = DialogflowClient::builder()
///     .access_token("<agent token>")
///     .build()?;
///
/// let entities = client.entities().list().await?;
/// let answer = client.query().get(Query::text("hello")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DialogflowClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
    protocol: String,
    language: String,
    session_id: RwLock<String>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for DialogflowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogflowClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("protocol", &self.inner.protocol)
            .field("language", &self.inner.language)
            .field("session_id", &*self.inner.session_id.read())
            .finish_non_exhaustive()
    }
}

/// Raw result of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    /// Decode the body, whatever the status code was.
    pub(crate) fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|source| {
            tracing::warn!(
                status = self.status,
                bytes = self.body.len(),
                error = %source,
                "failed to decode dialogflow response"
            );
            Error::Decode {
                status: self.status,
                source,
            }
        })
    }
}

impl DialogflowClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client from a configuration value.
    pub fn new(config: ClientConfig) -> Result<Self> {
        ClientBuilder::from_config(config).build()
    }

    /// Get the access token.
    pub fn access_token(&self) -> &str {
        &self.inner.access_token
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get the protocol version.
    pub fn protocol(&self) -> &str {
        &self.inner.protocol
    }

    /// Get the default language.
    pub fn language(&self) -> &str {
        &self.inner.language
    }

    /// Get the current session id.
    pub fn session_id(&self) -> String {
        self.inner.session_id.read().clone()
    }

    /// Replace the session id used by session-scoped operations.
    ///
    /// Requests already in flight keep the id they were built with.
    pub fn set_session_id(&self, session_id: impl Into<String>) {
        *self.inner.session_id.write() = session_id.into();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the entities API.
    pub fn entities(&self) -> EntitiesApi {
        EntitiesApi::new(self.clone())
    }

    /// Access the user entities API, scoped to the current session.
    pub fn user_entities(&self) -> UserEntitiesApi {
        UserEntitiesApi::new(self.clone())
    }

    /// Access the intents API.
    pub fn intents(&self) -> IntentsApi {
        IntentsApi::new(self.clone())
    }

    /// Access the contexts API, scoped to the current session.
    pub fn contexts(&self) -> ContextsApi {
        ContextsApi::new(self.clone())
    }

    /// Access the query API.
    pub fn query(&self) -> QueryApi {
        QueryApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build the addressed request for an operation.
    pub(crate) fn prepare(&self, options: RequestOptions) -> Result<PreparedRequest> {
        options.prepare(
            &self.inner.base_url,
            &self.inner.access_token,
            &self.inner.protocol,
        )
    }

    /// Send a request and collect the body of any completed exchange.
    pub(crate) async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        tracing::debug!(
            method = %request.method,
            path = request.url.path(),
            "sending dialogflow request"
        );

        let mut builder = self
            .inner
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!(status, bytes = body.len(), "dialogflow response received");
        Ok(RawResponse { status, body })
    }

    /// Prepare, send and decode one operation.
    pub(crate) async fn call<T: DeserializeOwned>(&self, options: RequestOptions) -> Result<T> {
        let request = self.prepare(options)?;
        self.execute(request).await?.decode()
    }
}

/// Builder for creating a [`DialogflowClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    access_token: Option<String>,
    base_url: String,
    protocol: String,
    language: String,
    session_id: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            access_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            protocol: PROTOCOL_V1.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            session_id: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Create a builder seeded from a configuration value.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            access_token: Some(config.access_token),
            base_url: config.base_url,
            protocol: config.protocol,
            language: config.language,
            session_id: config.session_id,
            ..Self::new()
        }
    }

    /// Set the agent access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the base URL of the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the protocol version (see [`PROTOCOL_V1`] and
    /// [`PROTOCOL_V2`](crate::config::PROTOCOL_V2)).
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Set the default query language.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the session id. A random one is generated otherwise.
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Bound every request by a timeout. No timeout is applied by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<DialogflowClient> {
        let access_token = self
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Config("access token is required".to_string()))?;

        let mut base_url = Url::parse(&self.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "cannot use {} as a base URL",
                self.base_url
            )));
        }
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let session_id = self
            .session_id
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("dialogflow-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder().user_agent(user_agent).build()?;

        tracing::debug!(base_url = %base_url, protocol = %self.protocol, "dialogflow client ready");

        Ok(DialogflowClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                access_token,
                protocol: self.protocol,
                language: self.language,
                session_id: RwLock::new(session_id),
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PROTOCOL_V2;
    use reqwest::Method;

    #[test]
    fn test_builder_requires_access_token() {
        let err = ClientBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("access token is required"));

        let err = ClientBuilder::new().access_token("").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder_defaults() {
        let client = DialogflowClient::builder().access_token("T").build().unwrap();

        assert_eq!(client.access_token(), "T");
        assert_eq!(client.base_url().as_str(), "https://api.dialogflow.com/v1/");
        assert_eq!(client.protocol(), "20150910");
        assert_eq!(client.language(), "en");
    }

    #[test]
    fn test_generated_session_ids_are_unique() {
        let first = DialogflowClient::builder().access_token("T").build().unwrap();
        let second = DialogflowClient::builder().access_token("T").build().unwrap();

        assert!(uuid::Uuid::parse_str(&first.session_id()).is_ok());
        assert!(uuid::Uuid::parse_str(&second.session_id()).is_ok());
        assert_ne!(first.session_id(), second.session_id());
    }

    #[test]
    fn test_explicit_session_id_is_kept() {
        let client = DialogflowClient::builder()
            .access_token("T")
            .session_id("s1")
            .build()
            .unwrap();
        assert_eq!(client.session_id(), "s1");
    }

    #[test]
    fn test_set_session_id_is_shared_by_clones() {
        let client = DialogflowClient::builder().access_token("T").build().unwrap();
        let clone = client.clone();
        client.set_session_id("s2");
        assert_eq!(clone.session_id(), "s2");
    }

    #[test]
    fn test_new_from_config() {
        let config = ClientConfig::new("T")
            .with_base_url("http://localhost:8080/api")
            .with_protocol(PROTOCOL_V2)
            .with_language("fr")
            .with_session_id("s1");
        let client = DialogflowClient::new(config).unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(client.protocol(), PROTOCOL_V2);
        assert_eq!(client.language(), "fr");
        assert_eq!(client.session_id(), "s1");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = DialogflowClient::builder()
            .access_token("T")
            .base_url("not a url")
            .build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));

        let result = DialogflowClient::builder()
            .access_token("T")
            .base_url("mailto:agent@example.com")
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_prepare_uses_client_settings() {
        let client = DialogflowClient::builder()
            .access_token("T")
            .base_url("http://localhost:8080")
            .protocol(PROTOCOL_V2)
            .build()
            .unwrap();

        let request = client
            .prepare(RequestOptions::new(Method::PUT, ["intents", "i1"]))
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "http://localhost:8080/intents/i1?v=20170712"
        );
    }

    #[test]
    fn test_decode_error_carries_status() {
        let raw = RawResponse {
            status: 500,
            body: Bytes::from_static(b"<html>oops</html>"),
        };
        let err = raw.decode::<crate::types::Entity>().unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.status(), Some(500));
    }
}
