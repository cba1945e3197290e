//! Contexts API.

use reqwest::Method;

use super::ensure_present;
use crate::client::DialogflowClient;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::{Context, QueryResponse};

const CONTEXTS: &str = "contexts";

/// Contexts API client.
///
/// Every call is scoped to a session, the client's current one unless
/// [`ContextsApi::session`] picks another.
pub struct ContextsApi {
    client: DialogflowClient,
    session: String,
}

impl ContextsApi {
    pub(crate) fn new(client: DialogflowClient) -> Self {
        let session = client.session_id();
        Self { client, session }
    }

    /// Scope calls to another session.
    pub fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session = session_id.into();
        self
    }

    fn options<'a>(
        &self,
        method: Method,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<RequestOptions> {
        ensure_present(self.session.is_empty(), "session cannot be empty")?;
        Ok(RequestOptions::new(method, segments).session(self.session.as_str()))
    }

    /// List the active contexts of the session.
    pub async fn list(&self) -> Result<Vec<Context>> {
        let options = self.options(Method::GET, [CONTEXTS])?;
        self.client.call(options).await
    }

    /// Get a context by name.
    pub async fn get(&self, name: &str) -> Result<Context> {
        ensure_present(name.is_empty(), "ctx cannot be empty")?;
        let options = self.options(Method::GET, [CONTEXTS, name])?;
        self.client.call(options).await
    }

    /// Activate contexts for the session.
    pub async fn create(&self, contexts: &[Context]) -> Result<QueryResponse> {
        ensure_present(contexts.is_empty(), "contexts cannot be empty")?;
        let options = self.options(Method::POST, [CONTEXTS])?.body(contexts)?;
        self.client.call(options).await
    }

    /// Delete every context of the session.
    pub async fn delete_all(&self) -> Result<QueryResponse> {
        let options = self.options(Method::DELETE, [CONTEXTS])?;
        self.client.call(options).await
    }

    /// Delete a context by name.
    pub async fn delete(&self, name: &str) -> Result<QueryResponse> {
        ensure_present(name.is_empty(), "ctx cannot be empty")?;
        let options = self.options(Method::DELETE, [CONTEXTS, name])?;
        self.client.call(options).await
    }
}
