//! Query API.

use reqwest::Method;

use super::ensure_present;
use crate::client::DialogflowClient;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::{Query, QueryResponse};

const QUERY: &str = "query";

/// Query API client.
///
/// Missing protocol version, language and session id on a [`Query`] are
/// filled from the client before the request is sent.
pub struct QueryApi {
    client: DialogflowClient,
    session: String,
}

impl QueryApi {
    pub(crate) fn new(client: DialogflowClient) -> Self {
        let session = client.session_id();
        Self { client, session }
    }

    /// Use another session for queries that do not name one.
    pub fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session = session_id.into();
        self
    }

    /// Send a query as URL parameters of a GET request.
    pub async fn get(&self, query: Query) -> Result<QueryResponse> {
        let query = self.complete(query)?;
        let options = RequestOptions::new(Method::GET, [QUERY]).params(query.to_params());
        self.client.call(options).await
    }

    /// Send a query as the JSON body of a POST request.
    pub async fn post(&self, query: Query) -> Result<QueryResponse> {
        let query = self.complete(query)?;
        let options = RequestOptions::new(Method::POST, [QUERY]).body(&query)?;
        self.client.call(options).await
    }

    /// Send a text query with GET.
    pub async fn text(&self, text: &str) -> Result<QueryResponse> {
        self.get(Query::text(text)).await
    }

    fn complete(&self, mut query: Query) -> Result<Query> {
        query.drop_shadowing_params();
        if query.session_id.is_empty() {
            query.session_id = self.session.clone();
        }
        ensure_present(query.session_id.is_empty(), "session cannot be empty")?;
        ensure_present(query.is_empty(), "query cannot be empty")?;

        if query.v.is_empty() {
            query.v = self.client.protocol().to_string();
        }
        if query.lang.is_empty() {
            query.lang = self.client.language().to_string();
        }
        Ok(query)
    }
}
