//! Intents API.

use reqwest::Method;

use super::ensure_present;
use crate::client::DialogflowClient;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::{Intent, IntentSummary, QueryResponse};

const INTENTS: &str = "intents";

/// Intents API client.
pub struct IntentsApi {
    client: DialogflowClient,
}

impl IntentsApi {
    pub(crate) fn new(client: DialogflowClient) -> Self {
        Self { client }
    }

    /// List all intents of the agent.
    pub async fn list(&self) -> Result<Vec<IntentSummary>> {
        self.client
            .call(RequestOptions::new(Method::GET, [INTENTS]))
            .await
    }

    /// Get an intent by ID.
    pub async fn get(&self, id: &str) -> Result<Intent> {
        ensure_present(id.is_empty(), "id cannot be empty")?;
        self.client
            .call(RequestOptions::new(Method::GET, [INTENTS, id]))
            .await
    }

    /// Create a new intent.
    pub async fn create(&self, intent: &Intent) -> Result<QueryResponse> {
        ensure_present(intent.is_empty(), "intent cannot be empty")?;
        self.client
            .call(RequestOptions::new(Method::POST, [INTENTS]).body(intent)?)
            .await
    }

    /// Update an intent.
    pub async fn update(&self, id: &str, intent: &Intent) -> Result<QueryResponse> {
        ensure_present(
            intent.is_empty() || id.is_empty(),
            "intent and id cannot be empty",
        )?;
        self.client
            .call(RequestOptions::new(Method::PUT, [INTENTS, id]).body(intent)?)
            .await
    }

    /// Delete an intent.
    pub async fn delete(&self, id: &str) -> Result<QueryResponse> {
        ensure_present(id.is_empty(), "id cannot be empty")?;
        self.client
            .call(RequestOptions::new(Method::DELETE, [INTENTS, id]))
            .await
    }
}
