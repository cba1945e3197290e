//! Entities API.

use reqwest::Method;

use super::ensure_present;
use crate::client::DialogflowClient;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::{Entity, Entry, QueryResponse};

const ENTITIES: &str = "entities";
const ENTRIES: &str = "entries";

/// Entities API client.
pub struct EntitiesApi {
    client: DialogflowClient,
}

impl EntitiesApi {
    pub(crate) fn new(client: DialogflowClient) -> Self {
        Self { client }
    }

    /// List all entities of the agent.
    pub async fn list(&self) -> Result<Vec<Entity>> {
        self.client
            .call(RequestOptions::new(Method::GET, [ENTITIES]))
            .await
    }

    /// Get an entity by ID.
    pub async fn get(&self, id: &str) -> Result<Entity> {
        ensure_present(id.is_empty(), "id cannot be empty")?;
        self.client
            .call(RequestOptions::new(Method::GET, [ENTITIES, id]))
            .await
    }

    /// Create a new entity.
    pub async fn create(&self, entity: &Entity) -> Result<QueryResponse> {
        ensure_present(entity.is_empty(), "entity cannot be empty")?;
        self.client
            .call(RequestOptions::new(Method::POST, [ENTITIES]).body(entity)?)
            .await
    }

    /// Add entries to an entity.
    pub async fn add_entries(&self, id: &str, entries: &[Entry]) -> Result<QueryResponse> {
        ensure_present(
            entries.is_empty() || id.is_empty(),
            "entries and id cannot be empty",
        )?;
        self.client
            .call(RequestOptions::new(Method::POST, [ENTITIES, id, ENTRIES]).body(entries)?)
            .await
    }

    /// Create or update several entities at once.
    pub async fn update_all(&self, entities: &[Entity]) -> Result<QueryResponse> {
        ensure_present(entities.is_empty(), "entities cannot be empty")?;
        self.client
            .call(RequestOptions::new(Method::PUT, [ENTITIES]).body(entities)?)
            .await
    }

    /// Update an entity.
    pub async fn update(&self, id: &str, entity: &Entity) -> Result<QueryResponse> {
        ensure_present(
            entity.is_empty() || id.is_empty(),
            "entity and id cannot be empty",
        )?;
        self.client
            .call(RequestOptions::new(Method::PUT, [ENTITIES, id]).body(entity)?)
            .await
    }

    /// Replace the entries of an entity.
    pub async fn update_entries(&self, id: &str, entries: &[Entry]) -> Result<QueryResponse> {
        ensure_present(
            entries.is_empty() || id.is_empty(),
            "entries and id cannot be empty",
        )?;
        self.client
            .call(RequestOptions::new(Method::PUT, [ENTITIES, id, ENTRIES]).body(entries)?)
            .await
    }

    /// Delete an entity.
    pub async fn delete(&self, id: &str) -> Result<QueryResponse> {
        ensure_present(id.is_empty(), "id cannot be empty")?;
        self.client
            .call(RequestOptions::new(Method::DELETE, [ENTITIES, id]))
            .await
    }

    /// Delete entries of an entity by reference value.
    pub async fn delete_entries<S: AsRef<str>>(
        &self,
        id: &str,
        values: &[S],
    ) -> Result<QueryResponse> {
        ensure_present(
            values.is_empty() || values.iter().any(|v| v.as_ref().is_empty()) || id.is_empty(),
            "values and id cannot be empty",
        )?;
        let values: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
        self.client
            .call(RequestOptions::new(Method::DELETE, [ENTITIES, id, ENTRIES]).body(&values)?)
            .await
    }
}
