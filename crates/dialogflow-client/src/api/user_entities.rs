//! User entities API.

use reqwest::Method;

use super::ensure_present;
use crate::client::DialogflowClient;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::{CreateUserEntitiesRequest, QueryResponse, UserEntity};

const USER_ENTITIES: &str = "userEntities";

/// User entities API client.
///
/// User entities override developer entities for a single session.
pub struct UserEntitiesApi {
    client: DialogflowClient,
    session: String,
}

impl UserEntitiesApi {
    pub(crate) fn new(client: DialogflowClient) -> Self {
        let session = client.session_id();
        Self { client, session }
    }

    /// Scope calls to another session.
    pub fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session = session_id.into();
        self
    }

    fn options(&self, method: Method, name: Option<&str>) -> Result<RequestOptions> {
        ensure_present(self.session.is_empty(), "session cannot be empty")?;
        let segments = std::iter::once(USER_ENTITIES).chain(name);
        Ok(RequestOptions::new(method, segments).session(self.session.as_str()))
    }

    /// Create one or more user entities for the session.
    pub async fn create(&self, entities: &[UserEntity]) -> Result<QueryResponse> {
        ensure_present(entities.is_empty(), "user entities cannot be empty")?;
        let body = CreateUserEntitiesRequest {
            session_id: &self.session,
            entities,
        };
        let options = self.options(Method::POST, None)?.body(&body)?;
        self.client.call(options).await
    }

    /// Get a user entity by name.
    pub async fn get(&self, name: &str) -> Result<UserEntity> {
        ensure_present(name.is_empty(), "name cannot be empty")?;
        let options = self.options(Method::GET, Some(name))?;
        self.client.call(options).await
    }

    /// Update a user entity.
    pub async fn update(&self, name: &str, entity: &UserEntity) -> Result<QueryResponse> {
        ensure_present(
            entity.is_empty() || name.is_empty(),
            "user entity and name cannot be empty",
        )?;
        let options = self.options(Method::PUT, Some(name))?.body(entity)?;
        self.client.call(options).await
    }

    /// Delete a user entity by name.
    pub async fn delete(&self, name: &str) -> Result<QueryResponse> {
        ensure_present(name.is_empty(), "name cannot be empty")?;
        let options = self.options(Method::DELETE, Some(name))?;
        self.client.call(options).await
    }
}
