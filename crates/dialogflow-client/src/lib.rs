//! Typed HTTP client for the Dialogflow agent-management API.
//!
//! Authenticate once with an agent access token, then manage entities,
//! intents, contexts and user entities, or send natural-language queries.
//!
//! # Example
//!
//! ```no_run
//! use dialogflow_client::{Context, DialogflowClient, Entity, Entry, Query, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = DialogflowClient::builder()
//!     .access_token("<agent token>")
//!     .build()?;
//!
//! // Create an entity
//! let fruit = Entity::new("fruit", vec![Entry::new("apple", ["apple", "green apple"])]);
//! client.entities().create(&fruit).await?;
//!
//! // Activate a context for the current session
//! client.contexts().create(&[Context::new("shopping", 5)]).await?;
//!
//! // Ask the agent something
//! let response = client.query().get(Query::text("I want an apple")).await?;
//! println!("{}", response.speech().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Entities**: list, get, create, update, delete, manage entries
//! - **User entities**: session-scoped entity overrides
//! - **Intents**: list, get, create, update, delete
//! - **Contexts**: list, get, create, delete for a session
//! - **Query**: GET (URL parameters) or POST (JSON body)
//!
//! Each operation is a single request/response round trip. Required
//! identifiers and payloads are validated before anything is sent. The HTTP
//! status code is never inspected: any completed exchange is decoded, and API
//! failures show up in [`QueryResponse::status`].

pub mod api;
pub mod client;
pub mod config;
pub mod error;
mod request;
pub mod types;

pub use client::{ClientBuilder, DialogflowClient};
pub use config::{ClientConfig, PROTOCOL_V1, PROTOCOL_V2};
pub use error::{Error, Result};
pub use types::*;
