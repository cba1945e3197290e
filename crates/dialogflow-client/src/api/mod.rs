//! API endpoint implementations.

mod contexts;
mod entities;
mod intents;
mod query;
mod user_entities;

pub use contexts::ContextsApi;
pub use entities::EntitiesApi;
pub use intents::IntentsApi;
pub use query::QueryApi;
pub use user_entities::UserEntitiesApi;

use crate::error::{Error, Result};

/// Fail with a validation error when `missing` holds.
fn ensure_present(missing: bool, message: &str) -> Result<()> {
    if missing {
        Err(Error::validation(message))
    } else {
        Ok(())
    }
}
