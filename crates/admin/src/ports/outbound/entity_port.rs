//! Entity Create Port - object-safe create boundary
//!
//! The payload is a JSON value built by the draft itself, so one port serves
//! every wizard regardless of the entity type behind it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use backoffice_domain::EntityId;
use serde_json::Value;
use thiserror::Error;

/// Entity returned by a successful create call
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedEntity {
    pub id: EntityId,
    /// Full response body, for callers that want more than the id
    pub body: Value,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CreateError {
    /// The backend validated the payload and refused it. Field errors are
    /// reported as-is; they are not mapped back onto wizard steps.
    #[error("Create rejected: {message}")]
    Rejected {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    /// Network or protocol failure
    #[error("Create request failed: {0}")]
    Transport(String),

    /// The payload could not be built from the draft
    #[error("Invalid create payload: {0}")]
    InvalidPayload(String),
}

/// Port for creating entities
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EntityCreatePort: Send + Sync {
    /// Create an entity of the given type from a fully resolved payload
    async fn create(&self, entity_type: &str, payload: Value)
        -> Result<CreatedEntity, CreateError>;
}
