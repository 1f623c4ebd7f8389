//! # Store Error Types
//!
//! Error types for record store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError / ValidationError (multiluz-core)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds missing-record and duplicate cases     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (backoffice) ← Serialized for the frontend                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use multiluz_core::{CoreError, ValidationError};
use thiserror::Error;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    ///
    /// ## When This Occurs
    /// - Update or delete of an id that does not exist
    /// - Id already deleted by another actor
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A record with this id is already stored.
    ///
    /// ## When This Occurs
    /// - Seeding two records with the same id
    #[error("Duplicate {entity}: '{id}' already exists")]
    Duplicate { entity: String, id: String },

    /// Business rule violation (e.g., second commission for an order).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::Duplicate {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
