//! # Error Types
//!
//! Domain-specific error types for multiluz-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  multiluz-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations at the edit surface   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  multiluz-store errors (separate crate)                                │
//! │  └── StoreError       - Missing records, duplicates                    │
//! │                                                                         │
//! │  backoffice errors (in app)                                            │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Frontend  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The derivations themselves never fail: malformed business data produces
//! a defined (possibly degenerate) result instead of an error.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised at the edit surface.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The order already has a commission; an order is commissioned once.
    #[error("Order {order_id} already has commission {commission_id}")]
    OrderAlreadyCommissioned {
        order_id: String,
        commission_id: String,
    },

    /// A config list does not contain the item being renamed or removed.
    #[error("'{value}' is not an item of {list}")]
    UnknownConfigItem { list: String, value: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before a record reaches the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed e-mail).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields disagree (e.g., a paid commission without a payment date).
    #[error("{field} is inconsistent: {reason}")]
    Inconsistent { field: String, reason: String },

    /// Duplicate value (e.g., a config item already in its list).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
