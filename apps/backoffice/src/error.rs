//! # API Error Type
//!
//! Unified error type for backoffice commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Back-Office                        │
//! │                                                                         │
//! │  Command (add_payment)                                                  │
//! │       │                                                                 │
//! │       ├── role check ───────── FORBIDDEN                                │
//! │       ├── validate_payment ─── ValidationError ──► VALIDATION_ERROR     │
//! │       ├── store.payments() ─── StoreError::NotFound ──► NOT_FOUND       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Result<T, ApiError>  ──►  { "code": "...", "message": "..." }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use multiluz_core::{CoreError, ValidationError};
use multiluz_store::StoreError;

/// Message shown when the acting user tries to delete their own profile.
pub const SELF_DELETE_MESSAGE: &str = "Você não pode excluir seu próprio perfil.";

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Order not found: ORD-042"
/// }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Resource not found, or not visible to the acting user
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Value already exists (config item, seeded id)
    Duplicate,

    /// The acting user's role does not allow the action
    Forbidden,

    /// Acting user tried to delete their own profile
    SelfDelete,

    /// Business rule violated (e.g. second commission for an order)
    BusinessRule,

    /// Startup or configuration failure
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }

    pub fn self_delete() -> Self {
        ApiError::new(ErrorCode::SelfDelete, SELF_DELETE_MESSAGE)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Duplicate { .. } => ApiError::new(ErrorCode::Duplicate, err.to_string()),
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OrderAlreadyCommissioned { .. } => {
                ApiError::new(ErrorCode::BusinessRule, err.to_string())
            }
            CoreError::UnknownConfigItem { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Duplicate { .. } => ApiError::new(ErrorCode::Duplicate, err.to_string()),
            StoreError::Core(e) => ApiError::from(e),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(ApiError::self_delete()).unwrap();
        assert_eq!(json["code"], "SELF_DELETE");
        assert_eq!(json["message"], "Você não pode excluir seu próprio perfil.");
    }

    #[test]
    fn test_store_errors_map_to_codes() {
        let not_found = ApiError::from(StoreError::not_found("Order", "ORD-042"));
        assert_eq!(not_found.code, ErrorCode::NotFound);
        assert_eq!(not_found.message, "Order not found: ORD-042");

        let taken = ApiError::from(StoreError::Core(CoreError::OrderAlreadyCommissioned {
            order_id: "ORD-001".into(),
            commission_id: "COM-001".into(),
        }));
        assert_eq!(taken.code, ErrorCode::BusinessRule);

        let dup = ApiError::from(StoreError::from(ValidationError::Duplicate {
            field: "paymentMethods".into(),
            value: "Pix".into(),
        }));
        assert_eq!(dup.code, ErrorCode::Duplicate);

        let blank = ApiError::from(ValidationError::Required { field: "name".into() });
        assert_eq!(blank.code, ErrorCode::ValidationError);
    }
}
