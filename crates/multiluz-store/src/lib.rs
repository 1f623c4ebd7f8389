//! # multiluz-store: Record Store for the Multiluz Back-Office
//!
//! Holds the base records in shared in-memory tables. Nothing derived is
//! stored: balances, statuses and commission values are recomputed by
//! `multiluz-core` from what lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Multiluz Data Flow                                 │
//! │                                                                         │
//! │  Backoffice command (add_payment)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 multiluz-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │    Store      │    │  Repositories │    │    Seed      │   │   │
//! │  │   │  (store.rs)   │    │ (repository/) │    │  (seed.rs)   │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ Table<T> ×5   │◄───│ OrderRepo     │    │ demo_store() │   │   │
//! │  │   │ config lists  │    │ PaymentRepo   │    │              │   │   │
//! │  │   │               │    │ ConfigRepo    │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  multiluz-core derivations (derive_orders, derive_commissions, ...)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The store handle
//! - [`table`] - Generic table with monotonic id assignment
//! - [`repository`] - Per-entity repositories and the config cascade
//! - [`seed`] - Demo data set
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use multiluz_store::seed::demo_store;
//!
//! let today = NaiveDate::from_ymd_opt(2023, 11, 10).unwrap();
//! let store = demo_store(today).unwrap();
//!
//! assert_eq!(store.payments().for_order("ORD-002").len(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;
pub mod table;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::Store;
pub use table::{Record, Table};

// Repository re-exports for convenience
pub use repository::config::RenameOutcome;
pub use repository::{
    CommissionRepository, ConfigRepository, OrderRepository, PaymentRepository,
    ProfileRepository, SalespersonRepository,
};
