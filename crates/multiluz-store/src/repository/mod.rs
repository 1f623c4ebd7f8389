//! # Repository Module
//!
//! Per-entity repositories over the in-memory tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Backoffice command                                                     │
//! │       │                                                                 │
//! │       │  store.payments().for_order("ORD-002")                          │
//! │       ▼                                                                 │
//! │  PaymentRepository                                                      │
//! │  ├── list / get                                                         │
//! │  ├── create (id assigned here)                                          │
//! │  ├── update / delete                                                    │
//! │  └── for_order                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Table<Payment>  (Arc<RwLock<..>>, shared with every clone)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`OrderRepository`] - Orders
//! - [`PaymentRepository`] - Payments
//! - [`SalespersonRepository`] - Salespeople
//! - [`ProfileRepository`] - User profiles
//! - [`CommissionRepository`] - Commissions (one per order)
//! - [`ConfigRepository`] - Configuration lists with rename cascade

pub mod commission;
pub mod config;
pub mod order;
pub mod payment;
pub mod profile;
pub mod salesperson;

pub use commission::CommissionRepository;
pub use config::ConfigRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use profile::ProfileRepository;
pub use salesperson::SalespersonRepository;
