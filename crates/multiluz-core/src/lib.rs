//! # multiluz-core: Pure Business Logic for the Multiluz Back-Office
//!
//! This crate is the **heart** of the Multiluz Solar sales/finance
//! back-office. It turns stored orders, payments, and commissions into the
//! financial views the dashboard shows, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Multiluz Back-Office Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (dashboard)                         │   │
//! │  │   Dashboard ─ Orders ─ Payments ─ Commissions ─ Settings        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    backoffice (session + commands)              │   │
//! │  │   visible_orders, dashboard, commissions, add_payment, etc.     │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────┐  ┌────────▼───────────────────┐   │
//! │  │   ★ multiluz-core (THIS CRATE) ★│  │  multiluz-store            │   │
//! │  │                                 │  │  in-memory repositories,   │   │
//! │  │  order ─ commission ─ goals     │  │  id counters, cascades     │   │
//! │  │  visibility ─ dashboard         │  └────────────────────────────┘   │
//! │  │  filters ─ config_lists         │                                   │
//! │  │                                 │                                   │
//! │  │  NO I/O • NO CLOCK • PURE       │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (Order, Payment, Salesperson, UserProfile, Commission)
//! - [`money`] - Money in centavos and rates in basis points
//! - [`order`] - Order derivation engine and payment-status state machine
//! - [`commission`] - Commission derivation and the one-per-order rule
//! - [`goals`] - Monthly sales-goal attainment
//! - [`visibility`] - Role-based scoping of orders and payments
//! - [`dashboard`] - Dashboard KPIs and chart series
//! - [`filters`] - List filters and order pickers
//! - [`config_lists`] - Editable dropdown lists
//! - [`validation`] - Boundary validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: "today" is a parameter; same input, same output
//! 2. **Total Derivations**: malformed data degrades, it never errors
//! 3. **Integer Money**: all monetary values are centavos (i64)
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use multiluz_core::order::{derive_order, StatusPolicy};
//! use multiluz_core::{Money, Order, OrderStatus, Payment, PaymentStatus, Rate};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2023, 10, d).unwrap();
//! let order = Order {
//!     id: "ORD-002".into(),
//!     customer_name: "Construtora Beta".into(),
//!     consultant: "Bruno Gomes".into(),
//!     insurance: false,
//!     order_value: Money::from_reais(50_000),
//!     initial_payment_percentage: Rate::from_bps(1500),
//!     down_payment_percentage: Rate::from_bps(3000),
//!     down_payment_due_date: day(30),
//!     city: "Rio de Janeiro".into(),
//!     contract_creation_date: day(3),
//!     contract_signature_date: day(8),
//!     payment_method: "Transferência".into(),
//!     origin: "Website".into(),
//!     prospected_by: "Marketing".into(),
//!     cancellation_date: None,
//!     order_status: OrderStatus::Active,
//! };
//! let payment = Payment {
//!     id: "PAY-002".into(),
//!     order_id: "ORD-002".into(),
//!     payment_date: day(12),
//!     value: Money::from_reais(7_500),
//! };
//!
//! let calc = derive_order(&order, &[payment], day(30), &StatusPolicy::default());
//! assert_eq!(calc.current_balance, Money::from_reais(42_500));
//! assert_eq!(calc.payment_status, PaymentStatus::Partial);
//! assert_eq!(calc.initial_payment_date, Some(day(12)));
//! assert_eq!(calc.payment_date_80, None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commission;
pub mod config_lists;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod goals;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;
pub mod visibility;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use commission::{CalculatedCommission, MISSING_ORDER_LABEL};
pub use config_lists::{AppConfiguration, ConfigList, ConfigRename};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use order::{CalculatedOrder, PartialThreshold, StatusPolicy};
pub use types::*;
pub use visibility::Viewer;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Id prefixes per record kind. Ids are `PREFIX-###`, zero-padded to three
/// digits and widening past 999.
pub mod id_prefix {
    pub const ORDER: &str = "ORD";
    pub const PAYMENT: &str = "PAY";
    pub const SALESPERSON: &str = "SP";
    pub const PROFILE: &str = "USR";
    pub const COMMISSION: &str = "COM";
}

/// Formats a record id, e.g. `format_id("ORD", 7)` is `ORD-007`.
pub fn format_id(prefix: &str, seq: u64) -> String {
    format!("{}-{:03}", prefix, seq)
}

/// Parses the sequence number out of an id with the given prefix.
pub fn parse_id(prefix: &str, id: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.strip_prefix('-')?.parse().ok()
}
