//! # Domain Types
//!
//! The base records owned by the record store, and the status enums that
//! classify them.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐ 1   * ┌─────────────────┐                          │
//! │  │      Order      │◄──────│     Payment     │                          │
//! │  │  ─────────────  │       │  ─────────────  │                          │
//! │  │  id  ORD-###    │       │  id  PAY-###    │                          │
//! │  │  consultant ────┼──┐    │  order_id (FK)  │                          │
//! │  │  order_value    │  │    │  value          │                          │
//! │  │  order_status   │  │    └─────────────────┘                          │
//! │  └────────▲────────┘  │                                                 │
//! │           │ 1         │ by name                                         │
//! │           │ 1         ▼                                                 │
//! │  ┌────────┴────────┐  ┌─────────────────┐   ┌─────────────────┐         │
//! │  │   Commission    │  │  Salesperson    │   │  UserProfile    │         │
//! │  │  id  COM-###    │  │  id  SP-###     │   │  id  USR-###    │         │
//! │  │  rate, status   │  │  sales_goal     │   │  role           │         │
//! │  └─────────────────┘  └─────────────────┘   └─────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names are camelCase and enum values carry the Portuguese labels the
//! dashboard displays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{Money, Rate};

// =============================================================================
// Order Status
// =============================================================================

/// Business status of an order, set by hand on the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    #[serde(rename = "ATIVO")]
    Active,
    #[serde(rename = "CONCLUÍDO")]
    Completed,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

impl OrderStatus {
    /// Every status, in form order.
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Active,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Active => "ATIVO",
            OrderStatus::Completed => "CONCLUÍDO",
            OrderStatus::Cancelled => "CANCELADO",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Active
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Derived collection health of an order. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentStatus {
    #[serde(rename = "PAGAMENTO CONFIRMADO")]
    Confirmed,
    #[serde(rename = "PAGAMENTO PARCIAL")]
    Partial,
    #[serde(rename = "PAGAMENTO PENDENTE")]
    Pending,
    #[serde(rename = "PAGAMENTO EM ATRASO")]
    Overdue,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

impl PaymentStatus {
    /// Canonical order used by filters and the status chart.
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Confirmed,
        PaymentStatus::Partial,
        PaymentStatus::Pending,
        PaymentStatus::Overdue,
        PaymentStatus::Cancelled,
    ];

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Confirmed => "PAGAMENTO CONFIRMADO",
            PaymentStatus::Partial => "PAGAMENTO PARCIAL",
            PaymentStatus::Pending => "PAGAMENTO PENDENTE",
            PaymentStatus::Overdue => "PAGAMENTO EM ATRASO",
            PaymentStatus::Cancelled => "CANCELADO",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// User Role
// =============================================================================

/// Coarse access role of a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum UserRole {
    #[serde(rename = "Admin/Financeiro")]
    Admin,
    #[serde(rename = "Gestor")]
    Manager,
    #[serde(rename = "Vendedor")]
    Salesperson,
}

impl UserRole {
    pub const fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin/Financeiro",
            UserRole::Manager => "Gestor",
            UserRole::Salesperson => "Vendedor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Commission Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CommissionStatus {
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Pago")]
    Paid,
}

impl Default for CommissionStatus {
    fn default() -> Self {
        CommissionStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// A sale contract with a total value and an installment schedule.
///
/// `consultant` is the salesperson's name (a soft reference); see
/// [`crate::goals::resolve_consultant`] for the explicit lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub consultant: String,
    /// Serialized as "S"/"N".
    #[serde(with = "insurance_flag")]
    #[ts(as = "String")]
    pub insurance: bool,
    pub order_value: Money,
    pub initial_payment_percentage: Rate,
    pub down_payment_percentage: Rate,
    #[ts(as = "String")]
    pub down_payment_due_date: NaiveDate,
    pub city: String,
    #[ts(as = "String")]
    pub contract_creation_date: NaiveDate,
    #[ts(as = "String")]
    pub contract_signature_date: NaiveDate,
    pub payment_method: String,
    pub origin: String,
    pub prospected_by: String,
    #[ts(as = "Option<String>")]
    pub cancellation_date: Option<NaiveDate>,
    pub order_status: OrderStatus,
}

impl Order {
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.order_status == OrderStatus::Cancelled
    }
}

mod insurance_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "S" } else { "N" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim() {
            "S" | "s" => Ok(true),
            "N" | "n" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "insurance must be 'S' or 'N', got '{}'",
                other
            ))),
        }
    }
}

// =============================================================================
// Payment
// =============================================================================

/// One received installment against exactly one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    #[ts(as = "String")]
    pub payment_date: NaiveDate,
    pub value: Money,
}

// =============================================================================
// Salesperson
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Salesperson {
    pub id: String,
    /// Matched against `Order::consultant`.
    pub name: String,
    pub business_unit: String,
    /// Monthly sales target.
    pub sales_goal: Money,
    pub level: String,
    #[ts(as = "String")]
    pub hire_date: NaiveDate,
}

// =============================================================================
// User Profile
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

// =============================================================================
// Commission
// =============================================================================

/// A percentage-of-order-value payout owed to the consultant.
///
/// `payment_date` is present iff `status` is `Paid`
/// (see [`crate::validation::validate_commission`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Commission {
    pub id: String,
    pub order_id: String,
    pub commission_rate: Rate,
    pub status: CommissionStatus,
    #[ts(as = "Option<String>")]
    pub payment_date: Option<NaiveDate>,
}

// =============================================================================
// Unit Tests
// =============================================================================
