//! # Order Derivation Engine
//!
//! Computes an order's financial state from its current payment set.
//! Nothing computed here is ever stored: every read recomputes it.
//!
//! ## Derivation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Order + Payments[order_id == order.id]                                │
//! │       │                                                                 │
//! │       ├──► received        = Σ value                                   │
//! │       ├──► current_balance = order_value - received                    │
//! │       ├──► goals           = order_value × down / initial percentage   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stable sort by payment_date, walk with a running total                │
//! │       │                                                                 │
//! │       ├──► first_payment_date                                          │
//! │       ├──► initial_payment_date  (running ≥ initial_payment_value)     │
//! │       ├──► payment_date_80       (running ≥ 80% of order_value)        │
//! │       └──► payment_date_100      (running ≥ order_value)               │
//! │                                                                         │
//! │  payment_status (precedence, first match wins):                        │
//! │    Cancelled ─► Overdue ─► Confirmed ─► Partial ─► Pending             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::money::{Money, Rate};
use crate::types::{Order, Payment, PaymentStatus};

/// The 80% collection milestone.
pub const MILESTONE_80: Rate = Rate::from_bps(8000);

/// Days past the down-payment due date before an unpaid order is overdue.
pub const DEFAULT_OVERDUE_GRACE_DAYS: u32 = 3;

// =============================================================================
// Status Policy
// =============================================================================

/// What a non-zero receipt must reach before the order counts as Partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PartialThreshold {
    /// Any `received > 0` is Partial.
    #[default]
    AnyReceipt,
    /// Partial only once `received >= down_payment_goal`; below that the
    /// order stays Pending.
    DownPaymentReached,
}

/// Tunables of the payment-status state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusPolicy {
    pub overdue_grace_days: u32,
    pub partial_threshold: PartialThreshold,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        StatusPolicy {
            overdue_grace_days: DEFAULT_OVERDUE_GRACE_DAYS,
            partial_threshold: PartialThreshold::AnyReceipt,
        }
    }
}

// =============================================================================
// Calculated Order
// =============================================================================

/// Read-only projection of an order and its payments.
///
/// ## Invariants
/// - `current_balance + received == order.order_value`
/// - each milestone date, when set, is the date of the payment whose
///   running total first reached that threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CalculatedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub received: Money,
    pub current_balance: Money,
    pub down_payment_goal: Money,
    pub initial_payment_value: Money,
    #[ts(as = "Option<String>")]
    pub first_payment_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub initial_payment_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub payment_date_80: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub payment_date_100: Option<NaiveDate>,
    pub payment_status: PaymentStatus,
}

impl CalculatedOrder {
    #[inline]
    pub fn id(&self) -> &str {
        &self.order.id
    }

    /// Share of the order value already received, for display.
    pub fn received_percentage(&self) -> f64 {
        self.received.percent_of(self.order.order_value)
    }
}

/// Running-total milestones over a chronologically sorted payment walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Milestones {
    initial: Option<NaiveDate>,
    eighty: Option<NaiveDate>,
    full: Option<NaiveDate>,
}

fn walk_milestones(sorted: &[&Payment], order: &Order) -> Milestones {
    let mut milestones = Milestones::default();
    let mut cumulative_received = Money::zero();
    let value = order.order_value;

    for payment in sorted {
        cumulative_received += payment.value;
        if milestones.initial.is_none() && cumulative_received.reaches_share_of(value, order.initial_payment_percentage) {
            milestones.initial = Some(payment.payment_date);
        }
        if milestones.eighty.is_none() && cumulative_received.reaches_share_of(value, MILESTONE_80) {
            milestones.eighty = Some(payment.payment_date);
        }
        if milestones.full.is_none() && cumulative_received.reaches_share_of(value, Rate::FULL) {
            milestones.full = Some(payment.payment_date);
        }
    }

    milestones
}

// =============================================================================
// Derivation
// =============================================================================

/// Derives the financial state of one order.
///
/// Payments belonging to other orders are ignored, so the caller may pass
/// an unfiltered slice. `today` is the reference calendar date (the caller
/// owns the clock and the reference timezone).
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use multiluz_core::order::{derive_order, StatusPolicy};
/// # use multiluz_core::{Money, Rate, Order, OrderStatus, Payment, PaymentStatus};
/// # let date = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
/// # let order = Order {
/// #     id: "ORD-001".into(), customer_name: "Empresa Alpha".into(),
/// #     consultant: "Ana Costa".into(), insurance: false,
/// #     order_value: Money::from_reais(1_000),
/// #     initial_payment_percentage: Rate::from_bps(1000),
/// #     down_payment_percentage: Rate::from_bps(2000),
/// #     down_payment_due_date: date(20), city: "Campinas".into(),
/// #     contract_creation_date: date(1), contract_signature_date: date(2),
/// #     payment_method: "Pix".into(), origin: "Website".into(),
/// #     prospected_by: "Ana Costa".into(), cancellation_date: None,
/// #     order_status: OrderStatus::Active,
/// # };
/// let payments = vec![Payment {
///     id: "PAY-001".into(),
///     order_id: "ORD-001".into(),
///     payment_date: date(10),
///     value: Money::from_reais(1_000),
/// }];
///
/// let calculated = derive_order(&order, &payments, date(15), &StatusPolicy::default());
/// assert_eq!(calculated.payment_status, PaymentStatus::Confirmed);
/// assert_eq!(calculated.payment_date_100, Some(date(10)));
/// ```
pub fn derive_order(
    order: &Order,
    payments: &[Payment],
    today: NaiveDate,
    policy: &StatusPolicy,
) -> CalculatedOrder {
    let mut related: Vec<&Payment> = payments.iter().filter(|p| p.order_id == order.id).collect();

    let received: Money = related.iter().map(|p| p.value).sum();
    let current_balance = order.order_value - received;
    let down_payment_goal = order.order_value.apply_rate(order.down_payment_percentage);
    let initial_payment_value = order.order_value.apply_rate(order.initial_payment_percentage);

    // sort_by_key is stable: same-day payments keep insertion order
    related.sort_by_key(|p| p.payment_date);

    let milestones = walk_milestones(&related, order);

    let payment_status = payment_status(
        order,
        PaymentFacts {
            received,
            current_balance,
            down_payment_goal,
            payment_count: related.len(),
        },
        today,
        policy,
    );

    CalculatedOrder {
        order: order.clone(),
        received,
        current_balance,
        down_payment_goal,
        initial_payment_value,
        first_payment_date: related.first().map(|p| p.payment_date),
        initial_payment_date: milestones.initial,
        payment_date_80: milestones.eighty,
        payment_date_100: milestones.full,
        payment_status,
    }
}

/// Derives every order against the full payment list, preserving order
/// sequence.
pub fn derive_orders(
    orders: &[Order],
    payments: &[Payment],
    today: NaiveDate,
    policy: &StatusPolicy,
) -> Vec<CalculatedOrder> {
    let mut by_order: HashMap<&str, Vec<Payment>> = HashMap::new();
    for payment in payments {
        by_order
            .entry(payment.order_id.as_str())
            .or_default()
            .push(payment.clone());
    }

    orders
        .iter()
        .map(|order| {
            let related = by_order
                .get(order.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            derive_order(order, related, today, policy)
        })
        .collect()
}

/// Payment facts the status state machine consumes.
#[derive(Debug, Clone, Copy)]
struct PaymentFacts {
    received: Money,
    current_balance: Money,
    down_payment_goal: Money,
    payment_count: usize,
}

fn payment_status(
    order: &Order,
    facts: PaymentFacts,
    today: NaiveDate,
    policy: &StatusPolicy,
) -> PaymentStatus {
    if order.is_cancelled() {
        return PaymentStatus::Cancelled;
    }

    if facts.payment_count == 0 && is_past_grace(order.down_payment_due_date, today, policy) {
        return PaymentStatus::Overdue;
    }

    if !facts.current_balance.is_positive() && order.order_value.is_positive() {
        return PaymentStatus::Confirmed;
    }

    if facts.received.is_positive() {
        let reached = match policy.partial_threshold {
            PartialThreshold::AnyReceipt => true,
            PartialThreshold::DownPaymentReached => facts.received >= facts.down_payment_goal,
        };
        if reached {
            return PaymentStatus::Partial;
        }
    }

    PaymentStatus::Pending
}

/// True when `due` is strictly more than the grace period before `today`.
fn is_past_grace(due: NaiveDate, today: NaiveDate, policy: &StatusPolicy) -> bool {
    today
        .checked_sub_days(Days::new(u64::from(policy.overdue_grace_days)))
        .map_or(false, |cutoff| due < cutoff)
}

// =============================================================================
// Unit Tests
// =============================================================================
