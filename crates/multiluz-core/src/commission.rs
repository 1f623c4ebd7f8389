//! # Commission Derivation
//!
//! Joins a commission with its calculated order and prices the payout.
//!
//! ```text
//! Commission { order_id, rate } ──► lookup order_id ──┬── found ──► order_value × rate
//!                                                     └── missing ─► "N/A", 0, 0
//! ```
//!
//! A dangling `order_id` never fails the read: the row degrades to a
//! sentinel so the list still renders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::order::CalculatedOrder;
use crate::types::{Commission, CommissionStatus};

/// Label shown in place of customer/consultant when the order is missing.
pub const MISSING_ORDER_LABEL: &str = "N/A";

/// Calculated orders keyed by order id.
pub type OrderIndex<'a> = HashMap<&'a str, &'a CalculatedOrder>;

/// Builds the id lookup used by [`derive_commission`].
pub fn index_orders(orders: &[CalculatedOrder]) -> OrderIndex<'_> {
    orders.iter().map(|o| (o.id(), o)).collect()
}

/// Explicit resolution step for an order reference.
pub fn resolve_order<'a>(index: &OrderIndex<'a>, order_id: &str) -> Option<&'a CalculatedOrder> {
    index.get(order_id).copied()
}

/// A commission joined with the order it pays out on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CalculatedCommission {
    #[serde(flatten)]
    pub commission: Commission,
    pub customer_name: String,
    pub consultant: String,
    pub order_value: Money,
    pub commission_value: Money,
}

impl CalculatedCommission {
    #[inline]
    pub fn id(&self) -> &str {
        &self.commission.id
    }

    #[inline]
    pub fn status(&self) -> CommissionStatus {
        self.commission.status
    }

    #[inline]
    pub fn payment_date(&self) -> Option<NaiveDate> {
        self.commission.payment_date
    }

    /// True when the referenced order could not be resolved.
    pub fn is_orphaned(&self) -> bool {
        self.customer_name == MISSING_ORDER_LABEL && self.order_value.is_zero()
    }
}

/// Derives one commission row.
pub fn derive_commission(commission: &Commission, orders: &OrderIndex<'_>) -> CalculatedCommission {
    let (customer_name, consultant, order_value) = match resolve_order(orders, &commission.order_id) {
        Some(order) => (
            order.order.customer_name.clone(),
            order.order.consultant.clone(),
            order.order.order_value,
        ),
        None => (
            MISSING_ORDER_LABEL.to_string(),
            MISSING_ORDER_LABEL.to_string(),
            Money::zero(),
        ),
    };

    CalculatedCommission {
        commission: commission.clone(),
        customer_name,
        consultant,
        order_value,
        commission_value: order_value.apply_rate(commission.commission_rate),
    }
}

/// Derives every commission, largest order value first.
///
/// Ties keep their original sequence.
pub fn derive_commissions(
    commissions: &[Commission],
    orders: &[CalculatedOrder],
) -> Vec<CalculatedCommission> {
    let index = index_orders(orders);
    let mut rows: Vec<CalculatedCommission> = commissions
        .iter()
        .map(|c| derive_commission(c, &index))
        .collect();
    rows.sort_by_key(|row| Reverse(row.order_value));
    rows
}

// =============================================================================
// One Commission Per Order
// =============================================================================

/// Order ids that already carry a commission.
///
/// When editing, the edited commission's own order is exempt so it stays
/// selectable.
pub fn commissioned_order_ids<'a>(
    commissions: &'a [Commission],
    editing: Option<&Commission>,
) -> HashSet<&'a str> {
    let exempt = editing.map(|c| c.order_id.as_str());
    commissions
        .iter()
        .map(|c| c.order_id.as_str())
        .filter(|order_id| Some(*order_id) != exempt)
        .collect()
}

/// Rejects a commission on an order that another commission already covers.
///
/// `editing_id` names the commission being edited, which may keep its order.
pub fn ensure_order_uncommissioned(
    commissions: &[Commission],
    order_id: &str,
    editing_id: Option<&str>,
) -> CoreResult<()> {
    match commissions
        .iter()
        .find(|c| c.order_id == order_id && Some(c.id.as_str()) != editing_id)
    {
        Some(existing) => Err(CoreError::OrderAlreadyCommissioned {
            order_id: order_id.to_string(),
            commission_id: existing.id.clone(),
        }),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
