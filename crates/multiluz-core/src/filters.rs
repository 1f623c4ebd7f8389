//! # List Filters
//!
//! Search and filter rules behind the order, payment, and commission lists,
//! and the order pickers on the payment and commission forms.
//!
//! All text matching is case-insensitive substring matching. A `None`
//! criterion means "all".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use ts_rs::TS;

use crate::commission::{commissioned_order_ids, index_orders, resolve_order, CalculatedCommission, MISSING_ORDER_LABEL};
use crate::money::Money;
use crate::order::CalculatedOrder;
use crate::types::{Commission, CommissionStatus, Payment, PaymentStatus};

/// Default number of results an order picker shows.
pub const DEFAULT_PICKER_LIMIT: usize = 5;

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Normalizes a search term; blank terms become `None`.
fn normalize(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderFilter {
    pub search: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub consultant: Option<String>,
}

impl OrderFilter {
    pub fn apply(&self, orders: &[CalculatedOrder]) -> Vec<CalculatedOrder> {
        let term = normalize(self.search.as_deref());
        orders
            .iter()
            .filter(|o| {
                term.as_deref().map_or(true, |t| {
                    contains_ci(&o.order.customer_name, t)
                        || contains_ci(&o.order.id, t)
                        || contains_ci(&o.order.consultant, t)
                })
            })
            .filter(|o| self.payment_status.map_or(true, |s| o.payment_status == s))
            .filter(|o| {
                self.consultant
                    .as_deref()
                    .map_or(true, |c| o.order.consultant == c)
            })
            .cloned()
            .collect()
    }
}

// =============================================================================
// Payments
// =============================================================================

/// A payment joined with its order's customer and consultant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentRow {
    pub id: String,
    pub order_id: String,
    #[ts(as = "String")]
    pub payment_date: NaiveDate,
    pub value: Money,
    pub customer_name: String,
    pub consultant: String,
}

/// Joins payments with their orders, newest first.
///
/// Payments whose order is missing show "N/A". Same-day payments keep their
/// input order.
pub fn payment_rows(payments: &[Payment], orders: &[CalculatedOrder]) -> Vec<PaymentRow> {
    let index = index_orders(orders);
    let mut rows: Vec<PaymentRow> = payments
        .iter()
        .map(|p| {
            let (customer_name, consultant) = match resolve_order(&index, &p.order_id) {
                Some(o) => (o.order.customer_name.clone(), o.order.consultant.clone()),
                None => (MISSING_ORDER_LABEL.to_string(), MISSING_ORDER_LABEL.to_string()),
            };
            PaymentRow {
                id: p.id.clone(),
                order_id: p.order_id.clone(),
                payment_date: p.payment_date,
                value: p.value,
                customer_name,
                consultant,
            }
        })
        .collect();
    rows.sort_by_key(|row| Reverse(row.payment_date));
    rows
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentFilter {
    pub search: Option<String>,
}

impl PaymentFilter {
    pub fn apply(&self, rows: &[PaymentRow]) -> Vec<PaymentRow> {
        let Some(term) = normalize(self.search.as_deref()) else {
            return rows.to_vec();
        };
        rows.iter()
            .filter(|r| {
                contains_ci(&r.customer_name, &term)
                    || contains_ci(&r.order_id, &term)
                    || contains_ci(&r.consultant, &term)
                    || contains_ci(&r.id, &term)
            })
            .cloned()
            .collect()
    }
}

// =============================================================================
// Commissions
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommissionFilter {
    pub consultant: Option<String>,
    pub status: Option<CommissionStatus>,
}

impl CommissionFilter {
    pub fn apply(&self, rows: &[CalculatedCommission]) -> Vec<CalculatedCommission> {
        rows.iter()
            .filter(|r| self.consultant.as_deref().map_or(true, |c| r.consultant == c))
            .filter(|r| self.status.map_or(true, |s| r.status() == s))
            .cloned()
            .collect()
    }
}

/// Footer totals of the commission list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommissionTotals {
    pub total_order_value: Money,
    pub total_commission_value: Money,
}

impl CommissionTotals {
    pub fn of(rows: &[CalculatedCommission]) -> Self {
        CommissionTotals {
            total_order_value: rows.iter().map(|r| r.order_value).sum(),
            total_commission_value: rows.iter().map(|r| r.commission_value).sum(),
        }
    }
}

// =============================================================================
// Order Pickers
// =============================================================================

fn matches_picker(order: &CalculatedOrder, term: &str) -> bool {
    contains_ci(&order.order.customer_name, term) || contains_ci(&order.order.id, term)
}

/// Orders whose customer name or id matches `term`, at most `limit`.
///
/// A blank term returns nothing.
pub fn search_orders(orders: &[CalculatedOrder], term: &str, limit: usize) -> Vec<CalculatedOrder> {
    let Some(term) = normalize(Some(term)) else {
        return Vec::new();
    };
    orders
        .iter()
        .filter(|o| matches_picker(o, &term))
        .take(limit)
        .cloned()
        .collect()
}

/// Like [`search_orders`], but skips orders that already carry a commission.
///
/// The order of the commission being edited stays selectable.
pub fn commissionable_orders(
    orders: &[CalculatedOrder],
    commissions: &[Commission],
    term: &str,
    editing: Option<&Commission>,
    limit: usize,
) -> Vec<CalculatedOrder> {
    let Some(term) = normalize(Some(term)) else {
        return Vec::new();
    };
    let taken = commissioned_order_ids(commissions, editing);
    orders
        .iter()
        .filter(|o| !taken.contains(o.id()))
        .filter(|o| matches_picker(o, &term))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commission::derive_commissions;
    use crate::money::Rate;
    use crate::order::{derive_orders, StatusPolicy};
    use crate::types::{Order, OrderStatus};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, day).unwrap()
    }

    fn order(id: &str, customer: &str, consultant: &str, reais: i64) -> Order {
        Order {
            id: id.to_string(),
            customer_name: customer.to_string(),
            consultant: consultant.to_string(),
            insurance: false,
            order_value: Money::from_reais(reais),
            initial_payment_percentage: Rate::from_bps(1000),
            down_payment_percentage: Rate::from_bps(2000),
            down_payment_due_date: d(12, 1),
            city: "Salvador".to_string(),
            contract_creation_date: d(10, 1),
            contract_signature_date: d(10, 2),
            payment_method: "PIX".to_string(),
            origin: "Site".to_string(),
            prospected_by: consultant.to_string(),
            cancellation_date: None,
            order_status: OrderStatus::Active,
        }
    }

    fn payment(id: &str, order_id: &str, date: NaiveDate) -> Payment {
        Payment {
            id: id.to_string(),
            order_id: order_id.to_string(),
            payment_date: date,
            value: Money::from_reais(1_000),
        }
    }

    fn commission(id: &str, order_id: &str, status: CommissionStatus) -> Commission {
        Commission {
            id: id.to_string(),
            order_id: order_id.to_string(),
            commission_rate: Rate::from_bps(500),
            status,
            payment_date: None,
        }
    }

    fn fixture() -> (Vec<CalculatedOrder>, Vec<Payment>) {
        let orders = vec![
            order("ORD-001", "Empresa Alpha", "Ana Costa", 25_000),
            order("ORD-002", "Construtora Beta", "Bruno Gomes", 50_000),
            order("ORD-003", "Mercado Gama", "Ana Costa", 15_000),
            order("ORD-004", "Alphaville Condomínio", "Carla Dias", 120_000),
        ];
        let payments = vec![
            payment("PAY-001", "ORD-001", d(10, 10)),
            payment("PAY-002", "ORD-002", d(10, 12)),
            payment("PAY-003", "ORD-404", d(11, 1)),
            payment("PAY-004", "ORD-002", d(10, 12)),
        ];
        let calculated = derive_orders(&orders, &payments, d(11, 10), &StatusPolicy::default());
        (calculated, payments)
    }

    #[test]
    fn test_order_filter_combines_criteria() {
        let (orders, _) = fixture();

        let by_search = OrderFilter {
            search: Some("ALPHA".to_string()),
            ..Default::default()
        };
        assert_eq!(by_search.apply(&orders).len(), 2);

        let by_consultant_text = OrderFilter {
            search: Some("costa".to_string()),
            ..Default::default()
        };
        assert_eq!(by_consultant_text.apply(&orders).len(), 2);

        let combined = OrderFilter {
            search: Some("alpha".to_string()),
            payment_status: Some(PaymentStatus::Pending),
            consultant: Some("Carla Dias".to_string()),
        };
        let hits = combined.apply(&orders);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), "ORD-004");

        assert_eq!(OrderFilter::default().apply(&orders).len(), 4);
    }

    #[test]
    fn test_payment_rows_sorted_newest_first_with_sentinel() {
        let (orders, payments) = fixture();
        let rows = payment_rows(&payments, &orders);

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["PAY-003", "PAY-002", "PAY-004", "PAY-001"]);
        assert_eq!(rows[0].customer_name, "N/A");
        assert_eq!(rows[0].consultant, "N/A");
        assert_eq!(rows[1].customer_name, "Construtora Beta");
    }

    #[test]
    fn test_payment_filter_matches_payment_id_and_consultant() {
        let (orders, payments) = fixture();
        let rows = payment_rows(&payments, &orders);

        let by_id = PaymentFilter { search: Some("pay-004".to_string()) };
        assert_eq!(by_id.apply(&rows).len(), 1);

        let by_consultant = PaymentFilter { search: Some("bruno".to_string()) };
        assert_eq!(by_consultant.apply(&rows).len(), 2);

        let blank = PaymentFilter { search: Some("  ".to_string()) };
        assert_eq!(blank.apply(&rows).len(), 4);
    }

    #[test]
    fn test_commission_filter_and_totals() {
        let (orders, _) = fixture();
        let commissions = vec![
            commission("COM-001", "ORD-001", CommissionStatus::Paid),
            commission("COM-002", "ORD-002", CommissionStatus::Pending),
            commission("COM-003", "ORD-003", CommissionStatus::Pending),
        ];
        let rows = derive_commissions(&commissions, &orders);

        let ana_pending = CommissionFilter {
            consultant: Some("Ana Costa".to_string()),
            status: Some(CommissionStatus::Pending),
        };
        let hits = ana_pending.apply(&rows);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), "COM-003");

        let totals = CommissionTotals::of(&rows);
        assert_eq!(totals.total_order_value, Money::from_reais(90_000));
        assert_eq!(totals.total_commission_value, Money::from_reais(4_500));
    }

    #[test]
    fn test_search_orders_blank_and_limit() {
        let (orders, _) = fixture();
        assert!(search_orders(&orders, "", DEFAULT_PICKER_LIMIT).is_empty());
        assert!(search_orders(&orders, "   ", DEFAULT_PICKER_LIMIT).is_empty());
        assert_eq!(search_orders(&orders, "ord-", DEFAULT_PICKER_LIMIT).len(), 4);
        assert_eq!(search_orders(&orders, "ord-", 2).len(), 2);
        // Consultant is not a picker field.
        assert!(search_orders(&orders, "Bruno", DEFAULT_PICKER_LIMIT).is_empty());
    }

    #[test]
    fn test_commissionable_orders_excludes_taken_except_edited() {
        let (orders, _) = fixture();
        let commissions = vec![
            commission("COM-001", "ORD-001", CommissionStatus::Paid),
            commission("COM-002", "ORD-002", CommissionStatus::Pending),
        ];

        let creating = commissionable_orders(&orders, &commissions, "ord", None, 5);
        let ids: Vec<&str> = creating.iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec!["ORD-003", "ORD-004"]);

        let editing = commissionable_orders(&orders, &commissions, "ord", Some(&commissions[0]), 5);
        let ids: Vec<&str> = editing.iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec!["ORD-001", "ORD-003", "ORD-004"]);
    }
}
