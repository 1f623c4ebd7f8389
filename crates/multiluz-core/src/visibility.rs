//! # Visibility Scoping
//!
//! Salespeople see only their own orders and the payments against them.
//! Admins and managers see everything. Every listing, summary, and chart
//! goes through these two functions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::order::CalculatedOrder;
use crate::types::{Payment, UserProfile, UserRole};

/// The acting identity, as far as scoping is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Viewer {
    pub name: String,
    pub role: UserRole,
}

impl Viewer {
    pub fn new(name: impl Into<String>, role: UserRole) -> Self {
        Viewer {
            name: name.into(),
            role,
        }
    }

    /// True when this viewer is restricted to their own orders.
    #[inline]
    pub fn is_scoped(&self) -> bool {
        self.role == UserRole::Salesperson
    }

    /// Whether an order with this consultant is visible.
    pub fn can_see_consultant(&self, consultant: &str) -> bool {
        !self.is_scoped() || self.name == consultant
    }
}

impl From<&UserProfile> for Viewer {
    fn from(profile: &UserProfile) -> Self {
        Viewer::new(profile.name.clone(), profile.role)
    }
}

/// Orders the viewer may see, in input order.
pub fn scope_orders(viewer: &Viewer, orders: &[CalculatedOrder]) -> Vec<CalculatedOrder> {
    orders
        .iter()
        .filter(|o| viewer.can_see_consultant(&o.order.consultant))
        .cloned()
        .collect()
}

/// Payments whose order is in `visible_orders`.
///
/// Pass the output of [`scope_orders`]; unscoped viewers get every payment,
/// including payments whose order no longer exists.
pub fn scope_payments(
    viewer: &Viewer,
    visible_orders: &[CalculatedOrder],
    payments: &[Payment],
) -> Vec<Payment> {
    if !viewer.is_scoped() {
        return payments.to_vec();
    }
    let ids: HashSet<&str> = visible_orders.iter().map(|o| o.id()).collect();
    payments
        .iter()
        .filter(|p| ids.contains(p.order_id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Money, Rate};
    use crate::order::{derive_orders, StatusPolicy};
    use crate::types::{Order, OrderStatus};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 10).unwrap()
    }

    fn order(id: &str, consultant: &str) -> Order {
        Order {
            id: id.to_string(),
            customer_name: format!("Cliente {}", id),
            consultant: consultant.to_string(),
            insurance: false,
            order_value: Money::from_reais(10_000),
            initial_payment_percentage: Rate::from_bps(1000),
            down_payment_percentage: Rate::from_bps(2000),
            down_payment_due_date: today(),
            city: "Recife".to_string(),
            contract_creation_date: today(),
            contract_signature_date: today(),
            payment_method: "PIX".to_string(),
            origin: "Site".to_string(),
            prospected_by: consultant.to_string(),
            cancellation_date: None,
            order_status: OrderStatus::Active,
        }
    }

    fn payment(id: &str, order_id: &str) -> Payment {
        Payment {
            id: id.to_string(),
            order_id: order_id.to_string(),
            payment_date: today(),
            value: Money::from_reais(100),
        }
    }

    fn fixture() -> (Vec<CalculatedOrder>, Vec<Payment>) {
        let orders = vec![
            order("ORD-001", "Ana Costa"),
            order("ORD-002", "Bruno Gomes"),
            order("ORD-003", "Ana Costa"),
        ];
        let payments = vec![
            payment("PAY-001", "ORD-001"),
            payment("PAY-002", "ORD-002"),
            payment("PAY-003", "ORD-003"),
            payment("PAY-004", "ORD-999"),
        ];
        let calculated = derive_orders(&orders, &payments, today(), &StatusPolicy::default());
        (calculated, payments)
    }

    #[test]
    fn test_salesperson_sees_only_own_orders_and_payments() {
        let (orders, payments) = fixture();
        let viewer = Viewer::new("Ana Costa", UserRole::Salesperson);

        let visible = scope_orders(&viewer, &orders);
        let ids: Vec<&str> = visible.iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec!["ORD-001", "ORD-003"]);

        let visible_payments = scope_payments(&viewer, &visible, &payments);
        let pay_ids: Vec<&str> = visible_payments.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(pay_ids, vec!["PAY-001", "PAY-003"]);
    }

    #[test]
    fn test_admin_and_manager_see_everything() {
        let (orders, payments) = fixture();
        for role in [UserRole::Admin, UserRole::Manager] {
            let viewer = Viewer::new("Qualquer", role);
            let visible = scope_orders(&viewer, &orders);
            assert_eq!(visible.len(), 3);
            assert_eq!(scope_payments(&viewer, &visible, &payments).len(), 4);
        }
    }

    #[test]
    fn test_salesperson_without_orders_sees_nothing() {
        let (orders, payments) = fixture();
        let viewer = Viewer::new("Elisa Melo", UserRole::Salesperson);
        let visible = scope_orders(&viewer, &orders);
        assert!(visible.is_empty());
        assert!(scope_payments(&viewer, &visible, &payments).is_empty());
    }
}
