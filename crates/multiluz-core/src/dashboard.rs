//! # Dashboard KPIs
//!
//! Headline figures and chart series for the dashboard view.
//!
//! ```text
//! visible orders ───┬─► total_orders, total_balance
//!                   ├─► sales_by_consultant  (Σ order value, desc)
//!                   └─► orders_by_status     (canonical status order)
//! visible payments ─┴─► received_this_month  (month AND year of today)
//! ```
//!
//! Callers pass the already-scoped sets from [`crate::visibility`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use ts_rs::TS;

use crate::money::Money;
use crate::order::CalculatedOrder;
use crate::types::{Payment, PaymentStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ConsultantSales {
    pub consultant: String,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusCount {
    pub status: PaymentStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub received_this_month: Money,
    pub total_balance: Money,
    pub sales_by_consultant: Vec<ConsultantSales>,
    pub orders_by_status: Vec<StatusCount>,
}

/// Builds the dashboard figures for `today`.
pub fn dashboard_summary(
    orders: &[CalculatedOrder],
    payments: &[Payment],
    today: NaiveDate,
) -> DashboardSummary {
    let received_this_month = payments
        .iter()
        .filter(|p| p.payment_date.month() == today.month() && p.payment_date.year() == today.year())
        .map(|p| p.value)
        .sum();

    let total_balance = orders.iter().map(|o| o.current_balance).sum();

    DashboardSummary {
        total_orders: orders.len(),
        received_this_month,
        total_balance,
        sales_by_consultant: sales_by_consultant(orders),
        orders_by_status: orders_by_status(orders),
    }
}

/// Σ order value per consultant, largest first; ties keep first appearance.
pub fn sales_by_consultant(orders: &[CalculatedOrder]) -> Vec<ConsultantSales> {
    let mut series: Vec<ConsultantSales> = Vec::new();
    for order in orders {
        match series.iter_mut().find(|s| s.consultant == order.order.consultant) {
            Some(entry) => entry.total += order.order.order_value,
            None => series.push(ConsultantSales {
                consultant: order.order.consultant.clone(),
                total: order.order.order_value,
            }),
        }
    }
    series.sort_by_key(|s| Reverse(s.total));
    series
}

/// Order count per payment status, zero counts omitted.
pub fn orders_by_status(orders: &[CalculatedOrder]) -> Vec<StatusCount> {
    PaymentStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: orders.iter().filter(|o| o.payment_status == status).count(),
        })
        .filter(|entry| entry.count > 0)
        .collect()
}
