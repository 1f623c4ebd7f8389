//! # Sales-Goal Attainment
//!
//! Monthly sales per salesperson against their monthly goal.
//!
//! An order counts toward a salesperson when its `consultant` matches their
//! name, its contract was signed in the reference month, and it is not
//! cancelled. The percentage is capped at 100.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Order, Salesperson};

/// One row of the attainment chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AttainmentRow {
    pub name: String,
    pub monthly_sales: Money,
    pub sales_goal: Money,
    /// 0..=100, display only.
    pub percentage: f64,
}

/// Resolves an order's consultant name to a salesperson record.
pub fn resolve_consultant<'a>(salespeople: &'a [Salesperson], consultant: &str) -> Option<&'a Salesperson> {
    salespeople.iter().find(|sp| sp.name == consultant)
}

/// Sum of non-cancelled order values for `name` signed in `month`/`year`.
pub fn monthly_sales(orders: &[Order], name: &str, month: u32, year: i32) -> Money {
    orders
        .iter()
        .filter(|o| o.consultant == name && !o.is_cancelled())
        .filter(|o| {
            o.contract_signature_date.month() == month && o.contract_signature_date.year() == year
        })
        .map(|o| o.order_value)
        .sum()
}

fn attainment_percentage(sales: Money, goal: Money) -> f64 {
    if !goal.is_positive() {
        return 0.0;
    }
    sales.percent_of(goal).clamp(0.0, 100.0)
}

/// Attainment for every salesperson, highest monthly sales first.
///
/// `month` is 1-based. Ties keep the salespeople's original order.
pub fn derive_goal_attainment(
    orders: &[Order],
    salespeople: &[Salesperson],
    month: u32,
    year: i32,
) -> Vec<AttainmentRow> {
    let mut rows: Vec<AttainmentRow> = salespeople
        .iter()
        .map(|sp| {
            let sales = monthly_sales(orders, &sp.name, month, year);
            AttainmentRow {
                name: sp.name.clone(),
                monthly_sales: sales,
                sales_goal: sp.sales_goal,
                percentage: attainment_percentage(sales, sp.sales_goal),
            }
        })
        .collect();

    rows.sort_by_key(|row| Reverse(row.monthly_sales));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Rate;
    use crate::types::OrderStatus;
    use chrono::NaiveDate;

    fn salesperson(name: &str, goal: i64) -> Salesperson {
        Salesperson {
            id: format!("SP-{}", name.len()),
            name: name.to_string(),
            business_unit: "Matriz".to_string(),
            sales_goal: Money::from_reais(goal),
            level: "Pleno".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2022, 1, 10).unwrap(),
        }
    }

    fn order(consultant: &str, reais: i64, signed: NaiveDate, status: OrderStatus) -> Order {
        Order {
            id: "ORD-001".to_string(),
            customer_name: "Cliente".to_string(),
            consultant: consultant.to_string(),
            insurance: false,
            order_value: Money::from_reais(reais),
            initial_payment_percentage: Rate::from_bps(1000),
            down_payment_percentage: Rate::from_bps(2000),
            down_payment_due_date: signed,
            city: "Campinas".to_string(),
            contract_creation_date: signed,
            contract_signature_date: signed,
            payment_method: "PIX".to_string(),
            origin: "Site".to_string(),
            prospected_by: consultant.to_string(),
            cancellation_date: None,
            order_status: status,
        }
    }

    fn oct(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, day).unwrap()
    }

    #[test]
    fn test_only_signed_in_month_and_not_cancelled() {
        let people = vec![salesperson("Ana Costa", 100_000)];
        let orders = vec![
            order("Ana Costa", 25_000, oct(5), OrderStatus::Active),
            order("Ana Costa", 10_000, oct(20), OrderStatus::Completed),
            order("Ana Costa", 40_000, oct(7), OrderStatus::Cancelled),
            order("Ana Costa", 99_000, NaiveDate::from_ymd_opt(2023, 9, 30).unwrap(), OrderStatus::Active),
            order("Ana Costa", 99_000, NaiveDate::from_ymd_opt(2022, 10, 5).unwrap(), OrderStatus::Active),
            order("Bruno Gomes", 50_000, oct(5), OrderStatus::Active),
        ];

        let rows = derive_goal_attainment(&orders, &people, 10, 2023);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].monthly_sales, Money::from_reais(35_000));
        assert!((rows[0].percentage - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_capped_at_100() {
        let people = vec![salesperson("Carla Dias", 75_000)];
        let orders = vec![order("Carla Dias", 120_000, oct(2), OrderStatus::Active)];

        let rows = derive_goal_attainment(&orders, &people, 10, 2023);
        assert_eq!(rows[0].percentage, 100.0);
        assert_eq!(rows[0].monthly_sales, Money::from_reais(120_000));
    }

    #[test]
    fn test_zero_goal_yields_zero_percentage() {
        let people = vec![salesperson("Diego Lima", 0)];
        let orders = vec![order("Diego Lima", 5_000, oct(2), OrderStatus::Active)];

        let rows = derive_goal_attainment(&orders, &people, 10, 2023);
        assert_eq!(rows[0].percentage, 0.0);
    }

    #[test]
    fn test_sorted_by_monthly_sales_desc() {
        let people = vec![
            salesperson("Ana Costa", 100_000),
            salesperson("Bruno Gomes", 80_000),
            salesperson("Elisa Melo", 250_000),
            salesperson("Carla Dias", 120_000),
        ];
        let orders = vec![
            order("Ana Costa", 25_000, oct(1), OrderStatus::Active),
            order("Bruno Gomes", 50_000, oct(1), OrderStatus::Active),
        ];

        let rows = derive_goal_attainment(&orders, &people, 10, 2023);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bruno Gomes", "Ana Costa", "Elisa Melo", "Carla Dias"]);
        assert!(rows.iter().all(|r| (0.0..=100.0).contains(&r.percentage)));
    }

    #[test]
    fn test_resolve_consultant() {
        let people = vec![salesperson("Ana Costa", 1), salesperson("Bruno Gomes", 1)];
        assert_eq!(resolve_consultant(&people, "Bruno Gomes").map(|sp| sp.sales_goal), Some(Money::from_reais(1)));
        assert!(resolve_consultant(&people, "Desconhecido").is_none());
    }
}
