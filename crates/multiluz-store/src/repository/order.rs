//! # Order Repository
//!
//! Stored orders. Derived financials are never stored here; callers run
//! [`multiluz_core::order::derive_orders`] over [`OrderRepository::list`].

use tracing::debug;

use multiluz_core::Order;

use crate::error::StoreResult;
use crate::table::Table;

/// Repository for orders.
///
/// ## Usage
/// ```rust
/// use multiluz_store::Store;
///
/// let store = Store::new();
/// assert!(store.orders().list().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    table: Table<Order>,
}

impl OrderRepository {
    pub fn new(table: Table<Order>) -> Self {
        OrderRepository { table }
    }

    /// All orders, in creation order.
    pub fn list(&self) -> Vec<Order> {
        self.table.list()
    }

    pub fn get(&self, id: &str) -> StoreResult<Order> {
        self.table.get(id)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.table.exists(id)
    }

    /// Orders credited to a consultant.
    pub fn by_consultant(&self, consultant: &str) -> Vec<Order> {
        self.table.with_rows(|rows| {
            rows.iter()
                .filter(|o| o.consultant == consultant)
                .cloned()
                .collect()
        })
    }

    /// Stores a new order under the next `ORD-###` id.
    pub fn create(&self, order: Order) -> Order {
        let created = self.table.create(order);
        debug!(order_id = %created.id, consultant = %created.consultant, "Order created");
        created
    }

    pub fn update(&self, order: Order) -> StoreResult<Order> {
        let updated = self.table.update(order)?;
        debug!(order_id = %updated.id, status = %updated.order_status, "Order updated");
        Ok(updated)
    }

    /// Removes an order. Its payments and commissions stay and show as
    /// orphaned ("N/A") until removed.
    pub fn delete(&self, id: &str) -> StoreResult<Order> {
        let removed = self.table.delete(id)?;
        debug!(order_id = %id, "Order deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use multiluz_core::{Money, OrderStatus, Rate};

    fn order(consultant: &str) -> Order {
        let day = NaiveDate::from_ymd_opt(2023, 10, 5).unwrap();
        Order {
            id: String::new(),
            customer_name: "Empresa Alpha".to_string(),
            consultant: consultant.to_string(),
            insurance: true,
            order_value: Money::from_reais(25_000),
            initial_payment_percentage: Rate::from_bps(1000),
            down_payment_percentage: Rate::from_bps(2000),
            down_payment_due_date: day,
            city: "São Paulo".to_string(),
            contract_creation_date: day,
            contract_signature_date: day,
            payment_method: "Boleto".to_string(),
            origin: "Indicação".to_string(),
            prospected_by: consultant.to_string(),
            cancellation_date: None,
            order_status: OrderStatus::Active,
        }
    }

    #[test]
    fn test_crud_round() {
        let repo = OrderRepository::new(Table::new());
        let created = repo.create(order("Ana Costa"));
        assert_eq!(created.id, "ORD-001");

        let cancelled = Order {
            order_status: OrderStatus::Cancelled,
            cancellation_date: Some(NaiveDate::from_ymd_opt(2023, 10, 20).unwrap()),
            ..created.clone()
        };
        repo.update(cancelled).unwrap();
        assert_eq!(repo.get("ORD-001").unwrap().order_status, OrderStatus::Cancelled);

        repo.delete("ORD-001").unwrap();
        assert!(!repo.exists("ORD-001"));
        assert_eq!(repo.create(order("Ana Costa")).id, "ORD-002");
    }

    #[test]
    fn test_by_consultant() {
        let repo = OrderRepository::new(Table::new());
        repo.create(order("Ana Costa"));
        repo.create(order("Bruno Gomes"));
        repo.create(order("Ana Costa"));

        let ids: Vec<String> = repo.by_consultant("Ana Costa").into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["ORD-001", "ORD-003"]);
    }
}
