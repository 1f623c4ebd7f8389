//! # Payment Repository
//!
//! Received installments. Each payment references exactly one order by id.

use tracing::debug;

use multiluz_core::Payment;

use crate::error::StoreResult;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct PaymentRepository {
    table: Table<Payment>,
}

impl PaymentRepository {
    pub fn new(table: Table<Payment>) -> Self {
        PaymentRepository { table }
    }

    pub fn list(&self) -> Vec<Payment> {
        self.table.list()
    }

    pub fn get(&self, id: &str) -> StoreResult<Payment> {
        self.table.get(id)
    }

    /// Payments against one order, in recording order.
    pub fn for_order(&self, order_id: &str) -> Vec<Payment> {
        self.table.with_rows(|rows| {
            rows.iter()
                .filter(|p| p.order_id == order_id)
                .cloned()
                .collect()
        })
    }

    pub fn create(&self, payment: Payment) -> Payment {
        let created = self.table.create(payment);
        debug!(
            payment_id = %created.id,
            order_id = %created.order_id,
            value = %created.value,
            "Payment recorded"
        );
        created
    }

    pub fn update(&self, payment: Payment) -> StoreResult<Payment> {
        let updated = self.table.update(payment)?;
        debug!(payment_id = %updated.id, value = %updated.value, "Payment updated");
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> StoreResult<Payment> {
        let removed = self.table.delete(id)?;
        debug!(payment_id = %id, order_id = %removed.order_id, "Payment deleted");
        Ok(removed)
    }
}
