//! # Commission Repository
//!
//! Commissions, at most one per order. The check runs under the table's
//! write lock, so two actors cannot both commission the same order.

use tracing::debug;

use multiluz_core::commission::ensure_order_uncommissioned;
use multiluz_core::Commission;

use crate::error::StoreResult;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct CommissionRepository {
    table: Table<Commission>,
}

impl CommissionRepository {
    pub fn new(table: Table<Commission>) -> Self {
        CommissionRepository { table }
    }

    pub fn list(&self) -> Vec<Commission> {
        self.table.list()
    }

    pub fn get(&self, id: &str) -> StoreResult<Commission> {
        self.table.get(id)
    }

    pub fn for_order(&self, order_id: &str) -> Option<Commission> {
        self.table
            .with_rows(|rows| rows.iter().find(|c| c.order_id == order_id).cloned())
    }

    /// Stores a new commission unless its order already has one.
    pub fn create(&self, commission: Commission) -> StoreResult<Commission> {
        let created = self.table.create_checked(commission, |rows, new| {
            ensure_order_uncommissioned(rows, &new.order_id, None).map_err(Into::into)
        })?;
        debug!(commission_id = %created.id, order_id = %created.order_id, "Commission created");
        Ok(created)
    }

    /// Replaces a commission. Moving it to an order that another commission
    /// covers is rejected; keeping its own order is fine.
    pub fn update(&self, commission: Commission) -> StoreResult<Commission> {
        let updated = self.table.update_checked(commission, |rows, edited| {
            ensure_order_uncommissioned(rows, &edited.order_id, Some(edited.id.as_str())).map_err(Into::into)
        })?;
        debug!(commission_id = %updated.id, status = ?updated.status, "Commission updated");
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> StoreResult<Commission> {
        let removed = self.table.delete(id)?;
        debug!(commission_id = %id, "Commission deleted");
        Ok(removed)
    }
}
