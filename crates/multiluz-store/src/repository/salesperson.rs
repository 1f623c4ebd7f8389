//! # Salesperson Repository

use tracing::debug;

use multiluz_core::Salesperson;

use crate::error::StoreResult;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct SalespersonRepository {
    table: Table<Salesperson>,
}

impl SalespersonRepository {
    pub fn new(table: Table<Salesperson>) -> Self {
        SalespersonRepository { table }
    }

    pub fn list(&self) -> Vec<Salesperson> {
        self.table.list()
    }

    pub fn get(&self, id: &str) -> StoreResult<Salesperson> {
        self.table.get(id)
    }

    /// Looks up the salesperson an order's `consultant` refers to.
    pub fn find_by_name(&self, name: &str) -> Option<Salesperson> {
        self.table
            .with_rows(|rows| rows.iter().find(|sp| sp.name == name).cloned())
    }

    pub fn create(&self, salesperson: Salesperson) -> Salesperson {
        let created = self.table.create(salesperson);
        debug!(salesperson_id = %created.id, name = %created.name, "Salesperson created");
        created
    }

    /// Replaces a salesperson. Orders keep the consultant name they were
    /// created with.
    pub fn update(&self, salesperson: Salesperson) -> StoreResult<Salesperson> {
        let updated = self.table.update(salesperson)?;
        debug!(salesperson_id = %updated.id, "Salesperson updated");
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> StoreResult<Salesperson> {
        let removed = self.table.delete(id)?;
        debug!(salesperson_id = %id, name = %removed.name, "Salesperson deleted");
        Ok(removed)
    }
}
