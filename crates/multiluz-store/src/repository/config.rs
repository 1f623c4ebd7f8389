//! # Configuration Repository
//!
//! The dropdown lists, plus the cascade that keeps referencing records in
//! step with a rename.
//!
//! ## Rename Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rename(BusinessUnits, "Matriz", "Sede")                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppConfiguration::rename  ── rejects blank / unchanged / duplicate     │
//! │       │ ConfigRename                                                    │
//! │       ▼                                                                 │
//! │  cascade_target()                                                       │
//! │  ├── BusinessUnits      → Salesperson.business_unit                     │
//! │  ├── SalespersonLevels  → Salesperson.level                             │
//! │  ├── PaymentMethods     → Order.payment_method                          │
//! │  ├── OrderOrigins       → Order.origin                                  │
//! │  └── OrderStatuses      → (labels only, no records)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The config lock is held while the cascade runs, so two renames of the
//! same list cannot interleave.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use multiluz_core::config_lists::CascadeTarget;
use multiluz_core::{AppConfiguration, ConfigList, ConfigRename, Order, Salesperson};

use crate::error::StoreResult;
use crate::table::Table;

/// Outcome of a rename: the event and how many records followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub rename: ConfigRename,
    pub records_updated: usize,
}

#[derive(Debug, Clone)]
pub struct ConfigRepository {
    config: Arc<RwLock<AppConfiguration>>,
    orders: Table<Order>,
    salespeople: Table<Salesperson>,
}

impl ConfigRepository {
    pub fn new(
        config: Arc<RwLock<AppConfiguration>>,
        orders: Table<Order>,
        salespeople: Table<Salesperson>,
    ) -> Self {
        ConfigRepository {
            config,
            orders,
            salespeople,
        }
    }

    /// Snapshot of every list.
    pub fn get(&self) -> AppConfiguration {
        self.config.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn items(&self, list: ConfigList) -> Vec<String> {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items(list)
            .to_vec()
    }

    /// Replaces every list at once (seeding).
    pub fn replace(&self, config: AppConfiguration) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    pub fn add(&self, list: ConfigList, value: &str) -> StoreResult<String> {
        let added = self
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(list, value)?;
        debug!(list = %list, value = %added, "Config item added");
        Ok(added)
    }

    /// Renames an item and rewrites the records that carry the old value.
    pub fn rename(&self, list: ConfigList, old_value: &str, new_value: &str) -> StoreResult<RenameOutcome> {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let rename = config.rename(list, old_value, new_value)?;
        let records_updated = self.cascade(&rename);
        drop(config);

        info!(
            list = %list,
            old = %rename.old_value,
            new = %rename.new_value,
            records_updated,
            "Config item renamed"
        );
        Ok(RenameOutcome {
            rename,
            records_updated,
        })
    }

    /// Removes an item. Records that already use it keep the text.
    pub fn remove(&self, list: ConfigList, value: &str) -> StoreResult<()> {
        self.config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(list, value)?;
        debug!(list = %list, value = %value, "Config item removed");
        Ok(())
    }

    fn cascade(&self, rename: &ConfigRename) -> usize {
        let old = rename.old_value.as_str();
        let new = rename.new_value.as_str();

        match rename.list.cascade_target() {
            Some(CascadeTarget::SalespersonBusinessUnit) => self
                .salespeople
                .update_where(|sp| sp.business_unit == old, |sp| sp.business_unit = new.to_string()),
            Some(CascadeTarget::SalespersonLevel) => self
                .salespeople
                .update_where(|sp| sp.level == old, |sp| sp.level = new.to_string()),
            Some(CascadeTarget::OrderPaymentMethod) => self
                .orders
                .update_where(|o| o.payment_method == old, |o| o.payment_method = new.to_string()),
            Some(CascadeTarget::OrderOrigin) => self
                .orders
                .update_where(|o| o.origin == old, |o| o.origin = new.to_string()),
            None => 0,
        }
    }
}
