//! # Store Handle
//!
//! The single entry point to every table.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Store                                      │
//! │                                                                         │
//! │   orders ────────┐                                                      │
//! │   payments       │  Table<T> = Arc<RwLock<rows + id counter>>           │
//! │   salespeople ───┤                                                      │
//! │   profiles       │  Cloning the Store clones the Arcs: every clone      │
//! │   commissions    │  sees the same records.                              │
//! │   config ────────┘                                                      │
//! │                                                                         │
//! │   store.orders()      → OrderRepository                                 │
//! │   store.config()      → ConfigRepository (needs orders + salespeople    │
//! │                          for the rename cascade)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, RwLock};

use tracing::info;

use multiluz_core::{AppConfiguration, Commission, Order, Payment, Salesperson, UserProfile};

use crate::repository::{
    CommissionRepository, ConfigRepository, OrderRepository, PaymentRepository,
    ProfileRepository, SalespersonRepository,
};
use crate::table::Table;

/// Main store handle providing repository access.
///
/// ## Usage
/// ```rust
/// use multiluz_store::Store;
///
/// let store = Store::new();
/// let shared = store.clone();
/// assert_eq!(store.orders().list().len(), shared.orders().list().len());
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    orders: Table<Order>,
    payments: Table<Payment>,
    salespeople: Table<Salesperson>,
    profiles: Table<UserProfile>,
    commissions: Table<Commission>,
    config: Arc<RwLock<AppConfiguration>>,
}

impl Store {
    /// Empty store. Order statuses are pre-filled with the typed labels.
    pub fn new() -> Self {
        Store::with_config(AppConfiguration::with_order_statuses())
    }

    pub fn with_config(config: AppConfiguration) -> Self {
        info!("Opening in-memory record store");
        Store {
            orders: Table::new(),
            payments: Table::new(),
            salespeople: Table::new(),
            profiles: Table::new(),
            commissions: Table::new(),
            config: Arc::new(RwLock::new(config)),
        }
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.orders.clone())
    }

    pub fn payments(&self) -> PaymentRepository {
        PaymentRepository::new(self.payments.clone())
    }

    pub fn salespeople(&self) -> SalespersonRepository {
        SalespersonRepository::new(self.salespeople.clone())
    }

    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(self.profiles.clone())
    }

    pub fn commissions(&self) -> CommissionRepository {
        CommissionRepository::new(self.commissions.clone())
    }

    pub fn config(&self) -> ConfigRepository {
        ConfigRepository::new(
            Arc::clone(&self.config),
            self.orders.clone(),
            self.salespeople.clone(),
        )
    }

    pub(crate) fn order_table(&self) -> &Table<Order> {
        &self.orders
    }

    pub(crate) fn payment_table(&self) -> &Table<Payment> {
        &self.payments
    }

    pub(crate) fn salesperson_table(&self) -> &Table<Salesperson> {
        &self.salespeople
    }

    pub(crate) fn profile_table(&self) -> &Table<UserProfile> {
        &self.profiles
    }

    pub(crate) fn commission_table(&self) -> &Table<Commission> {
        &self.commissions
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}
