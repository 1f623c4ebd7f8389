//! # Commands Module
//!
//! Everything the dashboard frontend can ask of the back-office.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (Backoffice handle, shared reads)
//! ├── session.rs      ◄─── Acting user and navigation
//! ├── orders.rs       ◄─── Order list, detail, pickers, CRUD
//! ├── payments.rs     ◄─── Payment list and CRUD
//! ├── commissions.rs  ◄─── Commission list, totals, CRUD
//! ├── people.rs       ◄─── Salespeople and profiles
//! ├── dashboard.rs    ◄─── KPIs and goal attainment
//! └── settings.rs     ◄─── Configuration lists
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  backoffice.add_payment(payment)                                        │
//! │         │                                                               │
//! │         ├── session.viewer()        who is acting                       │
//! │         ├── permissions::require    may they do it                      │
//! │         ├── validate_payment        is the input well-formed            │
//! │         ├── store.payments().create mutate the base record              │
//! │         ▼                                                               │
//! │  derive_orders(store, today)        derived views are always            │
//! │                                     recomputed, never stored            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commissions;
pub mod dashboard;
pub mod orders;
pub mod payments;
pub mod people;
pub mod session;
pub mod settings;

use chrono::NaiveDate;
use tracing::info;

use multiluz_core::order::derive_orders;
use multiluz_core::visibility::{scope_orders, scope_payments};
use multiluz_core::{CalculatedOrder, Payment, UserProfile, UserRole, Viewer};
use multiluz_store::Store;

use crate::error::{ApiError, ApiResult};
use crate::permissions::{require, Action};
use crate::state::{BackofficeConfig, SessionState, StoreState};

/// Profile created when the store holds none, so there is always someone
/// to act as.
fn bootstrap_admin() -> UserProfile {
    UserProfile {
        id: String::new(),
        name: "Administrador".to_string(),
        email: "admin@multiluz.com".to_string(),
        role: UserRole::Admin,
    }
}

/// The back-office: store, configuration and session in one handle.
#[derive(Debug, Clone)]
pub struct Backoffice {
    store: StoreState,
    config: BackofficeConfig,
    session: SessionState,
}

impl Backoffice {
    /// Starts a session as the first stored profile.
    pub fn new(store: StoreState, config: BackofficeConfig) -> Self {
        let profiles = store.inner().profiles();
        let acting = match profiles.first() {
            Some(profile) => profile,
            None => {
                let created = profiles.create(bootstrap_admin());
                info!(profile_id = %created.id, "No profiles stored, created an administrator");
                created
            }
        };

        info!(profile_id = %acting.id, role = %acting.role, "Session started");
        Backoffice {
            session: SessionState::new(&acting),
            store,
            config,
        }
    }

    /// Opens the store per `config` and starts a session.
    pub fn open(config: BackofficeConfig) -> ApiResult<Self> {
        Ok(Backoffice::new(StoreState::open(&config)?, config))
    }

    pub fn config(&self) -> &BackofficeConfig {
        &self.config
    }

    pub fn session_state(&self) -> &SessionState {
        &self.session
    }

    pub(crate) fn store(&self) -> &Store {
        self.store.inner()
    }

    pub(crate) fn viewer(&self) -> Viewer {
        self.session.viewer()
    }

    /// Fails unless the acting user may perform `action`.
    pub(crate) fn require(&self, action: Action) -> ApiResult<Viewer> {
        let viewer = self.viewer();
        require(viewer.role, action)?;
        Ok(viewer)
    }

    /// Reference calendar date for every day-based rule.
    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }

    // =========================================================================
    // Derived Reads
    // =========================================================================

    /// Every order with its financial state, ignoring visibility.
    pub fn calculated_orders(&self) -> Vec<CalculatedOrder> {
        derive_orders(
            &self.store().orders().list(),
            &self.store().payments().list(),
            self.today(),
            &self.config.status_policy(),
        )
    }

    /// Orders the acting user may see.
    pub fn visible_orders(&self) -> Vec<CalculatedOrder> {
        scope_orders(&self.viewer(), &self.calculated_orders())
    }

    /// Payments the acting user may see.
    pub fn visible_payments(&self) -> Vec<Payment> {
        let viewer = self.viewer();
        let visible = scope_orders(&viewer, &self.calculated_orders());
        scope_payments(&viewer, &visible, &self.store().payments().list())
    }

    /// A visible order by id. Hidden orders are reported as missing.
    pub(crate) fn visible_order(&self, id: &str) -> ApiResult<CalculatedOrder> {
        self.visible_orders()
            .into_iter()
            .find(|o| o.id() == id)
            .ok_or_else(|| ApiError::not_found("Order", id))
    }
}
