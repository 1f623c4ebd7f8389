//! # State Module
//!
//! Application state for the back-office, split by concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  StoreState  │  │ SessionState │  │ BackofficeConfig │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Store       │  │  Arc<Mutex<  │  │  utc offset      │              │
//! │  │  (tables)    │  │    Session   │  │  status policy   │              │
//! │  │              │  │  >>          │  │  picker limit    │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: every table is behind its own RwLock                    │
//! │  • SessionState: Protected by Arc<Mutex<T>>                            │
//! │  • BackofficeConfig: Read-only after startup                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;
mod store;

pub use config::{
    BackofficeConfig, ClockSettings, CommissionSettings, ConfigError, ConfigResult, DataSettings,
    StatusSettings, UiSettings,
};
pub use session::{Session, SessionState, View};
pub use store::StoreState;
