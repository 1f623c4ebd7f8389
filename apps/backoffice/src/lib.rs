//! # Multiluz Back-Office Library
//!
//! Orchestration layer of the Multiluz Solar sales and finance back-office.
//! Business rules live in `multiluz-core`, records in `multiluz-store`;
//! this crate wires them to a configuration, a session and a command
//! surface.
//!
//! ## Module Organization
//! ```text
//! multiluz_backoffice/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── BackofficeConfig (TOML + env)
//! │   ├── session.rs  ◄─── Acting user, view, selected order
//! │   └── store.rs    ◄─── Record store wrapper
//! ├── commands/       ◄─── Backoffice command surface
//! ├── permissions.rs  ◄─── Role → action table
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod permissions;
pub mod state;

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use multiluz_core::dashboard::DashboardSummary;
use multiluz_core::goals::AttainmentRow;

pub use commands::Backoffice;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::{BackofficeConfig, Session, View};

/// Startup options taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit config file; the platform config directory otherwise.
    pub config_path: Option<PathBuf>,
    /// Profile to act as instead of the first stored one.
    pub acting_profile: Option<String>,
}

/// What `run` reports for the acting user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub session: Session,
    pub dashboard: DashboardSummary,
    pub goal_attainment: Vec<AttainmentRow>,
}

/// Loads the configuration, opens the store and returns the acting user's
/// overview as JSON.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → backoffice.toml → MULTILUZ_* env                       │
/// │     • invalid config falls back to defaults with a warning              │
/// │                                                                         │
/// │  2. Open Record Store ────────────────────────────────────────────────► │
/// │     • demo data anchored at today's reference date, or empty            │
/// │                                                                         │
/// │  3. Start Session ────────────────────────────────────────────────────► │
/// │     • first stored profile, or the one asked for                        │
/// │                                                                         │
/// │  4. Report ───────────────────────────────────────────────────────────► │
/// │     • dashboard + goal attainment for the reference month               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(options: RunOptions) -> ApiResult<String> {
    info!("Starting Multiluz back-office");

    let config = BackofficeConfig::load_or_default(options.config_path);
    info!(
        today = %config.today(),
        grace_days = config.status.overdue_grace_days,
        partial_threshold = ?config.status.partial_threshold,
        "Configuration loaded"
    );

    let backoffice = Backoffice::open(config)?;
    if let Some(profile_id) = options.acting_profile.as_deref() {
        backoffice.switch_user(profile_id)?;
    }

    let overview = Overview {
        session: backoffice.session(),
        dashboard: backoffice.dashboard(),
        goal_attainment: backoffice.current_goal_attainment()?,
    };
    serde_json::to_string_pretty(&overview).map_err(|e| ApiError::internal(e.to_string()))
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=multiluz=trace` - Show trace for multiluz crates only
/// - Default: INFO, DEBUG for multiluz crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,multiluz=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
