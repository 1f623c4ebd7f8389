//! # Session State
//!
//! Who is acting and what they are looking at.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Transitions                               │
//! │                                                                         │
//! │  switch_user(profile) ─────────────► Dashboard, no selection            │
//! │                                                                         │
//! │  navigate(view) ──── role allowed? ─► view, no selection                │
//! │                  └── otherwise ─────► FORBIDDEN, unchanged              │
//! │                                                                         │
//! │  open_order(id) ───────────────────► Detail, selection = id             │
//! │                                                                         │
//! │  back_to_list() ───────────────────► List, no selection                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The session is shared behind `Arc<Mutex<Session>>`; a poisoned lock is
//! recovered since every transition leaves the session consistent.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use multiluz_core::{UserProfile, Viewer};

use crate::error::ApiError;
use crate::permissions::can_open_view;

// =============================================================================
// View
// =============================================================================

/// Screens of the back-office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum View {
    #[default]
    Dashboard,
    List,
    Payments,
    Detail,
    Commissions,
    Salespeople,
    Profiles,
    Settings,
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    /// Id of the acting profile.
    pub profile_id: String,
    pub user: Viewer,
    pub view: View,
    pub selected_order: Option<String>,
}

impl Session {
    pub fn new(profile: &UserProfile) -> Self {
        Session {
            profile_id: profile.id.clone(),
            user: Viewer::from(profile),
            view: View::Dashboard,
            selected_order: None,
        }
    }

    /// Changes the acting user. Always lands on the dashboard.
    pub fn switch_user(&mut self, profile: &UserProfile) {
        *self = Session::new(profile);
    }

    /// Refreshes the acting user's name and role after their profile was
    /// edited, keeping the current view when it is still allowed.
    pub fn refresh_user(&mut self, profile: &UserProfile) {
        self.user = Viewer::from(profile);
        if !can_open_view(self.user.role, self.view) {
            self.view = View::Dashboard;
            self.selected_order = None;
        }
    }

    pub fn navigate(&mut self, view: View) -> Result<(), ApiError> {
        if !can_open_view(self.user.role, view) {
            return Err(ApiError::forbidden(format!(
                "{} cannot open {:?}",
                self.user.role, view
            )));
        }
        self.view = view;
        self.selected_order = None;
        Ok(())
    }

    pub fn open_order(&mut self, order_id: impl Into<String>) {
        self.view = View::Detail;
        self.selected_order = Some(order_id.into());
    }

    pub fn back_to_list(&mut self) {
        self.view = View::List;
        self.selected_order = None;
    }

    pub fn is_acting_as(&self, profile_id: &str) -> bool {
        self.profile_id == profile_id
    }
}

// =============================================================================
// Session State
// =============================================================================

/// Thread-safe session wrapper.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    pub fn new(profile: &UserProfile) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(Session::new(profile))),
        }
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    pub fn snapshot(&self) -> Session {
        self.with_session(Session::clone)
    }

    pub fn viewer(&self) -> Viewer {
        self.with_session(|s| s.user.clone())
    }

    pub fn switch_user(&self, profile: &UserProfile) {
        self.with_session_mut(|s| s.switch_user(profile));
        info!(profile_id = %profile.id, role = %profile.role, "Acting user switched");
    }
}
