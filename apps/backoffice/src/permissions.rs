//! # Role Permissions
//!
//! ```text
//! ┌────────────────────────────┬───────┬─────────┬─────────────┐
//! │ Action                     │ Admin │ Manager │ Salesperson │
//! ├────────────────────────────┼───────┼─────────┼─────────────┤
//! │ add order / add payment    │   ✓   │         │  ✓ (own)    │
//! │ edit / delete order        │   ✓   │         │             │
//! │ edit / delete payment      │   ✓   │         │             │
//! │ commissions                │   ✓   │         │             │
//! │ salespeople                │   ✓   │         │             │
//! │ profiles                   │   ✓   │         │             │
//! │ settings                   │   ✓   │         │             │
//! └────────────────────────────┴───────┴─────────┴─────────────┘
//! ```
//!
//! Reads follow [`Viewer`](multiluz_core::Viewer) scoping: a salesperson
//! only ever sees their own orders and the payments on them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use multiluz_core::UserRole;

use crate::error::ApiError;
use crate::state::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Action {
    AddOrder,
    EditOrder,
    DeleteOrder,
    AddPayment,
    EditPayment,
    DeletePayment,
    ManageCommissions,
    ManageSalespeople,
    ManageProfiles,
    ManageSettings,
}

pub fn can(role: UserRole, action: Action) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::Salesperson => matches!(action, Action::AddOrder | Action::AddPayment),
        UserRole::Manager => false,
    }
}

/// Fails with `FORBIDDEN` when `role` may not perform `action`.
pub fn require(role: UserRole, action: Action) -> Result<(), ApiError> {
    if can(role, action) {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!("{role} cannot {action:?}")))
    }
}

pub fn can_open_view(role: UserRole, view: View) -> bool {
    match view {
        View::Dashboard | View::List | View::Payments | View::Detail => true,
        View::Commissions => can(role, Action::ManageCommissions),
        View::Salespeople => can(role, Action::ManageSalespeople),
        View::Profiles => can(role, Action::ManageProfiles),
        View::Settings => can(role, Action::ManageSettings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_can_do_everything() {
        for action in [Action::EditOrder, Action::DeletePayment, Action::ManageSettings] {
            assert!(can(UserRole::Admin, action));
        }
        assert!(can_open_view(UserRole::Admin, View::Profiles));
    }

    #[test]
    fn test_salesperson_only_adds() {
        assert!(can(UserRole::Salesperson, Action::AddOrder));
        assert!(can(UserRole::Salesperson, Action::AddPayment));
        assert!(!can(UserRole::Salesperson, Action::EditOrder));
        assert!(!can(UserRole::Salesperson, Action::EditPayment));
        assert!(!can_open_view(UserRole::Salesperson, View::Commissions));
        assert!(can_open_view(UserRole::Salesperson, View::Payments));
    }

    #[test]
    fn test_manager_is_read_only() {
        assert!(!can(UserRole::Manager, Action::AddOrder));
        assert!(!can(UserRole::Manager, Action::AddPayment));
        assert!(require(UserRole::Manager, Action::ManageSalespeople).is_err());
        assert!(can_open_view(UserRole::Manager, View::List));
        assert!(!can_open_view(UserRole::Manager, View::Settings));
    }
}
