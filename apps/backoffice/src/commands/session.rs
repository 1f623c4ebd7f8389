//! # Session Commands

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use multiluz_core::{CalculatedOrder, Payment, Viewer};

use crate::commands::Backoffice;
use crate::error::ApiResult;
use crate::state::{Session, View};

/// An order with its own payments, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderDetail {
    pub order: CalculatedOrder,
    pub payments: Vec<Payment>,
}

impl Backoffice {
    pub fn session(&self) -> Session {
        self.session_state().snapshot()
    }

    pub fn current_user(&self) -> Viewer {
        self.viewer()
    }

    /// Acts as another stored profile; navigation resets to the dashboard.
    pub fn switch_user(&self, profile_id: &str) -> ApiResult<Session> {
        let profile = self.store().profiles().get(profile_id)?;
        self.session_state().switch_user(&profile);
        Ok(self.session())
    }

    pub fn navigate(&self, view: View) -> ApiResult<Session> {
        debug!(?view, "navigate command");
        self.session_state().with_session_mut(|s| s.navigate(view))?;
        Ok(self.session())
    }

    /// Opens an order's detail page.
    pub fn open_order(&self, order_id: &str) -> ApiResult<OrderDetail> {
        let detail = self.order_detail(order_id)?;
        self.session_state()
            .with_session_mut(|s| s.open_order(order_id));
        Ok(detail)
    }

    pub fn back_to_list(&self) -> Session {
        self.session_state().with_session_mut(Session::back_to_list);
        self.session()
    }

    /// The selected order and its payments, if one is open.
    pub fn selected_order(&self) -> ApiResult<Option<OrderDetail>> {
        match self.session().selected_order {
            Some(id) => self.order_detail(&id).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::testing::*;
    use crate::error::ErrorCode;
    use crate::state::View;
    use multiluz_core::UserRole;

    #[test]
    fn test_switch_user_resets_view() {
        let backoffice = demo();
        backoffice.navigate(View::Commissions).unwrap();
        backoffice.open_order("ORD-004").unwrap();

        let session = backoffice.switch_user("USR-004").unwrap();
        assert_eq!(session.view, View::Dashboard);
        assert_eq!(session.selected_order, None);
        assert_eq!(session.user.role, UserRole::Salesperson);
    }

    #[test]
    fn test_switch_to_unknown_profile() {
        let backoffice = demo();
        let err = backoffice.switch_user("USR-099").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(backoffice.current_user().name, "Ana Costa");
    }

    #[test]
    fn test_open_order_and_back() {
        let backoffice = demo_as("USR-003");

        let detail = backoffice.open_order("ORD-002").unwrap();
        assert_eq!(detail.payments.len(), 2);
        assert_eq!(backoffice.session().view, View::Detail);
        assert_eq!(
            backoffice.selected_order().unwrap().map(|d| d.order.order.customer_name),
            Some("Construtora Beta".to_string())
        );

        // Another salesperson's order stays hidden
        assert_eq!(backoffice.open_order("ORD-004").unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(backoffice.session().selected_order.as_deref(), Some("ORD-002"));

        let session = backoffice.back_to_list();
        assert_eq!(session.view, View::List);
        assert!(backoffice.selected_order().unwrap().is_none());
    }

    #[test]
    fn test_salesperson_cannot_open_settings() {
        let backoffice = demo_as("USR-005");
        assert_eq!(backoffice.navigate(View::Settings).unwrap_err().code, ErrorCode::Forbidden);
        assert_eq!(backoffice.navigate(View::Payments).unwrap().view, View::Payments);
    }
}
