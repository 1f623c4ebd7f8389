//! # Order Commands

use tracing::{debug, info};

use multiluz_core::filters::{search_orders, OrderFilter};
use multiluz_core::order::derive_order;
use multiluz_core::validation::validate_order;
use multiluz_core::{CalculatedOrder, Order};

use crate::commands::session::OrderDetail;
use crate::commands::Backoffice;
use crate::error::{ApiError, ApiResult};
use crate::permissions::Action;

impl Backoffice {
    /// Visible orders narrowed by the list filters.
    pub fn list_orders(&self, filter: &OrderFilter) -> Vec<CalculatedOrder> {
        filter.apply(&self.visible_orders())
    }

    pub fn order_detail(&self, order_id: &str) -> ApiResult<OrderDetail> {
        let order = self.visible_order(order_id)?;
        let mut payments = self.store().payments().for_order(order_id);
        payments.sort_by_key(|p| p.payment_date);
        Ok(OrderDetail { order, payments })
    }

    /// Order picker over the visible orders.
    pub fn search_orders(&self, term: &str) -> Vec<CalculatedOrder> {
        search_orders(&self.visible_orders(), term, self.config().picker_limit())
    }

    /// Adds an order. A salesperson may only add orders credited to
    /// themselves.
    pub fn create_order(&self, order: Order) -> ApiResult<CalculatedOrder> {
        let viewer = self.require(Action::AddOrder)?;
        validate_order(&order)?;
        if !viewer.can_see_consultant(&order.consultant) {
            return Err(ApiError::forbidden(format!(
                "{} cannot add orders for {}",
                viewer.name, order.consultant
            )));
        }

        let created = self.store().orders().create(order);
        info!(order_id = %created.id, consultant = %created.consultant, "Order created");
        Ok(self.derive(&created))
    }

    pub fn update_order(&self, order: Order) -> ApiResult<CalculatedOrder> {
        self.require(Action::EditOrder)?;
        validate_order(&order)?;

        let updated = self.store().orders().update(order)?;
        debug!(order_id = %updated.id, "update_order command");
        Ok(self.derive(&updated))
    }

    /// Deletes an order. Its payments and commission are left in place and
    /// show up as orphaned.
    pub fn delete_order(&self, order_id: &str) -> ApiResult<Order> {
        self.require(Action::DeleteOrder)?;
        let removed = self.store().orders().delete(order_id)?;
        info!(order_id = %order_id, "Order deleted");
        Ok(removed)
    }

    fn derive(&self, order: &Order) -> CalculatedOrder {
        derive_order(
            order,
            &self.store().payments().for_order(&order.id),
            self.today(),
            &self.config().status_policy(),
        )
    }
}
