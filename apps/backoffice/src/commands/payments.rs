//! # Payment Commands

use tracing::info;

use multiluz_core::filters::{payment_rows, PaymentFilter, PaymentRow};
use multiluz_core::validation::validate_payment;
use multiluz_core::Payment;

use crate::commands::Backoffice;
use crate::error::{ApiError, ApiResult};
use crate::permissions::Action;

impl Backoffice {
    /// Visible payments with their order's customer and consultant, newest
    /// first.
    pub fn payment_rows(&self, filter: &PaymentFilter) -> Vec<PaymentRow> {
        let rows = payment_rows(&self.visible_payments(), &self.calculated_orders());
        filter.apply(&rows)
    }

    /// Records a payment against an order the acting user can see.
    pub fn add_payment(&self, payment: Payment) -> ApiResult<Payment> {
        self.require(Action::AddPayment)?;
        validate_payment(&payment)?;
        self.visible_order(&payment.order_id)?;

        let created = self.store().payments().create(payment);
        info!(
            payment_id = %created.id,
            order_id = %created.order_id,
            value = %created.value,
            "Payment recorded"
        );
        Ok(created)
    }

    pub fn update_payment(&self, payment: Payment) -> ApiResult<Payment> {
        self.require(Action::EditPayment)?;
        validate_payment(&payment)?;
        if !self.store().orders().exists(&payment.order_id) {
            return Err(ApiError::not_found("Order", &payment.order_id));
        }

        Ok(self.store().payments().update(payment)?)
    }

    pub fn delete_payment(&self, payment_id: &str) -> ApiResult<Payment> {
        self.require(Action::DeletePayment)?;
        let removed = self.store().payments().delete(payment_id)?;
        info!(payment_id = %payment_id, order_id = %removed.order_id, "Payment deleted");
        Ok(removed)
    }
}
