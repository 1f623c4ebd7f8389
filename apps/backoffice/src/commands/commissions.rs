//! # Commission Commands
//!
//! Commissions are an administrator concern: every command here requires
//! `ManageCommissions`.

use serde::Serialize;
use tracing::info;
use ts_rs::TS;

use multiluz_core::commission::derive_commissions;
use multiluz_core::filters::{commissionable_orders, CommissionFilter, CommissionTotals};
use multiluz_core::validation::validate_commission;
use multiluz_core::{CalculatedCommission, CalculatedOrder, Commission, CommissionStatus};

use crate::commands::Backoffice;
use crate::error::{ApiError, ApiResult};
use crate::permissions::Action;

/// The commission screen: filtered rows plus their footer totals.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommissionList {
    pub rows: Vec<CalculatedCommission>,
    pub totals: CommissionTotals,
}

impl Backoffice {
    /// Every commission, derived and sorted by order value, largest first.
    pub fn commissions(&self) -> ApiResult<Vec<CalculatedCommission>> {
        self.require(Action::ManageCommissions)?;
        Ok(self.derived_commissions())
    }

    pub fn filtered_commissions(&self, filter: &CommissionFilter) -> ApiResult<CommissionList> {
        self.require(Action::ManageCommissions)?;
        let rows = filter.apply(&self.derived_commissions());
        let totals = CommissionTotals::of(&rows);
        Ok(CommissionList { rows, totals })
    }

    /// Orders that can still take a commission. When editing, that
    /// commission's own order stays selectable.
    pub fn commissionable_orders(&self, term: &str, editing_id: Option<&str>) -> ApiResult<Vec<CalculatedOrder>> {
        self.require(Action::ManageCommissions)?;
        let commissions = self.store().commissions().list();
        let editing = match editing_id {
            Some(id) => Some(self.store().commissions().get(id)?),
            None => None,
        };
        Ok(commissionable_orders(
            &self.calculated_orders(),
            &commissions,
            term,
            editing.as_ref(),
            self.config().picker_limit(),
        ))
    }

    /// A pending commission for `order_id` at the configured default rate.
    pub fn commission_draft(&self, order_id: &str) -> ApiResult<Commission> {
        self.require(Action::ManageCommissions)?;
        Ok(Commission {
            id: String::new(),
            order_id: order_id.to_string(),
            commission_rate: self.config().default_commission_rate(),
            status: CommissionStatus::Pending,
            payment_date: None,
        })
    }

    pub fn create_commission(&self, commission: Commission) -> ApiResult<CalculatedCommission> {
        self.require(Action::ManageCommissions)?;
        self.check_commission(&commission)?;

        let created = self.store().commissions().create(commission)?;
        info!(commission_id = %created.id, order_id = %created.order_id, "Commission created");
        self.find_commission(&created.id)
    }

    pub fn update_commission(&self, commission: Commission) -> ApiResult<CalculatedCommission> {
        self.require(Action::ManageCommissions)?;
        self.check_commission(&commission)?;

        let updated = self.store().commissions().update(commission)?;
        self.find_commission(&updated.id)
    }

    pub fn delete_commission(&self, commission_id: &str) -> ApiResult<Commission> {
        self.require(Action::ManageCommissions)?;
        let removed = self.store().commissions().delete(commission_id)?;
        info!(commission_id = %commission_id, "Commission deleted");
        Ok(removed)
    }

    fn check_commission(&self, commission: &Commission) -> ApiResult<()> {
        validate_commission(commission)?;
        if !self.store().orders().exists(&commission.order_id) {
            return Err(ApiError::not_found("Order", &commission.order_id));
        }
        Ok(())
    }

    /// Unchecked derivation over every order; callers gate access.
    pub(crate) fn derived_commissions(&self) -> Vec<CalculatedCommission> {
        derive_commissions(&self.store().commissions().list(), &self.calculated_orders())
    }

    fn find_commission(&self, id: &str) -> ApiResult<CalculatedCommission> {
        self.derived_commissions()
            .into_iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| ApiError::not_found("Commission", id))
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::testing::*;
    use crate::error::ErrorCode;
    use multiluz_core::filters::CommissionFilter;
    use multiluz_core::{CommissionStatus, Money, Rate};

    #[test]
    fn test_filtered_commissions_and_totals() {
        let backoffice = demo();
        let list = backoffice
            .filtered_commissions(&CommissionFilter {
                consultant: Some("Bruno Gomes".to_string()),
                status: None,
            })
            .unwrap();

        let ids: Vec<&str> = list.rows.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["COM-002", "COM-004"]);
        assert_eq!(list.totals.total_order_value, Money::from_reais(92_000));
        assert_eq!(list.totals.total_commission_value, Money::from_reais(4_600));
    }

    #[test]
    fn test_commissions_hidden_from_non_admins() {
        let manager = demo_as("USR-002");
        let err = manager.filtered_commissions(&CommissionFilter::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(manager.commissions().unwrap_err().code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_salesperson_cannot_read_commissions() {
        let salesperson = demo_as("USR-003");
        assert_eq!(salesperson.commissions().unwrap_err().code, ErrorCode::Forbidden);
        assert_eq!(
            salesperson.filtered_commissions(&CommissionFilter::default()).unwrap_err().code,
            ErrorCode::Forbidden
        );
        assert_eq!(salesperson.commissionable_orders("ORD", None).unwrap_err().code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_admin_reads_all_commissions_sorted() {
        let rows = demo().commissions().unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["COM-003", "COM-002", "COM-004", "COM-001"]);
    }

    #[test]
    fn test_commissionable_orders_skip_commissioned() {
        let backoffice = demo();
        let ids = |term: &str, editing: Option<&str>| -> Vec<String> {
            backoffice
                .commissionable_orders(term, editing)
                .unwrap()
                .iter()
                .map(|o| o.id().to_string())
                .collect()
        };

        assert_eq!(ids("ORD", None), vec!["ORD-003", "ORD-005"]);
        assert_eq!(ids("ORD", Some("COM-001")), vec!["ORD-001", "ORD-003", "ORD-005"]);
    }

    #[test]
    fn test_create_from_draft() {
        let backoffice = demo();
        let draft = backoffice.commission_draft("ORD-003").unwrap();
        assert_eq!(draft.commission_rate, Rate::from_bps(500));

        let created = backoffice.create_commission(draft).unwrap();
        assert_eq!(created.id(), "COM-005");
        assert_eq!(created.customer_name, "Mercado Gama");
        assert_eq!(created.commission_value, Money::from_reais(750));
    }

    #[test]
    fn test_second_commission_rejected() {
        let backoffice = demo();
        let draft = backoffice.commission_draft("ORD-001").unwrap();
        let err = backoffice.create_commission(draft).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessRule);

        let missing = backoffice.commission_draft("ORD-404").unwrap();
        assert_eq!(backoffice.create_commission(missing).unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_mark_paid_requires_date() {
        let backoffice = demo();
        let mut pending = backoffice.store().commissions().get("COM-002").unwrap();
        pending.status = CommissionStatus::Paid;
        assert_eq!(
            backoffice.update_commission(pending.clone()).unwrap_err().code,
            ErrorCode::ValidationError
        );

        pending.payment_date = Some(date(2023, 11, 20));
        let paid = backoffice.update_commission(pending).unwrap();
        assert_eq!(paid.status(), CommissionStatus::Paid);
        assert_eq!(paid.commission_value, Money::from_reais(2_500));
    }
}
