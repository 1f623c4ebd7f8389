//! # Dashboard Commands
//!
//! KPIs and goal attainment, always over what the acting user can see.

use chrono::Datelike;

use multiluz_core::dashboard::{dashboard_summary, DashboardSummary};
use multiluz_core::goals::{derive_goal_attainment, AttainmentRow};
use multiluz_core::visibility::{scope_orders, scope_payments};
use multiluz_core::{Order, ValidationError};

use crate::commands::Backoffice;
use crate::error::ApiResult;

impl Backoffice {
    pub fn dashboard(&self) -> DashboardSummary {
        let viewer = self.viewer();
        let orders = scope_orders(&viewer, &self.calculated_orders());
        let payments = scope_payments(&viewer, &orders, &self.store().payments().list());
        dashboard_summary(&orders, &payments, self.today())
    }

    /// Goal attainment for a 1-based `month`. A salesperson only sees
    /// their own row.
    pub fn goal_attainment(&self, month: u32, year: i32) -> ApiResult<Vec<AttainmentRow>> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::OutOfRange {
                field: "month".to_string(),
                min: 1,
                max: 12,
            }
            .into());
        }

        let viewer = self.viewer();
        let orders: Vec<Order> = self
            .store()
            .orders()
            .list()
            .into_iter()
            .filter(|o| viewer.can_see_consultant(&o.consultant))
            .collect();
        let salespeople: Vec<_> = self
            .store()
            .salespeople()
            .list()
            .into_iter()
            .filter(|sp| viewer.can_see_consultant(&sp.name))
            .collect();

        Ok(derive_goal_attainment(&orders, &salespeople, month, year))
    }

    /// Goal attainment for the reference month.
    pub fn current_goal_attainment(&self) -> ApiResult<Vec<AttainmentRow>> {
        let today = self.today();
        self.goal_attainment(today.month(), today.year())
    }
}
