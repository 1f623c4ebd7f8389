//! # Settings Commands
//!
//! Configuration lists. Anyone may read them (they feed the form
//! dropdowns); only administrators change them.

use multiluz_core::{AppConfiguration, ConfigList};
use multiluz_store::RenameOutcome;

use crate::commands::Backoffice;
use crate::error::ApiResult;
use crate::permissions::Action;

impl Backoffice {
    pub fn app_configuration(&self) -> AppConfiguration {
        self.store().config().get()
    }

    pub fn config_items(&self, list: ConfigList) -> Vec<String> {
        self.store().config().items(list)
    }

    /// Appends an item; returns it trimmed.
    pub fn add_config_item(&self, list: ConfigList, value: &str) -> ApiResult<String> {
        self.require(Action::ManageSettings)?;
        Ok(self.store().config().add(list, value)?)
    }

    /// Renames an item and carries the new value into the records that
    /// used the old one.
    pub fn rename_config_item(&self, list: ConfigList, old_value: &str, new_value: &str) -> ApiResult<RenameOutcome> {
        self.require(Action::ManageSettings)?;
        Ok(self.store().config().rename(list, old_value, new_value)?)
    }

    pub fn remove_config_item(&self, list: ConfigList, value: &str) -> ApiResult<()> {
        self.require(Action::ManageSettings)?;
        Ok(self.store().config().remove(list, value)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::testing::*;
    use crate::error::ErrorCode;
    use multiluz_core::filters::OrderFilter;
    use multiluz_core::ConfigList;

    #[test]
    fn test_rename_business_unit_cascades() {
        let backoffice = demo();
        let outcome = backoffice
            .rename_config_item(ConfigList::BusinessUnits, "São Paulo", "SP Capital")
            .unwrap();
        assert_eq!(outcome.records_updated, 2);

        let units: Vec<String> = backoffice
            .salespeople()
            .unwrap()
            .into_iter()
            .map(|sp| sp.business_unit)
            .collect();
        assert_eq!(units[0], "SP Capital");
        assert_eq!(units[2], "SP Capital");
        assert_eq!(
            backoffice.config_items(ConfigList::BusinessUnits),
            vec!["SP Capital", "Rio de Janeiro", "Belo Horizonte", "Matriz"]
        );
    }

    #[test]
    fn test_rename_payment_method_cascades_to_orders() {
        let backoffice = demo();
        let outcome = backoffice
            .rename_config_item(ConfigList::PaymentMethods, "Boleto", "Boleto Bancário")
            .unwrap();
        assert_eq!(outcome.records_updated, 2);

        let methods: Vec<String> = backoffice
            .list_orders(&OrderFilter::default())
            .into_iter()
            .map(|o| o.order.payment_method)
            .collect();
        assert_eq!(methods[0], "Boleto Bancário");
        assert_eq!(methods[4], "Boleto Bancário");
    }

    #[test]
    fn test_add_and_remove_items() {
        let backoffice = demo();
        assert_eq!(backoffice.add_config_item(ConfigList::OrderOrigins, "  Instagram ").unwrap(), "Instagram");
        assert_eq!(
            backoffice.add_config_item(ConfigList::OrderOrigins, "Feira").unwrap_err().code,
            ErrorCode::Duplicate
        );
        assert_eq!(
            backoffice.add_config_item(ConfigList::OrderOrigins, " ").unwrap_err().code,
            ErrorCode::ValidationError
        );

        backoffice.remove_config_item(ConfigList::OrderOrigins, "Feira").unwrap();
        assert_eq!(
            backoffice.remove_config_item(ConfigList::OrderOrigins, "Feira").unwrap_err().code,
            ErrorCode::NotFound
        );
        assert_eq!(backoffice.config_items(ConfigList::OrderOrigins).len(), 4);
    }

    #[test]
    fn test_settings_admin_only() {
        let manager = demo_as("USR-002");
        assert_eq!(manager.app_configuration().salesperson_levels.len(), 3);
        assert_eq!(
            manager.rename_config_item(ConfigList::SalespersonLevels, "Pleno", "Médio").unwrap_err().code,
            ErrorCode::Forbidden
        );
    }
}
