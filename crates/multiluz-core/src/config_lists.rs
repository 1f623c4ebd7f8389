//! # App Configuration Lists
//!
//! The editable option lists behind the form dropdowns (business units,
//! payment methods, order origins, salesperson levels, order statuses).
//!
//! ## Rename Flow
//! ```text
//! rename(PaymentMethods, "Pix", "PIX")
//!     │
//!     ├── validate: non-empty, changed, not a duplicate, old value known
//!     ├── replace in place (position kept)
//!     └── return ConfigRename ──► store cascades into referencing records
//! ```
//!
//! This module only edits the lists. Which records a rename touches is
//! described by [`ConfigList::cascade_target`] and applied by the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::OrderStatus;
use crate::validation::validate_config_item;

/// Key of one configuration list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ConfigList {
    BusinessUnits,
    PaymentMethods,
    OrderOrigins,
    SalespersonLevels,
    OrderStatuses,
}

/// The record field a list's values are copied into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeTarget {
    SalespersonBusinessUnit,
    SalespersonLevel,
    OrderPaymentMethod,
    OrderOrigin,
}

impl ConfigList {
    pub const ALL: [ConfigList; 5] = [
        ConfigList::BusinessUnits,
        ConfigList::PaymentMethods,
        ConfigList::OrderOrigins,
        ConfigList::SalespersonLevels,
        ConfigList::OrderStatuses,
    ];

    /// Wire key, as used in settings payloads.
    pub const fn key(&self) -> &'static str {
        match self {
            ConfigList::BusinessUnits => "businessUnits",
            ConfigList::PaymentMethods => "paymentMethods",
            ConfigList::OrderOrigins => "orderOrigins",
            ConfigList::SalespersonLevels => "salespersonLevels",
            ConfigList::OrderStatuses => "orderStatuses",
        }
    }

    /// Settings section title.
    pub const fn title(&self) -> &'static str {
        match self {
            ConfigList::BusinessUnits => "Unidades de Negócio",
            ConfigList::PaymentMethods => "Formas de Pagamento",
            ConfigList::OrderOrigins => "Origens de Pedidos",
            ConfigList::SalespersonLevels => "Níveis de Consultores",
            ConfigList::OrderStatuses => "Status de Pedidos",
        }
    }

    /// Record field that holds values of this list.
    ///
    /// `OrderStatuses` are labels for the typed [`OrderStatus`]; no record
    /// stores them as text.
    pub const fn cascade_target(&self) -> Option<CascadeTarget> {
        match self {
            ConfigList::BusinessUnits => Some(CascadeTarget::SalespersonBusinessUnit),
            ConfigList::SalespersonLevels => Some(CascadeTarget::SalespersonLevel),
            ConfigList::PaymentMethods => Some(CascadeTarget::OrderPaymentMethod),
            ConfigList::OrderOrigins => Some(CascadeTarget::OrderOrigin),
            ConfigList::OrderStatuses => None,
        }
    }
}

impl fmt::Display for ConfigList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A completed rename, handed to the store for cascading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ConfigRename {
    pub list: ConfigList,
    pub old_value: String,
    pub new_value: String,
}

// =============================================================================
// App Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppConfiguration {
    pub business_units: Vec<String>,
    pub payment_methods: Vec<String>,
    pub order_origins: Vec<String>,
    pub salesperson_levels: Vec<String>,
    pub order_statuses: Vec<String>,
}

impl AppConfiguration {
    /// Empty lists, except order statuses which mirror [`OrderStatus::ALL`].
    pub fn with_order_statuses() -> Self {
        AppConfiguration {
            order_statuses: OrderStatus::ALL.iter().map(|s| s.label().to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn items(&self, list: ConfigList) -> &[String] {
        match list {
            ConfigList::BusinessUnits => &self.business_units,
            ConfigList::PaymentMethods => &self.payment_methods,
            ConfigList::OrderOrigins => &self.order_origins,
            ConfigList::SalespersonLevels => &self.salesperson_levels,
            ConfigList::OrderStatuses => &self.order_statuses,
        }
    }

    fn items_mut(&mut self, list: ConfigList) -> &mut Vec<String> {
        match list {
            ConfigList::BusinessUnits => &mut self.business_units,
            ConfigList::PaymentMethods => &mut self.payment_methods,
            ConfigList::OrderOrigins => &mut self.order_origins,
            ConfigList::SalespersonLevels => &mut self.salesperson_levels,
            ConfigList::OrderStatuses => &mut self.order_statuses,
        }
    }

    pub fn contains(&self, list: ConfigList, value: &str) -> bool {
        self.items(list).iter().any(|item| item == value)
    }

    /// Appends a trimmed value, rejecting blanks and duplicates.
    pub fn add(&mut self, list: ConfigList, value: &str) -> CoreResult<String> {
        let value = validate_config_item(list.key(), value, self.items(list))?;
        self.items_mut(list).push(value.clone());
        Ok(value)
    }

    /// Replaces `old_value` in place.
    ///
    /// Rejects a blank or unchanged new value, a new value already in the
    /// list, and an old value that is not in the list.
    pub fn rename(&mut self, list: ConfigList, old_value: &str, new_value: &str) -> CoreResult<ConfigRename> {
        let trimmed = new_value.trim();
        if trimmed == old_value {
            return Err(ValidationError::Inconsistent {
                field: list.key().to_string(),
                reason: "new value equals the current one".to_string(),
            }
            .into());
        }

        let new_value = validate_config_item(list.key(), trimmed, self.items(list))?;

        let slot = self
            .items_mut(list)
            .iter_mut()
            .find(|item| item.as_str() == old_value)
            .ok_or_else(|| CoreError::UnknownConfigItem {
                list: list.key().to_string(),
                value: old_value.to_string(),
            })?;
        *slot = new_value.clone();

        Ok(ConfigRename {
            list,
            old_value: old_value.to_string(),
            new_value,
        })
    }

    /// Removes a value. Records that reference it keep their text.
    pub fn remove(&mut self, list: ConfigList, value: &str) -> CoreResult<()> {
        let items = self.items_mut(list);
        let before = items.len();
        items.retain(|item| item != value);
        if items.len() == before {
            return Err(CoreError::UnknownConfigItem {
                list: list.key().to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfiguration {
        AppConfiguration {
            payment_methods: vec!["Boleto".to_string(), "Pix".to_string(), "Transferência".to_string()],
            business_units: vec!["São Paulo".to_string(), "Matriz".to_string()],
            ..AppConfiguration::with_order_statuses()
        }
    }

    #[test]
    fn test_add_trims_and_rejects_blank_or_duplicate() {
        let mut cfg = config();
        assert_eq!(cfg.add(ConfigList::PaymentMethods, " Cheque ").unwrap(), "Cheque");
        assert_eq!(cfg.items(ConfigList::PaymentMethods).last().map(String::as_str), Some("Cheque"));

        assert!(cfg.add(ConfigList::PaymentMethods, "   ").is_err());
        assert!(cfg.add(ConfigList::PaymentMethods, "Pix").is_err());
        assert_eq!(cfg.items(ConfigList::PaymentMethods).len(), 4);
    }

    #[test]
    fn test_rename_keeps_position_and_returns_event() {
        let mut cfg = config();
        let event = cfg.rename(ConfigList::PaymentMethods, "Pix", "PIX").unwrap();

        assert_eq!(
            event,
            ConfigRename {
                list: ConfigList::PaymentMethods,
                old_value: "Pix".to_string(),
                new_value: "PIX".to_string(),
            }
        );
        assert_eq!(cfg.items(ConfigList::PaymentMethods), ["Boleto", "PIX", "Transferência"]);
    }

    #[test]
    fn test_rename_rejections() {
        let mut cfg = config();
        let untouched = cfg.clone();

        assert!(cfg.rename(ConfigList::PaymentMethods, "Pix", "").is_err());
        assert!(cfg.rename(ConfigList::PaymentMethods, "Pix", "Pix").is_err());
        assert!(cfg.rename(ConfigList::PaymentMethods, "Pix", "Boleto").is_err());
        assert!(matches!(
            cfg.rename(ConfigList::PaymentMethods, "Dinheiro", "Espécie"),
            Err(CoreError::UnknownConfigItem { .. })
        ));
        assert_eq!(cfg, untouched);
    }

    #[test]
    fn test_remove() {
        let mut cfg = config();
        cfg.remove(ConfigList::BusinessUnits, "Matriz").unwrap();
        assert_eq!(cfg.items(ConfigList::BusinessUnits), ["São Paulo"]);
        assert!(cfg.remove(ConfigList::BusinessUnits, "Matriz").is_err());
    }

    #[test]
    fn test_order_statuses_and_cascade_targets() {
        let cfg = AppConfiguration::with_order_statuses();
        assert_eq!(cfg.items(ConfigList::OrderStatuses), ["ATIVO", "CONCLUÍDO", "CANCELADO"]);
        assert_eq!(ConfigList::OrderStatuses.cascade_target(), None);
        assert!(ConfigList::ALL
            .iter()
            .filter(|l| **l != ConfigList::OrderStatuses)
            .all(|l| l.cascade_target().is_some()));
    }

    #[test]
    fn test_wire_keys() {
        assert_eq!(serde_json::to_string(&ConfigList::SalespersonLevels).unwrap(), "\"salespersonLevels\"");
        let json = serde_json::to_value(config()).unwrap();
        assert!(json.get("businessUnits").is_some());
        assert!(json.get("orderStatuses").is_some());
    }
}
