//! # Validation Module
//!
//! Boundary validation for records entering the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Forms (frontend)                                              │
//! │  ├── Numeric coercion (blank field → 0)                                 │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backoffice command (Rust)                                     │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: required fields, ranges, cross-field rules            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Record store                                                  │
//! │  └── Id assignment, existence checks                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation guards writes only. The derivations accept anything and
//! degrade instead of failing.
//!
//! ## Usage
//! ```rust
//! use multiluz_core::money::Money;
//! use multiluz_core::validation::{validate_email, validate_payment_value};
//!
//! assert!(validate_email("ana.costa@multiluz.com").is_ok());
//! assert!(validate_payment_value(Money::zero()).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Rate};
use crate::types::{Commission, CommissionStatus, Order, Payment, Salesperson, UserProfile};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted free-text field.
pub const MAX_TEXT_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field.
pub fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates the shape of an e-mail address.
///
/// Only the shape is checked: one `@`, a non-empty local part, and a dotted
/// domain without whitespace.
///
/// ```rust
/// use multiluz_core::validation::validate_email;
///
/// assert!(validate_email("bruno.gomes@multiluz.com").is_ok());
/// assert!(validate_email("bruno.gomes").is_err());
/// assert!(validate_email("bruno@multiluz").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_text("email", email)?;
    let email = email.trim();

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing '@'"))?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must contain exactly one '@' after a name"));
    }

    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid("domain must look like 'example.com'"));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a percentage field (0% to 100%).
pub fn validate_rate(field: &str, rate: Rate) -> ValidationResult<()> {
    if rate > Rate::FULL {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: Rate::FULL.bps() as i64,
        });
    }

    Ok(())
}

/// Validates a money field that may be zero but not negative.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a received installment amount.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_payment_value(value: Money) -> ValidationResult<()> {
    if !value.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "value".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates an order before create/update.
///
/// A zero order value is accepted; such an order simply never confirms.
pub fn validate_order(order: &Order) -> ValidationResult<()> {
    validate_text("customerName", &order.customer_name)?;
    validate_text("consultant", &order.consultant)?;
    validate_non_negative("orderValue", order.order_value)?;
    validate_rate("initialPaymentPercentage", order.initial_payment_percentage)?;
    validate_rate("downPaymentPercentage", order.down_payment_percentage)?;

    if let Some(cancelled_on) = order.cancellation_date {
        if cancelled_on < order.contract_creation_date {
            return Err(ValidationError::Inconsistent {
                field: "cancellationDate".to_string(),
                reason: "cannot precede the contract creation date".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_payment(payment: &Payment) -> ValidationResult<()> {
    validate_text("orderId", &payment.order_id)?;
    validate_payment_value(payment.value)
}

pub fn validate_salesperson(salesperson: &Salesperson) -> ValidationResult<()> {
    validate_text("name", &salesperson.name)?;
    validate_text("businessUnit", &salesperson.business_unit)?;
    validate_text("level", &salesperson.level)?;
    validate_non_negative("salesGoal", salesperson.sales_goal)
}

pub fn validate_profile(profile: &UserProfile) -> ValidationResult<()> {
    validate_text("name", &profile.name)?;
    validate_email(&profile.email)
}

/// Validates a commission.
///
/// ## Rules
/// - Must reference an order
/// - Rate within 0% to 100%
/// - `paymentDate` present if and only if the status is `Paid`
pub fn validate_commission(commission: &Commission) -> ValidationResult<()> {
    validate_text("orderId", &commission.order_id)?;
    validate_rate("commissionRate", commission.commission_rate)?;

    match (commission.status, commission.payment_date) {
        (CommissionStatus::Paid, None) => Err(ValidationError::Inconsistent {
            field: "paymentDate".to_string(),
            reason: "a paid commission needs a payment date".to_string(),
        }),
        (CommissionStatus::Pending, Some(_)) => Err(ValidationError::Inconsistent {
            field: "paymentDate".to_string(),
            reason: "a pending commission has no payment date".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Config Item Validators
// =============================================================================

/// Validates a new config list item and returns it trimmed.
///
/// `list` names the list for error messages; `existing` is its current
/// content.
pub fn validate_config_item(list: &str, value: &str, existing: &[String]) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: list.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: list.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    if existing.iter().any(|item| item == value) {
        return Err(ValidationError::Duplicate {
            field: list.to_string(),
            value: value.to_string(),
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderStatus, UserRole};
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, day).unwrap()
    }

    fn order() -> Order {
        Order {
            id: String::new(),
            customer_name: "Empresa Alpha".to_string(),
            consultant: "Ana Costa".to_string(),
            insurance: true,
            order_value: Money::from_reais(25_000),
            initial_payment_percentage: Rate::from_bps(1000),
            down_payment_percentage: Rate::from_bps(2000),
            down_payment_due_date: d(10, 20),
            city: "São Paulo".to_string(),
            contract_creation_date: d(10, 1),
            contract_signature_date: d(10, 5),
            payment_method: "Boleto".to_string(),
            origin: "Indicação".to_string(),
            prospected_by: "Ana Costa".to_string(),
            cancellation_date: None,
            order_status: OrderStatus::Active,
        }
    }

    #[test]
    fn test_validate_text() {
        assert!(validate_text("name", "Ana Costa").is_ok());
        assert!(matches!(
            validate_text("name", "   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_text("name", &"A".repeat(MAX_TEXT_LEN + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana.costa@multiluz.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("ana costa@multiluz.com").is_err());
        assert!(validate_email("@multiluz.com").is_err());
        assert!(validate_email("ana@@multiluz.com").is_err());
        assert!(validate_email("ana@multiluz.").is_err());
    }

    #[test]
    fn test_validate_order() {
        assert!(validate_order(&order()).is_ok());

        let zero_value = Order {
            order_value: Money::zero(),
            ..order()
        };
        assert!(validate_order(&zero_value).is_ok());

        let negative = Order {
            order_value: Money::from_cents(-1),
            ..order()
        };
        assert!(validate_order(&negative).is_err());

        let over_full = Order {
            down_payment_percentage: Rate::from_bps(10_001),
            ..order()
        };
        assert!(validate_order(&over_full).is_err());

        let no_customer = Order {
            customer_name: " ".to_string(),
            ..order()
        };
        assert!(validate_order(&no_customer).is_err());

        let cancelled_before_creation = Order {
            cancellation_date: Some(d(9, 30)),
            order_status: OrderStatus::Cancelled,
            ..order()
        };
        assert!(matches!(
            validate_order(&cancelled_before_creation),
            Err(ValidationError::Inconsistent { .. })
        ));
    }

    #[test]
    fn test_validate_payment() {
        let payment = Payment {
            id: String::new(),
            order_id: "ORD-001".to_string(),
            payment_date: d(10, 10),
            value: Money::from_reais(2_500),
        };
        assert!(validate_payment(&payment).is_ok());

        let zero = Payment {
            value: Money::zero(),
            ..payment.clone()
        };
        assert!(matches!(
            validate_payment(&zero),
            Err(ValidationError::MustBePositive { .. })
        ));

        let orphan = Payment {
            order_id: String::new(),
            ..payment
        };
        assert!(validate_payment(&orphan).is_err());
    }

    #[test]
    fn test_validate_salesperson_and_profile() {
        let sp = Salesperson {
            id: String::new(),
            name: "Diego Martins".to_string(),
            business_unit: "Belo Horizonte".to_string(),
            sales_goal: Money::from_reais(75_000),
            level: "Júnior".to_string(),
            hire_date: d(3, 1),
        };
        assert!(validate_salesperson(&sp).is_ok());
        assert!(validate_salesperson(&Salesperson {
            sales_goal: Money::from_cents(-100),
            ..sp.clone()
        })
        .is_err());
        assert!(validate_salesperson(&Salesperson {
            level: String::new(),
            ..sp
        })
        .is_err());

        let profile = UserProfile {
            id: String::new(),
            name: "Carlos Lima".to_string(),
            email: "carlos.lima@multiluz.com".to_string(),
            role: UserRole::Manager,
        };
        assert!(validate_profile(&profile).is_ok());
        assert!(validate_profile(&UserProfile {
            email: "carlos".to_string(),
            ..profile
        })
        .is_err());
    }

    #[test]
    fn test_validate_commission_payment_date_matches_status() {
        let pending = Commission {
            id: String::new(),
            order_id: "ORD-002".to_string(),
            commission_rate: Rate::from_bps(500),
            status: CommissionStatus::Pending,
            payment_date: None,
        };
        assert!(validate_commission(&pending).is_ok());

        let paid = Commission {
            status: CommissionStatus::Paid,
            payment_date: Some(d(11, 1)),
            ..pending.clone()
        };
        assert!(validate_commission(&paid).is_ok());

        let paid_without_date = Commission {
            payment_date: None,
            ..paid
        };
        assert!(validate_commission(&paid_without_date).is_err());

        let pending_with_date = Commission {
            payment_date: Some(d(11, 1)),
            ..pending
        };
        assert!(validate_commission(&pending_with_date).is_err());
    }

    #[test]
    fn test_validate_config_item() {
        let existing = vec!["Boleto".to_string(), "Pix".to_string()];
        assert_eq!(
            validate_config_item("paymentMethods", "  Cheque ", &existing).unwrap(),
            "Cheque"
        );
        assert!(matches!(
            validate_config_item("paymentMethods", "", &existing),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_config_item("paymentMethods", "Pix", &existing),
            Err(ValidationError::Duplicate { .. })
        ));
    }
}
