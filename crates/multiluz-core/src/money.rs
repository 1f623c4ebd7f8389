//! # Money Module
//!
//! Provides the `Money` type for monetary values and the `Rate` type for
//! the percentages applied to them (down payment, initial payment,
//! commission).
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Two installments of R$ 0,10 and R$ 0,20 against a R$ 0,30 order:      │
//! │    0.1 + 0.2 = 0.30000000000000004  → balance -0.00000000000000004     │
//! │    → "PAGAMENTO CONFIRMADO" only by luck of the rounding               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer centavos                                         │
//! │    10 + 20 = 30 centavos, balance exactly 0                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use multiluz_core::money::{Money, Rate};
//!
//! let order_value = Money::from_reais(25_000);
//! let down_payment = order_value.apply_rate(Rate::from_bps(2000)); // 20%
//! assert_eq!(down_payment, Money::from_reais(5_000));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest BRL unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: balances go negative when an order is overpaid
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as the raw centavo count**
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ```rust
    /// use multiluz_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole reais.
    #[inline]
    pub const fn from_reais(reais: i64) -> Self {
        Money(reais * 100)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion (truncated toward zero).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a rate to this amount, rounding half away from zero.
    ///
    /// ## Implementation
    /// Integer math on i128: `(amount * bps ± 5000) / 10000`.
    ///
    /// ```rust
    /// use multiluz_core::money::{Money, Rate};
    ///
    /// // R$ 0,15 at 50% = R$ 0,075 → R$ 0,08
    /// let half = Money::from_cents(15).apply_rate(Rate::from_bps(5000));
    /// assert_eq!(half.cents(), 8);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let product = self.0 as i128 * rate.bps() as i128;
        let rounded = if product >= 0 {
            (product + 5000) / 10000
        } else {
            (product - 5000) / 10000
        };
        Money::from_cents(rounded as i64)
    }

    /// Whether this amount has reached `rate` of `whole`, compared without
    /// rounding the threshold to whole centavos.
    ///
    /// ```rust
    /// use multiluz_core::money::{Money, Rate};
    ///
    /// // 15% of R$ 1.000,03 is R$ 150,0045
    /// let whole = Money::from_cents(100_003);
    /// assert!(!Money::from_cents(15_000).reaches_share_of(whole, Rate::from_bps(1500)));
    /// assert!(Money::from_cents(15_001).reaches_share_of(whole, Rate::from_bps(1500)));
    /// ```
    pub fn reaches_share_of(&self, whole: Money, rate: Rate) -> bool {
        self.0 as i128 * 10_000 >= whole.0 as i128 * rate.bps() as i128
    }

    /// Ratio of this amount to `whole`, as a percentage for display.
    ///
    /// Returns 0 when `whole` is not positive.
    pub fn percent_of(&self, whole: Money) -> f64 {
        if !whole.is_positive() {
            return 0.0;
        }
        self.0 as f64 * 100.0 / whole.0 as f64
    }
}

/// Display shows the amount with a BRL prefix (debugging and logs only;
/// the frontend owns localized formatting).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R$ {}.{:02}", sign, self.reais().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Rate
// =============================================================================

/// A fraction of an amount, in basis points (1 bps = 0.01%).
///
/// ## Why Basis Points?
/// Every percentage the back-office uses (10%, 15%, 20%, 5% commission,
/// 7% commission, the 80% milestone) is exact in bps, so thresholds never
/// drift by a centavo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// 100%.
    pub const FULL: Rate = Rate(10_000);

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a fraction (0.05 → 5%), clamping negatives to 0.
    ///
    /// Form fields arrive as fractions; this is the only float entry point.
    pub fn from_fraction(fraction: f64) -> Self {
        if !fraction.is_finite() || fraction <= 0.0 {
            return Rate(0);
        }
        Rate((fraction * 10_000.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Returns the rate as a percentage (display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reais() {
        let money = Money::from_reais(25_000);
        assert_eq!(money.cents(), 2_500_000);
        assert_eq!(money.reais(), 25_000);
        assert_eq!(money.cents_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "R$ 10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-R$ 5.50");
        assert_eq!(format!("{}", Money::zero()), "R$ 0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_apply_rate_exact() {
        let value = Money::from_reais(120_000);
        assert_eq!(value.apply_rate(Rate::from_bps(1000)), Money::from_reais(12_000));
        assert_eq!(value.apply_rate(Rate::from_bps(8000)), Money::from_reais(96_000));
        assert_eq!(value.apply_rate(Rate::FULL), value);
    }

    #[test]
    fn test_apply_rate_rounds_half_away_from_zero() {
        assert_eq!(Money::from_cents(15).apply_rate(Rate::from_bps(5000)).cents(), 8);
        assert_eq!(Money::from_cents(-15).apply_rate(Rate::from_bps(5000)).cents(), -8);
        assert_eq!(Money::from_cents(1).apply_rate(Rate::from_bps(8000)).cents(), 1);
    }

    #[test]
    fn test_reaches_share_of_is_exact() {
        let whole = Money::from_cents(100_003);
        let fifteen = Rate::from_bps(1500);
        assert_eq!(whole.apply_rate(fifteen).cents(), 15_000);
        assert!(!Money::from_cents(15_000).reaches_share_of(whole, fifteen));
        assert!(Money::from_cents(15_001).reaches_share_of(whole, fifteen));
        assert!(whole.reaches_share_of(whole, Rate::FULL));
        assert!(!Money::from_cents(100_002).reaches_share_of(whole, Rate::FULL));
        assert!(Money::zero().reaches_share_of(Money::zero(), Rate::FULL));
    }

    #[test]
    fn test_rate_from_fraction() {
        assert_eq!(Rate::from_fraction(0.05).bps(), 500);
        assert_eq!(Rate::from_fraction(0.15).bps(), 1500);
        assert_eq!(Rate::from_fraction(-0.2).bps(), 0);
        assert_eq!(Rate::from_fraction(f64::NAN).bps(), 0);
        assert!((Rate::from_bps(700).percentage() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_of() {
        let half = Money::from_reais(50);
        assert!((half.percent_of(Money::from_reais(100)) - 50.0).abs() < 1e-9);
        assert_eq!(half.percent_of(Money::zero()), 0.0);
    }
}
