//! Type-safe price representation using decimal arithmetic.
//!
//! Menu prices and cart totals are exact decimals; floating point never
//! touches money. Display always renders two decimal places with the
//! currency symbol, e.g. `$35.97`.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative amount of money with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PriceFields")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// Create a USD price from a whole number of cents.
    #[must_use]
    pub fn usd_cents(cents: u32) -> Self {
        Self {
            amount: Decimal::new(i64::from(cents), 2),
            currency_code: CurrencyCode::USD,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Multiply by a quantity (unit price × quantity), saturating at the
    /// decimal range.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount.saturating_mul(Decimal::from(quantity)),
            currency_code: self.currency_code,
        }
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

/// Wire shape of a [`Price`], checked on the way in.
#[derive(Deserialize)]
struct PriceFields {
    amount: Decimal,
    currency_code: CurrencyCode,
}

impl TryFrom<PriceFields> for Price {
    type Error = PriceError;

    fn try_from(fields: PriceFields) -> Result<Self, Self::Error> {
        Self::new(fields.amount, fields.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    /// Adds two prices. The left-hand currency wins; the catalog is
    /// single-currency so mixed additions do not occur.
    fn add(self, rhs: Self) -> Self {
        Self {
            amount: self.amount.saturating_add(rhs.amount),
            currency_code: self.currency_code,
        }
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(CurrencyCode::default()), Add::add)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        let result = Price::new(Decimal::new(-1, 2), CurrencyCode::USD);
        assert!(matches!(result, Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_zero_is_allowed() {
        assert!(Price::new(Decimal::ZERO, CurrencyCode::USD).unwrap().is_zero());
    }

    #[test]
    fn test_times_is_exact() {
        let burger = Price::usd_cents(1299);
        assert_eq!(burger.times(2).amount(), Decimal::new(2598, 2));
        assert_eq!(burger.times(0).amount(), Decimal::ZERO);
    }

    #[test]
    fn test_sum_of_lines() {
        let total: Price = [Price::usd_cents(2598), Price::usd_cents(999)]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), Decimal::new(3597, 2));
        assert_eq!(total.display(), "$35.97");
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(Price::usd_cents(500).display(), "$5.00");
        assert_eq!(Price::zero(CurrencyCode::GBP).display(), "£0.00");
    }

    #[test]
    fn test_serializes_amount_as_string() {
        let json = serde_json::to_value(Price::usd_cents(1299)).unwrap();
        assert_eq!(json["amount"], "12.99");
        assert_eq!(json["currency_code"], "USD");
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let price: Price =
            serde_json::from_str(r#"{"amount":"8.99","currency_code":"USD"}"#).unwrap();
        assert_eq!(price, Price::usd_cents(899));

        let result =
            serde_json::from_str::<Price>(r#"{"amount":"-8.99","currency_code":"USD"}"#);
        assert!(result.is_err());
    }
}
