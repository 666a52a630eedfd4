//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are decimal values to avoid floating-point drift in cart totals.
//! The marketplace lists in Vietnamese đồng by default, which has no minor
//! unit, so amounts are whole numbers in the common case.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g. `120000 ₫` or `19.99 $`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.amount, self.currency_code.symbol())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    VND,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::VND => "₫",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::VND => "VND",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        let price = Price::new(Decimal::from(120_000), CurrencyCode::VND);
        assert_eq!(price.display(), "120000 ₫");
    }

    #[test]
    fn test_currency_code() {
        assert_eq!(CurrencyCode::VND.code(), "VND");
        assert_eq!(CurrencyCode::default(), CurrencyCode::VND);
    }
}
