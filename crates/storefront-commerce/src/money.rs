//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Catalog prices arrive
//! as JSON decimals and are converted once, at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
///
/// The catalog prices everything in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(109.95, Currency::USD);
    /// assert_eq!(price.amount_cents, 10995);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Parse an inclusive lower bound, rounding sub-cent input up.
    ///
    /// Returns `None` for anything that is not a finite, non-negative number.
    ///
    /// `"10.004"` becomes `10.01`, so a `10.00` price does not satisfy it.
    pub fn parse_lower_bound(input: &str, currency: Currency) -> Option<Self> {
        let scaled = scale(parse_non_negative(input)?, currency);
        Some(Self::new(snap(scaled).unwrap_or(scaled.ceil()) as i64, currency))
    }

    /// Parse an inclusive upper bound, rounding sub-cent input down.
    pub fn parse_upper_bound(input: &str, currency: Currency) -> Option<Self> {
        let scaled = scale(parse_non_negative(input)?, currency);
        Some(Self::new(snap(scaled).unwrap_or(scaled.floor()) as i64, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }
}

fn parse_non_negative(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn scale(value: f64, currency: Currency) -> f64 {
    value * 10_f64.powi(currency.decimal_places() as i32)
}

/// The integer `scaled` is meant to be, when it only misses by float noise
/// (`0.29 * 100` is `28.999999999999996`).
fn snap(scaled: f64) -> Option<f64> {
    let rounded = scaled.round();
    ((scaled - rounded).abs() < 1e-6).then_some(rounded)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter for prices that travel as plain JSON numbers in US dollars.
///
/// Use with `#[serde(with = "crate::money::usd_decimal")]`.
pub mod usd_decimal {
    use super::{Currency, Money};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() || value < 0.0 {
            return Err(de::Error::custom(format!("invalid price: {value}")));
        }
        Ok(Money::from_decimal(value, Currency::USD))
    }
}
