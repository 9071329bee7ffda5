//! Type-safe monetary value with embedded currency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Currencies recognised by the payment system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    INR,
    JPY,
}

impl Currency {
    /// Returns the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::USD | Currency::EUR | Currency::GBP | Currency::INR => 2,
            Currency::JPY => 0,
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::INR => "₹",
            Currency::JPY => "¥",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    /// Parses an ISO 4217 code, ignoring surrounding whitespace and case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "INR" => Ok(Currency::INR),
            "JPY" => Ok(Currency::JPY),
            _ => Err(DomainError::InvalidCurrency(s.to_string())),
        }
    }
}

/// A strictly positive amount in a recognised currency.
///
/// The amount is a decimal in major units (dollars, euros) and never carries
/// more fractional digits than the currency's minor unit allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value.
    pub fn new(amount: Decimal, currency: Currency) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::InvalidAmount {
                amount,
                reason: "amount must be greater than zero".into(),
            });
        }
        if amount.normalize().scale() > currency.decimal_places() {
            return Err(DomainError::InvalidAmount {
                amount,
                reason: format!(
                    "{} allows at most {} decimal places",
                    currency,
                    currency.decimal_places()
                ),
            });
        }
        Ok(Self { amount, currency })
    }

    /// Returns the amount in major currency units.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.currency.decimal_places();
        write!(
            f,
            "{}{:.*}",
            self.currency.symbol(),
            places as usize,
            self.amount
        )
    }
}
