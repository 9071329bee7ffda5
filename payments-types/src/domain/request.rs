//! Payment request models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::{Currency, Money};
use crate::error::DomainError;

/// Caller-supplied token that lets a provider recognise repeated
/// submissions of the same logical payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Wraps an existing key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generates a fresh random key.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A payment as submitted by the caller, before validation.
///
/// Requests are immutable once created. The amount and currency code are
/// kept exactly as supplied so that validation can report what was wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    amount: Decimal,
    currency: String,
    idempotency_key: IdempotencyKey,
    requested_at: DateTime<Utc>,
}

impl PaymentRequest {
    /// Creates a new payment request stamped with the current time.
    pub fn new(
        amount: Decimal,
        currency: impl Into<String>,
        idempotency_key: IdempotencyKey,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            idempotency_key,
            requested_at: Utc::now(),
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency code as supplied by the caller.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn idempotency_key(&self) -> &IdempotencyKey {
        &self.idempotency_key
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }
}

/// A request that passed validation.
///
/// This is the only form of a payment that processor variants accept, so a
/// request with a non-positive amount or unknown currency can never reach
/// one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedPayment {
    money: Money,
    idempotency_key: IdempotencyKey,
    requested_at: DateTime<Utc>,
}

impl PreparedPayment {
    pub fn money(&self) -> Money {
        self.money
    }

    pub fn amount(&self) -> Decimal {
        self.money.amount()
    }

    pub fn currency(&self) -> Currency {
        self.money.currency()
    }

    pub fn idempotency_key(&self) -> &IdempotencyKey {
        &self.idempotency_key
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }
}

impl TryFrom<&PaymentRequest> for PreparedPayment {
    type Error = DomainError;

    /// Validates the amount first, then the currency code, then precision.
    fn try_from(req: &PaymentRequest) -> Result<Self, Self::Error> {
        if req.amount <= Decimal::ZERO {
            return Err(DomainError::InvalidAmount {
                amount: req.amount,
                reason: "amount must be greater than zero".into(),
            });
        }
        let currency: Currency = req.currency.parse()?;
        let money = Money::new(req.amount, currency)?;

        Ok(Self {
            money,
            idempotency_key: req.idempotency_key.clone(),
            requested_at: req.requested_at,
        })
    }
}
