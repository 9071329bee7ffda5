//! Error types for payment dispatch.

use rust_decimal::Decimal;

use crate::domain::PaymentResult;

/// Domain-level errors (request validation failures).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: Decimal, reason: String },

    #[error("Unrecognized currency code: {0:?}")]
    InvalidCurrency(String),
}

/// Service-level errors surfaced by registration and dispatch.
///
/// Validation errors are wrapped unchanged; registration errors are meant
/// to abort startup.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Processor variant already registered: {0}")]
    DuplicateVariant(String),

    #[error("Unknown processor variant: {0}")]
    UnknownVariant(String),

    #[error("Processor variant name cannot be empty")]
    InvalidVariantName,

    #[error("Retries exhausted after {attempts} attempts: {}", .last.error_detail().unwrap_or("no detail"))]
    RetryExhausted { attempts: u32, last: PaymentResult },
}

impl PaymentError {
    /// Returns the number of attempts made before this error was produced.
    ///
    /// Validation and registry errors happen before any attempt.
    pub fn attempts(&self) -> u32 {
        match self {
            PaymentError::RetryExhausted { attempts, .. } => *attempts,
            _ => 0,
        }
    }
}
