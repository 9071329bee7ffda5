//! Outcome of a single processing attempt.

use serde::{Deserialize, Serialize};

/// How a processing attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// The provider accepted the payment
    Succeeded,
    /// The provider rejected the payment; re-attempting will not help
    Failed,
    /// A transient problem; the caller should re-attempt
    RetryableFailure,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Succeeded => write!(f, "SUCCEEDED"),
            PaymentStatus::Failed => write!(f, "FAILED"),
            PaymentStatus::RetryableFailure => write!(f, "RETRYABLE_FAILURE"),
        }
    }
}

/// Result produced by a processor variant for one attempt.
///
/// Only the constructors below create results, so a success always carries
/// a provider reference and a failure always carries a detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentResult {
    status: PaymentStatus,
    /// Opaque reference assigned by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_detail: Option<String>,
}

impl PaymentResult {
    /// Creates a successful result carrying the provider's reference.
    pub fn succeeded(provider_reference: impl Into<String>) -> Self {
        Self {
            status: PaymentStatus::Succeeded,
            provider_reference: Some(provider_reference.into()),
            error_detail: None,
        }
    }

    /// Creates a permanent failure.
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            status: PaymentStatus::Failed,
            provider_reference: None,
            error_detail: Some(detail.into()),
        }
    }

    /// Creates a transient failure that may succeed on a later attempt.
    pub fn retryable(detail: impl Into<String>) -> Self {
        Self {
            status: PaymentStatus::RetryableFailure,
            provider_reference: None,
            error_detail: Some(detail.into()),
        }
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Returns the provider's reference; present exactly on success.
    pub fn provider_reference(&self) -> Option<&str> {
        self.provider_reference.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Succeeded
    }

    pub fn is_retryable(&self) -> bool {
        self.status == PaymentStatus::RetryableFailure
    }

    pub fn error_detail(&self) -> Option<&str> {
        self.error_detail.as_deref()
    }
}
