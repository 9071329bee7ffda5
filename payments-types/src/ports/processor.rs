//! Payment processor port.
//!
//! Each payment provider integration is a variant implementing this trait.
//! Variants know nothing about validation, retries or registration.

use std::sync::Arc;

use crate::domain::{PaymentResult, PreparedPayment};

/// The capability every processor variant provides.
///
/// Transport problems belong in the returned [`PaymentResult`] as a
/// retryable failure, not in a panic or a separate error channel.
#[async_trait::async_trait]
pub trait PaymentProcessor: Send + Sync + 'static {
    /// Performs one processing attempt against the provider.
    async fn process(&self, payment: &PreparedPayment) -> PaymentResult;
}

/// Shared, type-erased processor as stored in a registry.
pub type ProcessorHandle = Arc<dyn PaymentProcessor>;

#[async_trait::async_trait]
impl<P: PaymentProcessor + ?Sized> PaymentProcessor for Arc<P> {
    async fn process(&self, payment: &PreparedPayment) -> PaymentResult {
        (**self).process(payment).await
    }
}
