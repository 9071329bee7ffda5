//! Payment Dispatch Service
//!
//! Resolves a processor variant by name and runs it through the shared
//! validation and retry layer. Contains NO provider logic - variants are
//! reached only through the `PaymentProcessor` port.

use payments_types::{PaymentError, PaymentProcessor, PaymentRequest, PaymentResult};
use tracing::instrument;

use crate::registry::ProcessorRegistry;
use crate::retry::{RetryPolicy, with_retry};
use crate::validation::prepare;

/// Application service for dispatching payments.
///
/// Holds only immutable state, so clones can serve concurrent requests
/// without coordination.
#[derive(Debug, Clone)]
pub struct PaymentDispatcher {
    registry: ProcessorRegistry,
    policy: RetryPolicy,
    default_variant: Option<String>,
}

impl PaymentDispatcher {
    /// Creates a dispatcher over a frozen registry.
    pub fn new(registry: ProcessorRegistry, policy: RetryPolicy) -> Self {
        Self {
            registry,
            policy,
            default_variant: None,
        }
    }

    /// Configures the variant used by [`dispatch_default`](Self::dispatch_default).
    ///
    /// Fails with `UnknownVariant` if the name is not registered.
    pub fn with_default(mut self, name: impl AsRef<str>) -> Result<Self, PaymentError> {
        let name = name.as_ref().trim();
        self.registry.resolve(name)?;
        self.default_variant = Some(name.to_string());
        Ok(self)
    }

    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn default_variant(&self) -> Option<&str> {
        self.default_variant.as_deref()
    }

    /// Dispatches a payment to the named variant.
    ///
    /// The variant is resolved first, then the request is validated; a
    /// request that fails either check makes no attempt.
    #[instrument(
        skip(self, request),
        fields(idempotency_key = %request.idempotency_key())
    )]
    pub async fn dispatch(
        &self,
        variant: &str,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, PaymentError> {
        let processor = self.registry.resolve(variant)?;
        let payment = prepare(request)?;

        with_retry(|_| processor.process(&payment), &self.policy).await
    }

    /// Dispatches a payment to the configured default variant.
    pub async fn dispatch_default(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, PaymentError> {
        let variant = self
            .default_variant
            .as_deref()
            .ok_or_else(|| PaymentError::UnknownVariant("<default>".to_string()))?;

        self.dispatch(variant, request).await
    }
}
