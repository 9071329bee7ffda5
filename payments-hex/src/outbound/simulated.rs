use std::time::Duration;

use async_trait::async_trait;
use payments_types::{PaymentProcessor, PaymentResult, PreparedPayment};
use rand::Rng;
use tokio::time::sleep;
use uuid::Uuid;

/// Stand-in for a remote payment gateway.
///
/// Each attempt is declined with probability `decline_rate`, fails
/// transiently with probability `transient_rate`, and succeeds otherwise.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    reference_prefix: String,
    decline_rate: f64,
    transient_rate: f64,
    latency: Duration,
}

impl SimulatedGateway {
    /// Creates a gateway that always succeeds instantly.
    pub fn new(reference_prefix: impl Into<String>) -> Self {
        Self {
            reference_prefix: reference_prefix.into(),
            decline_rate: 0.0,
            transient_rate: 0.0,
            latency: Duration::ZERO,
        }
    }

    /// Sets outcome probabilities. Both are clamped to `[0, 1]` and the
    /// transient rate is reduced so the two never sum past one.
    pub fn with_failure_rates(mut self, decline_rate: f64, transient_rate: f64) -> Self {
        self.decline_rate = decline_rate.clamp(0.0, 1.0);
        self.transient_rate = transient_rate.clamp(0.0, 1.0 - self.decline_rate);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn roll(&self) -> PaymentResult {
        let draw: f64 = rand::rng().random();
        if draw < self.decline_rate {
            PaymentResult::failed("declined by provider")
        } else if draw < self.decline_rate + self.transient_rate {
            PaymentResult::retryable("provider temporarily unavailable")
        } else {
            PaymentResult::succeeded(format!("{}_{}", self.reference_prefix, Uuid::new_v4()))
        }
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedGateway {
    async fn process(&self, _payment: &PreparedPayment) -> PaymentResult {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        self.roll()
    }
}
