use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use payments_types::{PaymentProcessor, PaymentResult, PreparedPayment};
use tokio::time::sleep;

/// Variant that replays a fixed sequence of outcomes.
///
/// Once the script runs out, the last outcome repeats. Every call to
/// `process` is counted, which makes it the reference variant for
/// exercising retry behaviour.
pub struct ScriptedProcessor {
    script: Vec<PaymentResult>,
    latency: Duration,
    attempts: AtomicU32,
}

impl ScriptedProcessor {
    /// Creates a variant that answers with `script` in order.
    ///
    /// An empty script behaves like a provider that is always busy.
    pub fn new(script: Vec<PaymentResult>) -> Self {
        Self {
            script,
            latency: Duration::ZERO,
            attempts: AtomicU32::new(0),
        }
    }

    /// Creates a variant that always answers with `outcome`.
    pub fn always(outcome: PaymentResult) -> Self {
        Self::new(vec![outcome])
    }

    /// Delays every attempt by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of attempts received so far.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    fn outcome_for(&self, attempt: u32) -> PaymentResult {
        let index = (attempt as usize).min(self.script.len().saturating_sub(1));
        self.script
            .get(index)
            .cloned()
            .unwrap_or_else(|| PaymentResult::retryable("no scripted outcome"))
    }
}

#[async_trait]
impl PaymentProcessor for ScriptedProcessor {
    async fn process(&self, _payment: &PreparedPayment) -> PaymentResult {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        self.outcome_for(attempt)
    }
}
