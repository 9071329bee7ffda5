//! PaymentDispatcher unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use payments_types::{
        DomainError, IdempotencyKey, PaymentError, PaymentProcessor, PaymentRequest,
        PaymentResult, PaymentStatus, PreparedPayment,
    };

    use crate::outbound::ScriptedProcessor;
    use crate::{Backoff, PaymentDispatcher, ProcessorRegistry, RetryPolicy};

    /// Variant that panics if it is ever reached.
    pub struct Unreachable;

    #[async_trait]
    impl PaymentProcessor for Unreachable {
        async fn process(&self, _payment: &PreparedPayment) -> PaymentResult {
            panic!("variant must not be invoked")
        }
    }

    /// Variant that keeps the last payment it received.
    pub struct RecordingProcessor {
        last: Mutex<Option<PreparedPayment>>,
    }

    impl RecordingProcessor {
        pub fn new() -> Self {
            Self {
                last: Mutex::new(None),
            }
        }

        pub fn last(&self) -> Option<PreparedPayment> {
            self.last.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentProcessor for RecordingProcessor {
        async fn process(&self, payment: &PreparedPayment) -> PaymentResult {
            *self.last.lock().unwrap() = Some(payment.clone());
            PaymentResult::succeeded("recorded")
        }
    }

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts).with_backoff(Backoff::Fixed(Duration::ZERO))
    }

    fn request(amount: Decimal) -> PaymentRequest {
        PaymentRequest::new(amount, "USD", IdempotencyKey::random())
    }

    fn dispatcher_with(
        name: &str,
        processor: Arc<ScriptedProcessor>,
        max_attempts: u32,
    ) -> PaymentDispatcher {
        let mut builder = ProcessorRegistry::builder();
        builder.register(name, processor).unwrap();
        PaymentDispatcher::new(builder.build(), policy(max_attempts))
    }

    #[tokio::test]
    async fn test_dispatch_success_first_attempt() {
        let gateway = Arc::new(ScriptedProcessor::always(PaymentResult::succeeded("A-1")));
        let dispatcher = dispatcher_with("gatewayA", gateway.clone(), 3);

        let result = dispatcher
            .dispatch("gatewayA", &request(dec!(100)))
            .await
            .unwrap();

        assert_eq!(result.status(), PaymentStatus::Succeeded);
        assert_eq!(result.provider_reference(), Some("A-1"));
        assert_eq!(gateway.attempts(), 1);
    }

    #[tokio::test]
    async fn test_negative_amount_makes_no_attempt() {
        let gateway = Arc::new(ScriptedProcessor::always(PaymentResult::succeeded("A-1")));
        let dispatcher = dispatcher_with("gatewayA", gateway.clone(), 3);

        let result = dispatcher.dispatch("gatewayA", &request(dec!(-5))).await;

        assert!(matches!(
            result,
            Err(PaymentError::Domain(DomainError::InvalidAmount { .. }))
        ));
        assert_eq!(gateway.attempts(), 0);
    }

    #[tokio::test]
    async fn test_invalid_requests_never_reach_variant() {
        let mut builder = ProcessorRegistry::builder();
        builder.register("guarded", Unreachable).unwrap();
        let dispatcher = PaymentDispatcher::new(builder.build(), policy(3));

        let zero = dispatcher.dispatch("guarded", &request(Decimal::ZERO)).await;
        assert!(matches!(
            zero,
            Err(PaymentError::Domain(DomainError::InvalidAmount { .. }))
        ));

        let bad_currency = PaymentRequest::new(dec!(10), "ZZZ", IdempotencyKey::random());
        let result = dispatcher.dispatch("guarded", &bad_currency).await;
        assert!(matches!(
            result,
            Err(PaymentError::Domain(DomainError::InvalidCurrency(_)))
        ));
    }

    #[tokio::test]
    async fn test_unknown_variant() {
        let gateway = Arc::new(ScriptedProcessor::always(PaymentResult::succeeded("A-1")));
        let dispatcher = dispatcher_with("gatewayA", gateway, 3);

        let result = dispatcher.dispatch("unknown", &request(dec!(100))).await;

        assert!(matches!(result, Err(PaymentError::UnknownVariant(name)) if name == "unknown"));
    }

    #[tokio::test]
    async fn test_unknown_variant_reported_before_validation() {
        let dispatcher = PaymentDispatcher::new(ProcessorRegistry::builder().build(), policy(3));

        let result = dispatcher.dispatch("unknown", &request(dec!(-5))).await;

        assert!(matches!(result, Err(PaymentError::UnknownVariant(_))));
    }

    #[tokio::test]
    async fn test_registered_names_always_resolve() {
        let names = ["gatewayA", "gatewayB", "gateway-c", "x"];
        let mut builder = ProcessorRegistry::builder();
        for name in names {
            builder
                .register(name, ScriptedProcessor::always(PaymentResult::failed("declined")))
                .unwrap();
        }
        let dispatcher = PaymentDispatcher::new(builder.build(), policy(3));

        for name in names {
            let result = dispatcher.dispatch(name, &request(dec!(1))).await;
            assert!(
                !matches!(result, Err(PaymentError::UnknownVariant(_))),
                "{name} should resolve"
            );
        }
    }

    #[tokio::test]
    async fn test_recovers_after_two_transient_failures() {
        let gateway = Arc::new(ScriptedProcessor::new(vec![
            PaymentResult::retryable("busy"),
            PaymentResult::retryable("busy"),
            PaymentResult::succeeded("A-3"),
        ]));
        let dispatcher = dispatcher_with("gatewayA", gateway.clone(), 3);

        let result = dispatcher
            .dispatch("gatewayA", &request(dec!(100)))
            .await
            .unwrap();

        assert!(result.is_success());
        assert_eq!(gateway.attempts(), 3);
    }

    #[tokio::test]
    async fn test_permanent_retryable_failure_exhausts_policy() {
        for max_attempts in [1, 3, 7] {
            let gateway = Arc::new(ScriptedProcessor::always(PaymentResult::retryable(
                "provider down",
            )));
            let dispatcher = dispatcher_with("gatewayB", gateway.clone(), max_attempts);

            let err = dispatcher
                .dispatch("gatewayB", &request(dec!(100)))
                .await
                .unwrap_err();

            assert_eq!(gateway.attempts(), max_attempts);
            match err {
                PaymentError::RetryExhausted { attempts, last } => {
                    assert_eq!(attempts, max_attempts);
                    assert_eq!(last.error_detail(), Some("provider down"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_permanent_failure_returned_after_one_attempt() {
        let gateway = Arc::new(ScriptedProcessor::new(vec![
            PaymentResult::failed("card declined"),
            PaymentResult::succeeded("never"),
        ]));
        let dispatcher = dispatcher_with("gatewayA", gateway.clone(), 3);

        let result = dispatcher
            .dispatch("gatewayA", &request(dec!(100)))
            .await
            .unwrap();

        assert_eq!(result.status(), PaymentStatus::Failed);
        assert_eq!(gateway.attempts(), 1);
    }

    #[tokio::test]
    async fn test_variant_receives_validated_payment() {
        let gateway = Arc::new(RecordingProcessor::new());
        let mut builder = ProcessorRegistry::builder();
        builder.register("gatewayA", gateway.clone()).unwrap();
        let dispatcher = PaymentDispatcher::new(builder.build(), policy(3));
        let req = PaymentRequest::new(dec!(42.50), "gbp", IdempotencyKey::new("order-42"));

        dispatcher.dispatch("gatewayA", &req).await.unwrap();

        let payment = gateway.last().expect("variant was not invoked");
        assert_eq!(payment.amount(), dec!(42.50));
        assert_eq!(payment.currency(), payments_types::Currency::GBP);
        assert_eq!(payment.idempotency_key().as_str(), "order-42");
    }

    #[tokio::test]
    async fn test_default_variant() {
        let gateway = Arc::new(ScriptedProcessor::always(PaymentResult::succeeded("A-1")));
        let dispatcher = dispatcher_with("gatewayA", gateway.clone(), 3)
            .with_default("gatewayA")
            .unwrap();

        assert_eq!(dispatcher.default_variant(), Some("gatewayA"));
        let result = dispatcher.dispatch_default(&request(dec!(5))).await.unwrap();
        assert!(result.is_success());
        assert_eq!(gateway.attempts(), 1);
    }

    #[tokio::test]
    async fn test_default_variant_must_be_registered() {
        let gateway = Arc::new(ScriptedProcessor::always(PaymentResult::succeeded("A-1")));
        let result = dispatcher_with("gatewayA", gateway, 3).with_default("gatewayZ");
        assert!(matches!(result, Err(PaymentError::UnknownVariant(name)) if name == "gatewayZ"));
    }

    #[tokio::test]
    async fn test_missing_default_variant() {
        let gateway = Arc::new(ScriptedProcessor::always(PaymentResult::succeeded("A-1")));
        let dispatcher = dispatcher_with("gatewayA", gateway, 3);

        let result = dispatcher.dispatch_default(&request(dec!(5))).await;
        assert!(matches!(result, Err(PaymentError::UnknownVariant(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_variant_times_out_and_retries() {
        let gateway = Arc::new(
            ScriptedProcessor::always(PaymentResult::succeeded("late"))
                .with_latency(Duration::from_secs(5)),
        );
        let mut builder = ProcessorRegistry::builder();
        builder.register("slow", gateway.clone()).unwrap();
        let dispatcher = PaymentDispatcher::new(
            builder.build(),
            policy(3).with_attempt_timeout(Duration::from_millis(200)),
        );

        let err = dispatcher
            .dispatch("slow", &request(dec!(10)))
            .await
            .unwrap_err();

        assert_eq!(err.attempts(), 3);
        assert_eq!(gateway.attempts(), 3);
    }
}
