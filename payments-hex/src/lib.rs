//! # Payments Hex
//!
//! Application service layer for dispatching payments to processor variants.
//!
//! ## Architecture
//!
//! - `validation/` - Pre-flight checks every request passes before a variant sees it
//! - `retry/` - Retry policy, backoff and the retry executor
//! - `registry/` - Named variants, frozen after startup
//! - `service/` - Dispatcher tying the above together
//! - `outbound/` - Simulated processor variants
//!
//! Variants are `Arc<dyn PaymentProcessor>` trait objects, so new providers
//! plug in without changes to the dispatcher.

pub mod outbound;
pub mod registry;
pub mod retry;
pub mod service;
pub mod validation;

#[cfg(test)]
mod service_tests;

pub use registry::{ProcessorRegistry, RegistryBuilder};
pub use retry::{Backoff, RetryPolicy, with_retry};
pub use service::PaymentDispatcher;
pub use validation::prepare;
