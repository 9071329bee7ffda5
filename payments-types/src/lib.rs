//! # Payments Types
//!
//! Domain types and the processor port for payment dispatch.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Money, PaymentRequest, PaymentResult)
//! - `ports/` - Trait definitions that processor variants must implement
//! - `error/` - Domain and service error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Currency, IdempotencyKey, Money, PaymentRequest, PaymentResult, PaymentStatus,
    PreparedPayment,
};
pub use error::{DomainError, PaymentError};
pub use ports::{PaymentProcessor, ProcessorHandle};
