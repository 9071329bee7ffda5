//! Port traits (interfaces for adapters).
//!
//! These are the contracts that processor variants must implement.
//! The dispatcher depends on these traits, not concrete implementations.

mod processor;

pub use processor::{PaymentProcessor, ProcessorHandle};
