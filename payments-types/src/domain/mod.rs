//! Domain models for payment dispatch.

pub mod money;
pub mod request;
pub mod result;

pub use money::{Currency, Money};
pub use request::{IdempotencyKey, PaymentRequest, PreparedPayment};
pub use result::{PaymentResult, PaymentStatus};
