//! Pre-flight checks shared by every processor variant.

use payments_types::{DomainError, PaymentRequest, PreparedPayment};
use tracing::debug;

/// Validates a request before any variant-specific logic runs.
///
/// Fails with `InvalidAmount` when the amount is not positive (or too
/// precise for its currency) and with `InvalidCurrency` when the currency
/// code is not recognised.
pub fn prepare(request: &PaymentRequest) -> Result<PreparedPayment, DomainError> {
    let prepared = PreparedPayment::try_from(request).inspect_err(|e| {
        debug!(
            idempotency_key = %request.idempotency_key(),
            error = %e,
            "payment request rejected"
        );
    })?;
    Ok(prepared)
}
