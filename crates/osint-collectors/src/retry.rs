//! Retry with exponential back-off and jitter for collector requests.
//!
//! Only [`CollectError::RateLimited`] is retried. Authentication, data and
//! status errors would fail the same way again, and network failures are
//! already bounded by the client timeout.

use std::future::Future;
use std::time::Duration;

use crate::error::CollectError;

const MAX_DELAY_MS: u64 = 60_000;

pub(crate) fn is_retriable(err: &CollectError) -> bool {
    match err {
        CollectError::RateLimited { .. } => true,
        CollectError::Authentication { .. }
        | CollectError::Network { .. }
        | CollectError::Data { .. }
        | CollectError::UnexpectedStatus { .. }
        | CollectError::InvalidSearch(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on rate limits.
///
/// The wait before retry `n` is `backoff_base_secs * 2^(n-1)` seconds ± 25 %
/// jitter, raised to the server's `Retry-After` hint when that is longer and
/// capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, CollectError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CollectError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(backoff_base_secs, attempt, &err);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "rate limited, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn backoff_delay_ms(backoff_base_secs: u64, attempt: u32, err: &CollectError) -> u64 {
    if backoff_base_secs == 0 {
        return 0;
    }
    let computed = backoff_base_secs
        .saturating_mul(1000)
        .saturating_mul(1u64 << (attempt - 1).min(10));
    let hinted = match err {
        CollectError::RateLimited {
            retry_after_secs, ..
        } => computed.max(retry_after_secs.saturating_mul(1000)),
        _ => computed,
    };
    let capped = hinted.min(MAX_DELAY_MS);
    (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64
}
