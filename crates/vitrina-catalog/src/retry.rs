//! Retry with exponential backoff for transient catalog fetch errors.
//!
//! Rate limiting (429) and network-level failures are retried; everything
//! else (404s, parse failures, API-level errors) is propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`CatalogError::RateLimited`] — HTTP 429; the server asked us to back off.
/// - [`CatalogError::Http`] — network-level failure (connection reset, timeout).
///
/// Non-retriable errors (propagated immediately):
/// - [`CatalogError::NotFound`] — retrying returns the same result.
/// - [`CatalogError::UnexpectedStatus`] — non-transient HTTP status.
/// - [`CatalogError::Deserialize`] — the body does not parse; retrying won't fix it.
/// - [`CatalogError::Api`] — the API rejected the query itself.
/// - [`CatalogError::InvalidShopDomain`] — configuration problem.
fn is_retriable(err: &CatalogError) -> bool {
    matches!(
        err,
        CatalogError::RateLimited { .. } | CatalogError::Http(_)
    )
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On a retriable error the function sleeps for
/// `backoff_base_secs * 2^attempt` seconds and tries again, up to
/// `max_retries` additional attempts after the first try. The last error is
/// returned once retries are exhausted; non-retriable errors return
/// immediately without sleeping.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut last_err;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                last_err = err;
            }
        }

        // Exponential backoff: base * 2^attempt seconds, shift capped to
        // keep the multiplication in range on extreme configs.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient catalog error — retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
