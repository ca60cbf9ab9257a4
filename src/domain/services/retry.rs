//! Bounded retry for operations that may fail temporarily
//!
//! Used at two levels: around each transaction attempt in the scanner and
//! around each event handler in the projectors.

use std::future::Future;
use tokio::time::{sleep, Duration};

use crate::utils::logging;

/// Fixed-delay bounded retry. "Processed without throwing" counts as
/// success; the last error is returned once the attempt budget is spent.
#[derive(Debug, Clone)]
pub struct RetryHandler {
    attempts: u32,
    delay_ms: u64,
}

impl RetryHandler {
    pub fn new() -> Self {
        Self {
            attempts: 10,
            delay_ms: 1000,
        }
    }

    pub fn with_config(attempts: u32, delay_ms: u64) -> Self {
        Self { attempts, delay_ms }
    }

    /// Run an operation up to the configured attempt count, sleeping the
    /// configured delay between attempts
    pub async fn retry_until<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;

                    if attempt >= self.attempts {
                        return Err(e);
                    }

                    logging::log_warning(&format!(
                        "Operation failed (attempt {}/{}): {}. Retrying in {}ms",
                        attempt, self.attempts, e, self.delay_ms
                    ));

                    sleep(Duration::from_millis(self.delay_ms)).await;
                }
            }
        }
    }
}

impl Default for RetryHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    #[tokio::test]
    async fn gives_up_after_exactly_the_configured_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let handler = RetryHandler::with_config(10, 5);

        let start = Instant::now();
        let result: Result<(), String> = handler
            .retry_until(|| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err("always failing".to_string())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 10);
        // Nine sleeps of 5ms between the ten attempts
        assert!(start.elapsed() >= Duration::from_millis(45));
    }

    #[tokio::test]
    async fn stops_retrying_on_first_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let handler = RetryHandler::with_config(10, 1);

        let result: Result<u32, String> = handler
            .retry_until(|| {
                let calls = calls.clone();
                async move {
                    let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    if attempt < 3 {
                        Err("not yet".to_string())
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
