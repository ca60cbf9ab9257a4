//! Queue consumers
//!
//! One worker per named queue. Jobs are delivered to a handler with bounded
//! concurrency; a failed delivery is retried with exponential backoff up to
//! the configured attempt count, then logged as permanently failed.
//! Completed jobs are dropped immediately, which bounds storage growth.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::time::sleep;

use async_trait::async_trait;

use crate::domain::errors::ProjectionError;
use crate::domain::models::EventJob;
use crate::infrastructure::queue::job_queue::QueueConfig;
use crate::utils::logging;

/// A registered consumer. Success is signalled by returning, failure by an
/// error, which triggers the broker-level retry.
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn handle(&self, job: EventJob) -> Result<(), ProjectionError>;
}

/// Consumes one queue and delivers its jobs
pub struct QueueWorker {
    queue_name: &'static str,
    receiver: mpsc::UnboundedReceiver<EventJob>,
    handler: Arc<dyn JobHandler>,
    config: QueueConfig,
}

impl QueueWorker {
    pub fn new(
        queue_name: &'static str,
        receiver: mpsc::UnboundedReceiver<EventJob>,
        handler: Arc<dyn JobHandler>,
        config: QueueConfig,
    ) -> Self {
        Self {
            queue_name,
            receiver,
            handler,
            config,
        }
    }

    /// Run until the producing side closes. Each job takes a concurrency
    /// permit, so at most `config.concurrency` deliveries are in flight.
    pub async fn run(mut self) {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));

        logging::log_info(&format!(
            "[{}] Worker started (concurrency: {}, attempts: {})",
            self.queue_name, self.config.concurrency, self.config.attempts
        ));

        while let Some(job) = self.receiver.recv().await {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let handler = self.handler.clone();
            let config = self.config.clone();
            let queue_name = self.queue_name;

            tokio::spawn(async move {
                let _permit = permit;
                deliver(queue_name, handler, job, &config).await;
            });
        }

        logging::log_info(&format!("[{}] Worker stopped", self.queue_name));
    }
}

/// Deliver one job, retrying with exponential backoff
async fn deliver(
    queue_name: &str,
    handler: Arc<dyn JobHandler>,
    job: EventJob,
    config: &QueueConfig,
) {
    let job_name = job.event_type.job_name();

    for attempt in 1..=config.attempts {
        match handler.handle(job.clone()).await {
            Ok(()) => return,
            Err(e) => {
                if attempt >= config.attempts {
                    logging::log_error(&format!(
                        "[{}] Job {} for tx {} failed permanently after {} attempts: {}",
                        queue_name, job_name, job.receipt.tx_hash, config.attempts, e
                    ));
                    return;
                }

                let delay = config.backoff_base_ms * 2_u64.pow(attempt.saturating_sub(1));
                logging::log_warning(&format!(
                    "[{}] Job {} failed (attempt {}/{}): {}. Retrying in {}ms",
                    queue_name, job_name, attempt, config.attempts, e, delay
                ));
                sleep(Duration::from_millis(delay)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{EventData, EventKind, ReceiptContext, TransferData};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FailingHandler {
        calls: Arc<AtomicU32>,
        succeed_on: u32,
    }

    #[async_trait]
    impl JobHandler for FailingHandler {
        async fn handle(&self, _job: EventJob) -> Result<(), ProjectionError> {
            let attempt = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt >= self.succeed_on {
                Ok(())
            } else {
                Err(ProjectionError::ProcessingError("boom".to_string()))
            }
        }
    }

    fn test_job() -> EventJob {
        EventJob {
            receipt: ReceiptContext {
                tx_hash: "0x1".to_string(),
                block_number: 1,
                chain_id: 1315,
                timestamp_ms: 0,
            },
            return_values: EventData::Transfer(TransferData {
                from: "0xa".to_string(),
                to: "0xb".to_string(),
                token_id: "0x1".to_string(),
            }),
            event_type: EventKind::TransferOwnership,
            index: 0,
        }
    }

    #[tokio::test]
    async fn delivery_retries_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let handler = Arc::new(FailingHandler {
            calls: calls.clone(),
            succeed_on: 3,
        });
        let config = QueueConfig {
            concurrency: 1,
            attempts: 5,
            backoff_base_ms: 1,
        };

        deliver("test-queue", handler, test_job(), &config).await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn delivery_stops_after_configured_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let handler = Arc::new(FailingHandler {
            calls: calls.clone(),
            succeed_on: u32::MAX,
        });
        let config = QueueConfig {
            concurrency: 1,
            attempts: 4,
            backoff_base_ms: 1,
        };

        deliver("test-queue", handler, test_job(), &config).await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
