//! Named job queue handles
//!
//! Enqueueing is fire-and-forget from the producer's point of view; delivery
//! and retry are the worker's responsibility.

use tokio::sync::mpsc;

use crate::domain::models::EventJob;
use crate::infrastructure::queue::error::QueueError;

/// Broker-side delivery policy for one queue
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Maximum concurrently processed jobs
    pub concurrency: usize,
    /// Delivery attempts per job before it fails permanently
    pub attempts: u32,
    /// Base delay for exponential backoff between attempts, in milliseconds
    pub backoff_base_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            attempts: 5,
            backoff_base_ms: 1000,
        }
    }
}

/// Producer handle for one named queue
#[derive(Clone)]
pub struct JobQueue {
    name: &'static str,
    sender: mpsc::UnboundedSender<EventJob>,
}

impl JobQueue {
    /// Create a queue handle plus the receiver its worker consumes
    pub fn new(name: &'static str) -> (Self, mpsc::UnboundedReceiver<EventJob>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { name, sender }, receiver)
    }

    /// Queue name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Enqueue a job for delivery
    pub fn enqueue(&self, job: EventJob) -> Result<(), QueueError> {
        self.sender.send(job).map_err(|_| QueueError::ChannelClosed)
    }
}
