pub mod dispatcher;
pub mod error;
pub mod job_queue;
pub mod worker;

pub use dispatcher::JobDispatcher;
pub use error::QueueError;
pub use job_queue::{JobQueue, QueueConfig};
pub use worker::{JobHandler, QueueWorker};

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::domain::models::{EventJob, EventKind};

type QueueReceivers = Vec<(EventKind, mpsc::UnboundedReceiver<EventJob>)>;

/// Create one named queue per event family and the dispatcher over them.
/// Receivers are returned for the caller to attach workers to.
pub fn build_queues() -> (Arc<JobDispatcher>, QueueReceivers) {
    let mut queues = HashMap::new();
    let mut receivers = Vec::new();

    for kind in EventKind::ALL {
        let (queue, receiver) = JobQueue::new(kind.queue_name());
        queues.insert(kind, queue);
        receivers.push((kind, receiver));
    }

    (Arc::new(JobDispatcher::new(queues)), receivers)
}
