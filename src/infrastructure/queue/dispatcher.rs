//! Routes decoded events to the queue matching their event type

use std::collections::HashMap;

use crate::domain::models::{EventJob, EventKind};
use crate::infrastructure::queue::error::QueueError;
use crate::infrastructure::queue::job_queue::JobQueue;

/// Pure lookup table from event type to queue handle
pub struct JobDispatcher {
    queues: HashMap<EventKind, JobQueue>,
}

impl JobDispatcher {
    pub fn new(queues: HashMap<EventKind, JobQueue>) -> Self {
        Self { queues }
    }

    /// Queue handle for an event type
    pub fn route(&self, kind: EventKind) -> Option<&JobQueue> {
        self.queues.get(&kind)
    }

    /// Enqueue a job on the queue matching its event type. Fire-and-forget:
    /// delivery and retry are the broker's responsibility.
    pub fn dispatch(&self, job: EventJob) -> Result<(), QueueError> {
        let queue = self
            .queues
            .get(&job.event_type)
            .ok_or_else(|| QueueError::UnknownQueue(job.event_type.to_string()))?;

        queue.enqueue(job)
    }
}
