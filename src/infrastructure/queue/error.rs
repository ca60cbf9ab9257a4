use std::error::Error;
use std::fmt;

/// Error type for queue operations
#[derive(Debug, Clone)]
pub enum QueueError {
    /// The consuming side of the queue is gone
    ChannelClosed,
    /// No queue is registered for an event type
    UnknownQueue(String),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::ChannelClosed => write!(f, "Queue channel closed"),
            QueueError::UnknownQueue(name) => write!(f, "No queue registered for '{}'", name),
        }
    }
}

impl Error for QueueError {}
