pub mod decoder;
pub mod projectors;
pub mod retry;

pub use decoder::EventDecoder;
pub use projectors::EventProjector;
pub use retry::RetryHandler;
