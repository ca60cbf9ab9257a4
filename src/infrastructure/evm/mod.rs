pub mod client;
pub mod error;
pub mod types;

pub use client::{ChainClient, EvmClient};
pub use error::EvmClientError;
pub use types::{ChainBlock, RawLog, TxReceipt};
