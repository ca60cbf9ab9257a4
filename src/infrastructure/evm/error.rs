use std::error::Error;
use std::fmt;

/// Error type for chain client operations
#[derive(Debug, Clone)]
pub enum EvmClientError {
    /// The configured RPC URL could not be parsed
    InvalidUrl(String),
    /// The node returned an error or the transport failed
    RpcError(String),
    /// The node returned data we could not interpret
    InvalidResponse(String),
}

impl fmt::Display for EvmClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvmClientError::InvalidUrl(msg) => write!(f, "Invalid RPC URL: {}", msg),
            EvmClientError::RpcError(msg) => write!(f, "RPC error: {}", msg),
            EvmClientError::InvalidResponse(msg) => write!(f, "Invalid RPC response: {}", msg),
        }
    }
}

impl Error for EvmClientError {}
