use alloy::primitives::{Address, B256};

/// A fetched block, reduced to what the scanner needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBlock {
    pub number: u64,
    /// Chain-native timestamp in seconds
    pub timestamp: u64,
    /// Transaction hashes, 0x-prefixed hex
    pub transactions: Vec<String>,
}

/// One raw log from a transaction receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Vec<u8>,
}

/// A transaction receipt, reduced to what the decoder needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// 0x-prefixed hex
    pub transaction_hash: String,
    pub logs: Vec<RawLog>,
}
