use alloy::consensus::Transaction as _;
use alloy::primitives::B256;
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::{BlockNumberOrTag, BlockTransactions};
use async_trait::async_trait;

use crate::domain::models::Chain;
use crate::infrastructure::evm::error::EvmClientError;
use crate::infrastructure::evm::types::{ChainBlock, RawLog, TxReceipt};

/// RPC-style chain access, the seam between the scanner/decoder and the
/// node. Tests substitute an in-memory implementation.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current chain tip
    async fn get_block_number(&self) -> Result<u64, EvmClientError>;

    /// Fetch a block by number; `None` when the node does not have it yet
    async fn get_block(&self, number: u64) -> Result<Option<ChainBlock>, EvmClientError>;

    /// Fetch a transaction receipt; `None` when the receipt is not mined yet
    async fn get_transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TxReceipt>, EvmClientError>;

    /// Fetch a transaction's call data by hash
    async fn get_transaction_input(
        &self,
        tx_hash: &str,
    ) -> Result<Option<Vec<u8>>, EvmClientError>;
}

/// HTTP provider-backed chain client
#[derive(Clone)]
pub struct EvmClient {
    provider: RootProvider,
    network: String,
}

impl EvmClient {
    /// Create a client for one chain's RPC endpoint
    pub fn new(chain: &Chain) -> Result<Self, EvmClientError> {
        let url = chain
            .rpc_url
            .parse()
            .map_err(|e| EvmClientError::InvalidUrl(format!("{}: {}", chain.rpc_url, e)))?;

        Ok(Self {
            provider: ProviderBuilder::new().connect_http(url).root().clone(),
            network: chain.name.clone(),
        })
    }

    /// Network name this client talks to
    pub fn network(&self) -> &str {
        &self.network
    }
}

#[async_trait]
impl ChainClient for EvmClient {
    async fn get_block_number(&self) -> Result<u64, EvmClientError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| EvmClientError::RpcError(e.to_string()))
    }

    async fn get_block(&self, number: u64) -> Result<Option<ChainBlock>, EvmClientError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .hashes()
            .await
            .map_err(|e| EvmClientError::RpcError(e.to_string()))?;

        let Some(block) = block else {
            return Ok(None);
        };

        let transactions = match &block.transactions {
            BlockTransactions::Hashes(hashes) => {
                hashes.iter().map(|h| format!("{:#x}", h)).collect()
            }
            _ => {
                return Err(EvmClientError::InvalidResponse(
                    "expected transaction hashes in block response".to_string(),
                ))
            }
        };

        Ok(Some(ChainBlock {
            number: block.header.number,
            timestamp: block.header.timestamp,
            transactions,
        }))
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TxReceipt>, EvmClientError> {
        let hash = parse_hash(tx_hash)?;

        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| EvmClientError::RpcError(e.to_string()))?;

        let Some(receipt) = receipt else {
            return Ok(None);
        };

        let logs = receipt
            .inner
            .logs()
            .iter()
            .map(|log| RawLog {
                address: log.inner.address,
                topics: log.inner.data.topics().to_vec(),
                data: log.inner.data.data.to_vec(),
            })
            .collect();

        Ok(Some(TxReceipt {
            transaction_hash: format!("{:#x}", receipt.transaction_hash),
            logs,
        }))
    }

    async fn get_transaction_input(
        &self,
        tx_hash: &str,
    ) -> Result<Option<Vec<u8>>, EvmClientError> {
        let hash = parse_hash(tx_hash)?;

        let tx = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| EvmClientError::RpcError(e.to_string()))?;

        Ok(tx.map(|tx| tx.input().to_vec()))
    }
}

fn parse_hash(tx_hash: &str) -> Result<B256, EvmClientError> {
    tx_hash
        .parse::<B256>()
        .map_err(|e| EvmClientError::InvalidResponse(format!("bad tx hash '{}': {}", tx_hash, e)))
}
