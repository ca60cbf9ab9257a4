#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use alloy::primitives::{Address, U256};
use alloy::sol_types::SolEvent;
use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use names_indexer::config::IndexerConfig;
use names_indexer::domain::models::{Chain, ContractAddresses};
use names_indexer::domain::services::decoder::{abi, namehash};
use names_indexer::infrastructure::evm::{
    ChainBlock, ChainClient, EvmClientError, RawLog, TxReceipt,
};

pub const CHAIN_ID: u64 = 1315;
pub const REGISTRAR: Address = Address::new([0x11; 20]);
pub const RESOLVER: Address = Address::new([0x22; 20]);
pub const IP_REGISTRY: Address = Address::new([0x33; 20]);

/// In-memory database with the real migrations applied. A single pooled
/// connection keeps every query on the same sqlite instance.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);

    let conn = Database::connect(options)
        .await
        .expect("failed to open in-memory database");
    Migrator::up(&conn, None)
        .await
        .expect("failed to run migrations");

    conn
}

pub fn test_chain() -> Chain {
    chain_with_genesis(0)
}

pub fn chain_with_genesis(genesis_block: u64) -> Chain {
    Chain {
        name: "testnet".to_string(),
        chain_id: CHAIN_ID,
        rpc_url: "http://localhost:8545".to_string(),
        explorer_url: "http://localhost:4000".to_string(),
        contracts: ContractAddresses {
            registrar: REGISTRAR,
            resolver: RESOLVER,
            ip_asset_registry: IP_REGISTRY,
        },
        tld: "ip".to_string(),
        genesis_block,
    }
}

/// Indexer settings with delays short enough for tests
pub fn indexer_config() -> IndexerConfig {
    IndexerConfig {
        poll_interval_ms: 10,
        tx_batch_size: 300,
        block_prefetch: 10,
        tx_retry_attempts: 2,
        tx_retry_delay_ms: 1,
        queue_concurrency: 4,
        queue_attempts: 3,
        queue_backoff_ms: 1,
        metadata_base_url: "http://localhost:3000".to_string(),
    }
}

/// Chain client over canned data, with a side-effect counter on receipt
/// fetches so tests can verify which transactions were reprocessed.
#[derive(Default)]
pub struct FakeChainClient {
    tip: AtomicU64,
    blocks: Mutex<HashMap<u64, ChainBlock>>,
    receipts: Mutex<HashMap<String, TxReceipt>>,
    inputs: Mutex<HashMap<String, Vec<u8>>>,
    receipt_calls: Mutex<HashMap<String, u32>>,
}

impl FakeChainClient {
    pub fn new(tip: u64) -> Self {
        Self {
            tip: AtomicU64::new(tip),
            ..Default::default()
        }
    }

    pub fn set_tip(&self, tip: u64) {
        self.tip.store(tip, Ordering::SeqCst);
    }

    pub fn add_block(&self, number: u64, timestamp: u64, tx_hashes: &[&str]) {
        self.blocks.lock().unwrap().insert(
            number,
            ChainBlock {
                number,
                timestamp,
                transactions: tx_hashes.iter().map(|h| h.to_string()).collect(),
            },
        );
    }

    pub fn add_receipt(&self, tx_hash: &str, logs: Vec<RawLog>) {
        self.receipts.lock().unwrap().insert(
            tx_hash.to_string(),
            TxReceipt {
                transaction_hash: tx_hash.to_string(),
                logs,
            },
        );
    }

    pub fn add_input(&self, tx_hash: &str, input: Vec<u8>) {
        self.inputs
            .lock()
            .unwrap()
            .insert(tx_hash.to_string(), input);
    }

    pub fn receipt_call_count(&self, tx_hash: &str) -> u32 {
        self.receipt_calls
            .lock()
            .unwrap()
            .get(tx_hash)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ChainClient for FakeChainClient {
    async fn get_block_number(&self) -> Result<u64, EvmClientError> {
        Ok(self.tip.load(Ordering::SeqCst))
    }

    async fn get_block(&self, number: u64) -> Result<Option<ChainBlock>, EvmClientError> {
        Ok(self.blocks.lock().unwrap().get(&number).cloned())
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TxReceipt>, EvmClientError> {
        *self
            .receipt_calls
            .lock()
            .unwrap()
            .entry(tx_hash.to_string())
            .or_insert(0) += 1;

        Ok(self.receipts.lock().unwrap().get(tx_hash).cloned())
    }

    async fn get_transaction_input(
        &self,
        tx_hash: &str,
    ) -> Result<Option<Vec<u8>>, EvmClientError> {
        Ok(self.inputs.lock().unwrap().get(tx_hash).cloned())
    }
}

pub fn raw_log<E: SolEvent>(address: Address, event: &E) -> RawLog {
    let log_data = event.encode_log_data();
    RawLog {
        address,
        topics: log_data.topics().to_vec(),
        data: log_data.data.to_vec(),
    }
}

pub fn registration_log(label: &str, owner: Address, expires_secs: u64) -> RawLog {
    raw_log(
        REGISTRAR,
        &abi::NameRegistered {
            name: label.to_string(),
            label: namehash::labelhash(label),
            owner,
            baseCost: U256::from(100),
            premium: U256::from(0),
            expires: U256::from(expires_secs),
        },
    )
}

pub fn renewal_log(label: &str, expires_secs: u64) -> RawLog {
    raw_log(
        REGISTRAR,
        &abi::NameRenewed {
            name: label.to_string(),
            label: namehash::labelhash(label),
            cost: U256::from(10),
            expires: U256::from(expires_secs),
        },
    )
}

/// Token id the decoder derives for a label
pub fn token_id_for(label: &str) -> String {
    format!("{:#x}", U256::from_be_bytes(namehash::labelhash(label).0))
}

/// Namehash the decoder derives for a label under the test TLD
pub fn name_hash_for(label: &str) -> String {
    format!("{:#x}", namehash::namehash(&format!("{}.ip", label)))
}
