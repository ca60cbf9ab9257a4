//! Per-chain block scanning

mod block_processor;
mod manager;

pub use block_processor::{BlockOutcome, BlockProcessor};
pub use manager::ScannerManager;

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tokio::time;

use crate::config::IndexerConfig;
use crate::domain::errors::ScannerError;
use crate::domain::models::Chain;
use crate::domain::services::decoder::EventDecoder;
use crate::domain::services::retry::RetryHandler;
use crate::infrastructure::evm::{ChainBlock, ChainClient};
use crate::infrastructure::persistence::repositories::BlockRecordRepository;
use crate::infrastructure::queue::JobDispatcher;
use crate::utils::logging;

/// Polling scanner for one chain. Holds the chain's reference data, its
/// monotonic block cursor and every dependency explicitly; the loop itself
/// is a thin wrapper around `process_available_blocks` so a single step can
/// be driven directly in tests.
pub struct ChainScanner {
    chain: Chain,
    client: Arc<dyn ChainClient>,
    decoder: EventDecoder,
    block_records: BlockRecordRepository,
    dispatcher: Arc<JobDispatcher>,
    retry: RetryHandler,
    config: IndexerConfig,
    cursor: u64,
}

impl ChainScanner {
    pub fn new(
        chain: Chain,
        client: Arc<dyn ChainClient>,
        block_records: BlockRecordRepository,
        dispatcher: Arc<JobDispatcher>,
        config: IndexerConfig,
    ) -> Self {
        let decoder = EventDecoder::new(chain.clone());
        let retry = RetryHandler::with_config(config.tx_retry_attempts, config.tx_retry_delay_ms);
        let cursor = chain.genesis_block;

        Self {
            chain,
            client,
            decoder,
            block_records,
            dispatcher,
            retry,
            config,
            cursor,
        }
    }

    /// Network name of the owned chain
    pub fn network(&self) -> &str {
        &self.chain.name
    }

    /// Next block the scanner will fetch
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Resume from the checkpoint store: one past the highest block marked
    /// success, or the configured genesis block when none exists
    pub async fn initialize_cursor(&mut self) {
        match self
            .retry
            .retry_until(|| self.block_records.get_last_success_block(self.chain.chain_id))
            .await
        {
            Ok(Some(height)) => {
                self.cursor = height + 1;
                logging::log_info(&format!(
                    "[{}] Resuming from block {}",
                    self.chain.name, self.cursor
                ));
            }
            Ok(None) => {
                logging::log_info(&format!(
                    "[{}] No previous blocks found, starting from genesis block {}",
                    self.chain.name, self.cursor
                ));
            }
            Err(e) => {
                logging::log_error(&format!(
                    "[{}] Error reading checkpoint store: {}. Starting from genesis block {}",
                    self.chain.name, e, self.cursor
                ));
            }
        }
    }

    /// One scanner step: advance the cursor towards the chain tip,
    /// prefetching blocks with bounded concurrency and processing them in
    /// ascending order. The cursor only moves past a block once its
    /// checkpoint is terminal.
    pub async fn process_available_blocks(&mut self) -> Result<(), ScannerError> {
        let tip = self.client.get_block_number().await?;

        while self.cursor <= tip {
            let prefetch_end = self
                .cursor
                .saturating_add(self.config.block_prefetch.saturating_sub(1) as u64)
                .min(tip);
            let blocks = self.prefetch_blocks(self.cursor, prefetch_end).await?;

            if blocks.is_empty() {
                // The node does not have the cursor block yet; try again on
                // the next tick
                return Ok(());
            }

            for block in &blocks {
                let processor = BlockProcessor::new(
                    &*self.client,
                    &self.decoder,
                    &self.block_records,
                    &*self.dispatcher,
                    &self.retry,
                    &self.chain,
                    &self.config,
                );

                match processor.process_block(block).await? {
                    BlockOutcome::Completed => {
                        self.cursor = block.number + 1;
                    }
                    BlockOutcome::StillPending => {
                        logging::log_info(&format!(
                            "[{}] Block {} still has pending transactions, holding cursor",
                            self.chain.name, block.number
                        ));
                        return Ok(());
                    }
                }
            }
        }

        Ok(())
    }

    /// Fetch a contiguous range of blocks concurrently, returning the
    /// leading run that the node actually has
    async fn prefetch_blocks(&self, from: u64, to: u64) -> Result<Vec<ChainBlock>, ScannerError> {
        let semaphore = Arc::new(Semaphore::new(self.config.block_prefetch.max(1)));
        let mut futures = FuturesUnordered::new();

        for number in from..=to {
            let client = self.client.clone();
            let semaphore = semaphore.clone();
            futures.push(async move {
                let _permit = semaphore.acquire_owned().await;
                (number, client.get_block(number).await)
            });
        }

        let mut fetched = Vec::new();
        while let Some((number, result)) = futures.next().await {
            fetched.push((number, result?));
        }
        fetched.sort_by_key(|(number, _)| *number);

        Ok(fetched
            .into_iter()
            .map(|(_, block)| block)
            .take_while(|block| block.is_some())
            .flatten()
            .collect())
    }

    /// Continuous polling loop. An iteration error is logged and the loop
    /// continues on the next tick; nothing here crashes the process.
    pub async fn run(mut self) {
        logging::log_info(&format!(
            "[{}] Starting scanner (chain id {})",
            self.chain.name, self.chain.chain_id
        ));

        self.initialize_cursor().await;

        loop {
            if let Err(e) = self.process_available_blocks().await {
                logging::log_error(&format!(
                    "[{}] Error processing blocks: {}. Will retry after interval.",
                    self.chain.name, e
                ));
            }

            time::sleep(Duration::from_millis(self.config.poll_interval_ms)).await;
        }
    }
}
