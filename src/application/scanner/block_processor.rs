//! Per-block processing
//!
//! Loads or creates the block's checkpoint, merges freshly seen transaction
//! hashes with recorded statuses, and processes pending transactions in
//! fixed-size batches with full parallelism inside a batch and strict
//! sequencing across batches.

use futures::stream::{FuturesUnordered, StreamExt};

use crate::config::IndexerConfig;
use crate::domain::errors::ScannerError;
use crate::domain::models::{
    BlockRecord, BlockScanStatus, Chain, EventJob, ReceiptContext,
};
use crate::domain::services::decoder::EventDecoder;
use crate::domain::services::retry::RetryHandler;
use crate::infrastructure::evm::{ChainBlock, ChainClient};
use crate::infrastructure::persistence::repositories::BlockRecordRepository;
use crate::infrastructure::queue::JobDispatcher;
use crate::utils::logging;

/// Outcome of one pass over a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// Every transaction succeeded; the checkpoint is terminal
    Completed,
    /// At least one receipt is not mined yet; the block stays pending and
    /// is re-attempted on a later pass
    StillPending,
}

/// Outcome of one pass over a single transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TxOutcome {
    Completed,
    ReceiptPending,
}

/// Block processor borrowing the scanner's dependencies for one block
pub struct BlockProcessor<'a> {
    client: &'a dyn ChainClient,
    decoder: &'a EventDecoder,
    block_records: &'a BlockRecordRepository,
    dispatcher: &'a JobDispatcher,
    retry: &'a RetryHandler,
    chain: &'a Chain,
    config: &'a IndexerConfig,
}

impl<'a> BlockProcessor<'a> {
    pub fn new(
        client: &'a dyn ChainClient,
        decoder: &'a EventDecoder,
        block_records: &'a BlockRecordRepository,
        dispatcher: &'a JobDispatcher,
        retry: &'a RetryHandler,
        chain: &'a Chain,
        config: &'a IndexerConfig,
    ) -> Self {
        Self {
            client,
            decoder,
            block_records,
            dispatcher,
            retry,
            chain,
            config,
        }
    }

    /// Process one fetched block against its checkpoint
    pub async fn process_block(&self, block: &ChainBlock) -> Result<BlockOutcome, ScannerError> {
        let chain_id = self.chain.chain_id;
        let timestamp_ms = (block.timestamp as i64).saturating_mul(1000);

        // Load or create the checkpoint. Merging the fresh hash list keeps
        // prior success flags, which makes a restart safe.
        let mut record = match self.block_records.get(chain_id, block.number).await? {
            Some(mut existing) => {
                existing.merge_transactions(&block.transactions);
                existing
            }
            None => BlockRecord::new(block.number, chain_id, timestamp_ms, &block.transactions),
        };
        self.block_records.upsert(&record).await?;

        let pending = record.pending_tx_hashes();
        if !pending.is_empty() {
            logging::log_debug(&format!(
                "[{}] Block {}: {} of {} transactions pending",
                self.chain.name,
                block.number,
                pending.len(),
                record.transactions.len()
            ));
        }

        for batch in pending.chunks(self.config.tx_batch_size) {
            let mut futures = FuturesUnordered::new();
            for tx_hash in batch {
                let tx_hash = tx_hash.clone();
                futures.push(async move {
                    let result = self
                        .retry
                        .retry_until(|| self.process_tx(block, &tx_hash))
                        .await;
                    (tx_hash, result)
                });
            }

            let mut first_error: Option<ScannerError> = None;
            while let Some((tx_hash, result)) = futures.next().await {
                match result {
                    Ok(TxOutcome::Completed) => record.mark_tx_success(&tx_hash),
                    Ok(TxOutcome::ReceiptPending) => {
                        logging::log_debug(&format!(
                            "[{}] Block {}: receipt for tx {} not mined yet",
                            self.chain.name, block.number, tx_hash
                        ));
                    }
                    Err(e) => {
                        if first_error.is_none() {
                            first_error = Some(e);
                        }
                    }
                }
            }

            // Persist per-transaction outcomes before surfacing any error so
            // completed work is never redone
            self.block_records.upsert(&record).await?;

            if let Some(e) = first_error {
                return Err(e);
            }
        }

        if record.all_txs_succeeded() {
            record.status = BlockScanStatus::Success;
            self.block_records.upsert(&record).await?;
            Ok(BlockOutcome::Completed)
        } else {
            Ok(BlockOutcome::StillPending)
        }
    }

    /// Process one transaction: fetch its receipt, decode its logs and
    /// dispatch every event, in that order. A missing receipt is not an
    /// error; the transaction is simply left pending for a later pass.
    async fn process_tx(
        &self,
        block: &ChainBlock,
        tx_hash: &str,
    ) -> Result<TxOutcome, ScannerError> {
        let Some(receipt) = self.client.get_transaction_receipt(tx_hash).await? else {
            return Ok(TxOutcome::ReceiptPending);
        };

        let events = self.decoder.decode_receipt(self.client, &receipt).await;

        for (index, event) in events.into_iter().enumerate() {
            let job = EventJob {
                receipt: ReceiptContext {
                    tx_hash: tx_hash.to_string(),
                    block_number: block.number,
                    chain_id: self.chain.chain_id,
                    timestamp_ms: (block.timestamp as i64).saturating_mul(1000),
                },
                return_values: event.data,
                event_type: event.kind,
                index: index as u32,
            };
            self.dispatcher.dispatch(job)?;
        }

        Ok(TxOutcome::Completed)
    }
}
