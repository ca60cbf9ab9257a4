use serde::{Deserialize, Serialize};

/// Scan status of a whole block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockScanStatus {
    Pending,
    Success,
    Failed,
}

impl BlockScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockScanStatus::Pending => "pending",
            BlockScanStatus::Success => "success",
            BlockScanStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "success" => BlockScanStatus::Success,
            "failed" => BlockScanStatus::Failed,
            _ => BlockScanStatus::Pending,
        }
    }
}

/// Scan status of a single transaction within a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxScanStatus {
    Pending,
    Success,
}

/// Per-transaction outcome recorded inside a block record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatus {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
    pub status: TxScanStatus,
}

/// Persisted checkpoint for one scanned block. Created the first time a
/// block is observed, mutated as its transactions complete, never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    pub block_number: u64,
    pub chain_id: u64,
    pub status: BlockScanStatus,
    pub timestamp_ms: i64,
    pub transactions: Vec<TxStatus>,
}

impl BlockRecord {
    /// A fresh pending record for a newly observed block
    pub fn new(block_number: u64, chain_id: u64, timestamp_ms: i64, tx_hashes: &[String]) -> Self {
        Self {
            block_number,
            chain_id,
            status: BlockScanStatus::Pending,
            timestamp_ms,
            transactions: tx_hashes
                .iter()
                .map(|h| TxStatus {
                    tx_hash: h.clone(),
                    status: TxScanStatus::Pending,
                })
                .collect(),
        }
    }

    /// Merge a freshly seen transaction hash list into the recorded
    /// statuses: union by hash, prior SUCCESS flags preserved. This is what
    /// makes a restart safe.
    pub fn merge_transactions(&mut self, tx_hashes: &[String]) {
        for hash in tx_hashes {
            if !self.transactions.iter().any(|t| &t.tx_hash == hash) {
                self.transactions.push(TxStatus {
                    tx_hash: hash.clone(),
                    status: TxScanStatus::Pending,
                });
            }
        }
    }

    /// Mark one transaction as successfully processed
    pub fn mark_tx_success(&mut self, tx_hash: &str) {
        if let Some(tx) = self.transactions.iter_mut().find(|t| t.tx_hash == tx_hash) {
            tx.status = TxScanStatus::Success;
        }
    }

    /// Hashes that still need processing
    pub fn pending_tx_hashes(&self) -> Vec<String> {
        self.transactions
            .iter()
            .filter(|t| t.status != TxScanStatus::Success)
            .map(|t| t.tx_hash.clone())
            .collect()
    }

    /// A block is terminal only when every transaction in it succeeded
    pub fn all_txs_succeeded(&self) -> bool {
        self.transactions
            .iter()
            .all(|t| t.status == TxScanStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashes(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merge_preserves_prior_success_flags() {
        let mut record = BlockRecord::new(5, 1, 1_000, &hashes(&["0xa", "0xb"]));
        record.mark_tx_success("0xa");

        record.merge_transactions(&hashes(&["0xa", "0xb", "0xc"]));

        assert_eq!(record.transactions.len(), 3);
        assert_eq!(record.transactions[0].status, TxScanStatus::Success);
        assert_eq!(record.pending_tx_hashes(), hashes(&["0xb", "0xc"]));
    }

    #[test]
    fn block_is_terminal_only_when_every_tx_succeeded() {
        let mut record = BlockRecord::new(5, 1, 1_000, &hashes(&["0xa", "0xb"]));
        assert!(!record.all_txs_succeeded());

        record.mark_tx_success("0xa");
        assert!(!record.all_txs_succeeded());

        record.mark_tx_success("0xb");
        assert!(record.all_txs_succeeded());
    }

    #[test]
    fn tx_status_wire_shape_is_stable() {
        let status = TxStatus {
            tx_hash: "0xa".to_string(),
            status: TxScanStatus::Pending,
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["txHash"], "0xa");
        assert_eq!(json["status"], "PENDING");
    }
}
