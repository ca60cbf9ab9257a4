//! Repository for block_records operations
//! The checkpoint store: scan progress and per-transaction outcomes

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::models::{BlockRecord, BlockScanStatus, TxStatus};
use crate::infrastructure::persistence::entities::block_records;
use crate::infrastructure::persistence::error::DbError;

/// Repository for block record operations
#[derive(Clone)]
pub struct BlockRecordRepository {
    conn: DatabaseConnection,
}

impl BlockRecordRepository {
    /// Create a new BlockRecordRepository
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Highest block marked success for a chain; the scan cursor resumes
    /// one past this
    pub async fn get_last_success_block(&self, chain_id: u64) -> Result<Option<u64>, DbError> {
        let result = block_records::Entity::find()
            .filter(block_records::Column::ChainId.eq(chain_id as i64))
            .filter(block_records::Column::Status.eq(BlockScanStatus::Success.as_str()))
            .order_by_desc(block_records::Column::BlockNumber)
            .one(&self.conn)
            .await?;

        Ok(result.map(|r| r.block_number as u64))
    }

    /// Load the checkpoint for one block, if it was ever observed
    pub async fn get(
        &self,
        chain_id: u64,
        block_number: u64,
    ) -> Result<Option<BlockRecord>, DbError> {
        let result = block_records::Entity::find_by_id((block_number as i64, chain_id as i64))
            .one(&self.conn)
            .await?;

        result.map(to_domain_record).transpose()
    }

    /// Insert or update the checkpoint for one block
    pub async fn upsert(&self, record: &BlockRecord) -> Result<(), DbError> {
        let now = Utc::now().naive_utc();
        let transactions = serde_json::to_value(&record.transactions)
            .map_err(|e| DbError::Other(format!("failed to serialize tx statuses: {}", e)))?;

        let existing = block_records::Entity::find_by_id((
            record.block_number as i64,
            record.chain_id as i64,
        ))
        .one(&self.conn)
        .await?;

        if let Some(model) = existing {
            let mut update_model: block_records::ActiveModel = model.into();
            update_model.status = Set(record.status.as_str().to_string());
            update_model.timestamp_ms = Set(record.timestamp_ms);
            update_model.transactions = Set(transactions);
            update_model.updated_at = Set(now);
            update_model.update(&self.conn).await?;
        } else {
            let new_record = block_records::ActiveModel {
                block_number: Set(record.block_number as i64),
                chain_id: Set(record.chain_id as i64),
                status: Set(record.status.as_str().to_string()),
                timestamp_ms: Set(record.timestamp_ms),
                transactions: Set(transactions),
                created_at: Set(now),
                updated_at: Set(now),
            };
            new_record.insert(&self.conn).await?;
        }

        Ok(())
    }
}

fn to_domain_record(model: block_records::Model) -> Result<BlockRecord, DbError> {
    let transactions: Vec<TxStatus> = serde_json::from_value(model.transactions)
        .map_err(|e| DbError::Other(format!("malformed tx status array: {}", e)))?;

    Ok(BlockRecord {
        block_number: model.block_number as u64,
        chain_id: model.chain_id as u64,
        status: BlockScanStatus::parse(&model.status),
        timestamp_ms: model.timestamp_ms,
        transactions,
    })
}
