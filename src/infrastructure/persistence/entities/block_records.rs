//! SeaORM Entity for the block_records table
//! Scan checkpoints: one row per observed block per chain

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "block_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub block_number: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub chain_id: i64,
    pub status: String,
    pub timestamp_ms: i64,
    /// JSON array of per-transaction outcomes `{txHash, status}`
    pub transactions: Json,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
