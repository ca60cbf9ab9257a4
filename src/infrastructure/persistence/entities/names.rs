//! SeaORM Entity for the names table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "names")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub token_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub chain_id: i64,
    /// Full name including the TLD, unique per chain
    pub name: String,
    pub name_hash: String,
    /// None for partial rows created by a renewal seen before registration
    pub owner: Option<String>,
    /// Millisecond epoch
    pub expires_at: i64,
    pub is_primary_name: bool,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
