//! SeaORM Entity for the text_records table
//! Profile fields attached to a name, one column per allow-listed key

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "text_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub eth_name: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub chain_id: i64,
    /// JSON map of coin type -> address
    pub addresses: Json,
    pub avatar: Option<String>,
    pub banner: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub discord: Option<String>,
    pub telegram: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
