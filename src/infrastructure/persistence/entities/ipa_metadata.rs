//! SeaORM Entity for the ipa_metadata table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ipa_metadata")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub ip_id: String,
    pub chain_id: i64,
    pub token_id: Option<String>,
    pub status: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub media_url: Option<String>,
    pub registration_date_ms: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
