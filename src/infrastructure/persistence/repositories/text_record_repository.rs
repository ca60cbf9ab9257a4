//! Repository for text_records operations

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::json;

use crate::domain::models::TextField;
use crate::infrastructure::persistence::entities::text_records;
use crate::infrastructure::persistence::error::DbError;

/// Repository for text record operations
#[derive(Clone)]
pub struct TextRecordRepository {
    conn: DatabaseConnection,
}

impl TextRecordRepository {
    /// Create a new TextRecordRepository
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Fetch the record for a name, if present
    pub async fn find(
        &self,
        chain_id: u64,
        eth_name: &str,
    ) -> Result<Option<text_records::Model>, DbError> {
        let result = text_records::Entity::find_by_id((eth_name.to_string(), chain_id as i64))
            .one(&self.conn)
            .await?;

        Ok(result)
    }

    /// Create an empty record for a name if none exists yet
    pub async fn ensure_record(&self, chain_id: u64, eth_name: &str) -> Result<(), DbError> {
        if self.find(chain_id, eth_name).await?.is_some() {
            return Ok(());
        }

        let now = Utc::now().naive_utc();
        let stub = text_records::ActiveModel {
            eth_name: Set(eth_name.to_string()),
            chain_id: Set(chain_id as i64),
            addresses: Set(json!({})),
            avatar: Set(None),
            banner: Set(None),
            url: Set(None),
            description: Set(None),
            email: Set(None),
            twitter: Set(None),
            github: Set(None),
            discord: Set(None),
            telegram: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        stub.insert(&self.conn).await?;

        Ok(())
    }

    /// Write one allow-listed field, creating the record when missing
    pub async fn set_field(
        &self,
        chain_id: u64,
        eth_name: &str,
        field: TextField,
        value: &str,
    ) -> Result<(), DbError> {
        self.ensure_record(chain_id, eth_name).await?;

        let model = self
            .find(chain_id, eth_name)
            .await?
            .ok_or_else(|| DbError::Other(format!("text record missing for {}", eth_name)))?;

        let mut update_model: text_records::ActiveModel = model.into();
        let value = Some(value.to_string());
        match field {
            TextField::Avatar => update_model.avatar = Set(value),
            TextField::Banner => update_model.banner = Set(value),
            TextField::Url => update_model.url = Set(value),
            TextField::Description => update_model.description = Set(value),
            TextField::Email => update_model.email = Set(value),
            TextField::Twitter => update_model.twitter = Set(value),
            TextField::Github => update_model.github = Set(value),
            TextField::Discord => update_model.discord = Set(value),
            TextField::Telegram => update_model.telegram = Set(value),
        }
        update_model.updated_at = Set(Utc::now().naive_utc());
        update_model.update(&self.conn).await?;

        Ok(())
    }
}
