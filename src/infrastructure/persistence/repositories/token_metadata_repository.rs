//! Repository for token_metadata operations

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::infrastructure::persistence::entities::token_metadata;
use crate::infrastructure::persistence::error::DbError;

/// Repository for descriptive token metadata
#[derive(Clone)]
pub struct TokenMetadataRepository {
    conn: DatabaseConnection,
}

impl TokenMetadataRepository {
    /// Create a new TokenMetadataRepository
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Fetch metadata for a token, if present
    pub async fn find(
        &self,
        chain_id: u64,
        token_id: &str,
    ) -> Result<Option<token_metadata::Model>, DbError> {
        let result = token_metadata::Entity::find_by_id((token_id.to_string(), chain_id as i64))
            .one(&self.conn)
            .await?;

        Ok(result)
    }

    /// Insert or refresh the descriptive metadata for a token
    pub async fn upsert(
        &self,
        chain_id: u64,
        token_id: &str,
        name: &str,
        image: &str,
        external_url: &str,
    ) -> Result<(), DbError> {
        let now = Utc::now().naive_utc();

        if let Some(model) = self.find(chain_id, token_id).await? {
            let mut update_model: token_metadata::ActiveModel = model.into();
            update_model.name = Set(name.to_string());
            update_model.image = Set(image.to_string());
            update_model.external_url = Set(external_url.to_string());
            update_model.updated_at = Set(now);
            update_model.update(&self.conn).await?;
        } else {
            let new_record = token_metadata::ActiveModel {
                token_id: Set(token_id.to_string()),
                chain_id: Set(chain_id as i64),
                name: Set(name.to_string()),
                image: Set(image.to_string()),
                external_url: Set(external_url.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            };
            new_record.insert(&self.conn).await?;
        }

        Ok(())
    }
}
