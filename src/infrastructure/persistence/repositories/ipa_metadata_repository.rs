//! Repository for ipa_metadata operations

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::infrastructure::persistence::entities::ipa_metadata;
use crate::infrastructure::persistence::error::DbError;

/// Fields for a full IP asset metadata document
#[derive(Debug, Clone)]
pub struct NewIpaMetadata {
    pub ip_id: String,
    pub chain_id: u64,
    pub token_id: Option<String>,
    pub status: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub media_url: Option<String>,
    pub registration_date_ms: i64,
}

/// Repository for IP asset metadata operations
#[derive(Clone)]
pub struct IpaMetadataRepository {
    conn: DatabaseConnection,
}

impl IpaMetadataRepository {
    /// Create a new IpaMetadataRepository
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Fetch metadata by the asset's derived id
    pub async fn find(&self, ip_id: &str) -> Result<Option<ipa_metadata::Model>, DbError> {
        let result = ipa_metadata::Entity::find_by_id(ip_id.to_string())
            .one(&self.conn)
            .await?;

        Ok(result)
    }

    /// Insert a full metadata document
    pub async fn insert(&self, metadata: NewIpaMetadata) -> Result<(), DbError> {
        let now = Utc::now().naive_utc();

        let model = ipa_metadata::ActiveModel {
            ip_id: Set(metadata.ip_id),
            chain_id: Set(metadata.chain_id as i64),
            token_id: Set(metadata.token_id),
            status: Set(metadata.status),
            title: Set(metadata.title),
            description: Set(metadata.description),
            media_url: Set(metadata.media_url),
            registration_date_ms: Set(metadata.registration_date_ms),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&self.conn).await?;

        Ok(())
    }

    /// Patch status and ids on an existing document without touching its
    /// descriptive fields
    pub async fn patch_registration(
        &self,
        ip_id: &str,
        token_id: Option<&str>,
        status: &str,
    ) -> Result<(), DbError> {
        let Some(model) = self.find(ip_id).await? else {
            return Ok(());
        };

        let mut update_model: ipa_metadata::ActiveModel = model.into();
        if let Some(token_id) = token_id {
            update_model.token_id = Set(Some(token_id.to_string()));
        }
        update_model.status = Set(status.to_string());
        update_model.updated_at = Set(Utc::now().naive_utc());
        update_model.update(&self.conn).await?;

        Ok(())
    }
}
