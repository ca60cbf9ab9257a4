//! Repository for names operations

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::infrastructure::persistence::entities::names;
use crate::infrastructure::persistence::error::DbError;

/// Fields needed to create a primary name record
#[derive(Debug, Clone)]
pub struct NewName {
    pub token_id: String,
    pub chain_id: u64,
    pub name: String,
    pub name_hash: String,
    pub owner: String,
    pub expires_at: i64,
}

/// Repository for name record operations
#[derive(Clone)]
pub struct NameRepository {
    conn: DatabaseConnection,
}

impl NameRepository {
    /// Create a new NameRepository
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Look up a name by its namehash on one chain
    pub async fn find_by_name_hash(
        &self,
        chain_id: u64,
        name_hash: &str,
    ) -> Result<Option<names::Model>, DbError> {
        let result = names::Entity::find()
            .filter(names::Column::ChainId.eq(chain_id as i64))
            .filter(names::Column::NameHash.eq(name_hash))
            .one(&self.conn)
            .await?;

        Ok(result)
    }

    /// Look up a name by its token id on one chain
    pub async fn find_by_token_id(
        &self,
        chain_id: u64,
        token_id: &str,
    ) -> Result<Option<names::Model>, DbError> {
        let result = names::Entity::find_by_id((token_id.to_string(), chain_id as i64))
            .one(&self.conn)
            .await?;

        Ok(result)
    }

    /// Create a primary name record
    pub async fn create(&self, name: NewName) -> Result<(), DbError> {
        let now = Utc::now().naive_utc();

        let model = names::ActiveModel {
            token_id: Set(name.token_id),
            chain_id: Set(name.chain_id as i64),
            name: Set(name.name),
            name_hash: Set(name.name_hash),
            owner: Set(Some(name.owner)),
            expires_at: Set(name.expires_at),
            is_primary_name: Set(false),
            logo_url: Set(None),
            banner_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&self.conn).await?;

        Ok(())
    }

    /// Set a new expiry for a token. Upsert semantics: a renewal seen before
    /// its registration still produces a usable (if partial) record.
    pub async fn upsert_expiry(
        &self,
        chain_id: u64,
        token_id: &str,
        name: &str,
        name_hash: &str,
        expires_at: i64,
    ) -> Result<(), DbError> {
        let now = Utc::now().naive_utc();

        let existing = names::Entity::find_by_id((token_id.to_string(), chain_id as i64))
            .one(&self.conn)
            .await?;

        if let Some(model) = existing {
            let mut update_model: names::ActiveModel = model.into();
            update_model.expires_at = Set(expires_at);
            update_model.updated_at = Set(now);
            update_model.update(&self.conn).await?;
        } else {
            let new_record = names::ActiveModel {
                token_id: Set(token_id.to_string()),
                chain_id: Set(chain_id as i64),
                name: Set(name.to_string()),
                name_hash: Set(name_hash.to_string()),
                owner: Set(None),
                expires_at: Set(expires_at),
                is_primary_name: Set(false),
                logo_url: Set(None),
                banner_url: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };
            new_record.insert(&self.conn).await?;
        }

        Ok(())
    }

    /// Conditional ownership update matched on (token id, previous owner).
    /// Returns whether a row matched; a stale or duplicate delivery simply
    /// no-ops.
    pub async fn transfer_owner(
        &self,
        chain_id: u64,
        token_id: &str,
        previous_owner: &str,
        new_owner: &str,
    ) -> Result<bool, DbError> {
        let existing = names::Entity::find()
            .filter(names::Column::TokenId.eq(token_id))
            .filter(names::Column::ChainId.eq(chain_id as i64))
            .filter(names::Column::Owner.eq(previous_owner))
            .one(&self.conn)
            .await?;

        let Some(model) = existing else {
            return Ok(false);
        };

        let mut update_model: names::ActiveModel = model.into();
        update_model.owner = Set(Some(new_owner.to_string()));
        update_model.updated_at = Set(Utc::now().naive_utc());
        update_model.update(&self.conn).await?;

        Ok(true)
    }

    /// Mirror an avatar record onto the denormalized logo field
    pub async fn update_logo_url(
        &self,
        chain_id: u64,
        name_hash: &str,
        url: &str,
    ) -> Result<(), DbError> {
        let Some(model) = self.find_by_name_hash(chain_id, name_hash).await? else {
            return Ok(());
        };

        let mut update_model: names::ActiveModel = model.into();
        update_model.logo_url = Set(Some(url.to_string()));
        update_model.updated_at = Set(Utc::now().naive_utc());
        update_model.update(&self.conn).await?;

        Ok(())
    }

    /// Mirror a banner record onto the denormalized banner field
    pub async fn update_banner_url(
        &self,
        chain_id: u64,
        name_hash: &str,
        url: &str,
    ) -> Result<(), DbError> {
        let Some(model) = self.find_by_name_hash(chain_id, name_hash).await? else {
            return Ok(());
        };

        let mut update_model: names::ActiveModel = model.into();
        update_model.banner_url = Set(Some(url.to_string()));
        update_model.updated_at = Set(Utc::now().naive_utc());
        update_model.update(&self.conn).await?;

        Ok(())
    }
}
