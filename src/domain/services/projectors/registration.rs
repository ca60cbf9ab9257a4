//! Registration projector

use crate::domain::errors::ProjectionError;
use crate::domain::models::{ReceiptContext, RegistrationData};
use crate::infrastructure::persistence::repositories::{
    NameRepository, NewName, TextRecordRepository, TokenMetadataRepository,
};
use crate::utils::logging;

/// Applies registration events: the primary name record plus its profile
/// stub and descriptive metadata.
#[derive(Clone)]
pub struct RegistrationProjector {
    names: NameRepository,
    text_records: TextRecordRepository,
    token_metadata: TokenMetadataRepository,
    metadata_base_url: String,
}

impl RegistrationProjector {
    pub fn new(
        names: NameRepository,
        text_records: TextRecordRepository,
        token_metadata: TokenMetadataRepository,
        metadata_base_url: String,
    ) -> Self {
        Self {
            names,
            text_records,
            token_metadata,
            metadata_base_url,
        }
    }

    pub async fn apply(
        &self,
        ctx: &ReceiptContext,
        data: &RegistrationData,
    ) -> Result<(), ProjectionError> {
        if self
            .names
            .find_by_name_hash(ctx.chain_id, &data.name_hash)
            .await?
            .is_some()
        {
            // Duplicate delivery: refresh the secondary records only
            logging::log_debug(&format!(
                "Name {} already registered on chain {}, refreshing secondary records",
                data.full_name, ctx.chain_id
            ));
            self.text_records
                .ensure_record(ctx.chain_id, &data.full_name)
                .await?;
            self.upsert_metadata(ctx, data).await?;
            return Ok(());
        }

        self.names
            .create(NewName {
                token_id: data.token_id.clone(),
                chain_id: ctx.chain_id,
                name: data.full_name.clone(),
                name_hash: data.name_hash.clone(),
                owner: data.owner.clone(),
                expires_at: data.expires_at,
            })
            .await?;
        self.text_records
            .ensure_record(ctx.chain_id, &data.full_name)
            .await?;
        self.upsert_metadata(ctx, data).await?;

        Ok(())
    }

    async fn upsert_metadata(
        &self,
        ctx: &ReceiptContext,
        data: &RegistrationData,
    ) -> Result<(), ProjectionError> {
        let image = format!(
            "{}/api/metadata/{}/{}/image",
            self.metadata_base_url, ctx.chain_id, data.token_id
        );
        let external_url = format!("{}/names/{}", self.metadata_base_url, data.full_name);

        self.token_metadata
            .upsert(
                ctx.chain_id,
                &data.token_id,
                &data.full_name,
                &image,
                &external_url,
            )
            .await?;

        Ok(())
    }
}
