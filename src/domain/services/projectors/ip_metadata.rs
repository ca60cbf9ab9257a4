//! IP asset metadata projector

use crate::domain::errors::ProjectionError;
use crate::domain::models::{IpAssetData, ReceiptContext};
use crate::infrastructure::persistence::repositories::{IpaMetadataRepository, NewIpaMetadata};

const STATUS_REGISTERED: &str = "REGISTERED";

/// Applies IP asset registrations. An existing document only gets its
/// status and ids patched; descriptive fields are never overwritten.
#[derive(Clone)]
pub struct IpMetadataProjector {
    ipa_metadata: IpaMetadataRepository,
}

impl IpMetadataProjector {
    pub fn new(ipa_metadata: IpaMetadataRepository) -> Self {
        Self { ipa_metadata }
    }

    pub async fn apply(
        &self,
        ctx: &ReceiptContext,
        data: &IpAssetData,
    ) -> Result<(), ProjectionError> {
        if self.ipa_metadata.find(&data.ip_id).await?.is_some() {
            self.ipa_metadata
                .patch_registration(&data.ip_id, Some(&data.token_id), STATUS_REGISTERED)
                .await?;
            return Ok(());
        }

        self.ipa_metadata
            .insert(NewIpaMetadata {
                ip_id: data.ip_id.clone(),
                chain_id: ctx.chain_id,
                token_id: Some(data.token_id.clone()),
                status: STATUS_REGISTERED.to_string(),
                title: Some(data.title.clone()),
                description: data.description.clone(),
                media_url: data.media_url.clone(),
                registration_date_ms: data.registration_date,
            })
            .await?;

        Ok(())
    }
}
