//! Text record projector

use crate::domain::errors::ProjectionError;
use crate::domain::models::{ReceiptContext, TextChangedData, TextField};
use crate::infrastructure::persistence::repositories::{NameRepository, TextRecordRepository};

/// Applies text record changes. Keys are validated against the allow-list
/// before anything is written; avatar and banner values are additionally
/// mirrored onto the primary record's denormalized fields.
#[derive(Clone)]
pub struct TextRecordProjector {
    names: NameRepository,
    text_records: TextRecordRepository,
}

impl TextRecordProjector {
    pub fn new(names: NameRepository, text_records: TextRecordRepository) -> Self {
        Self {
            names,
            text_records,
        }
    }

    pub async fn apply(
        &self,
        ctx: &ReceiptContext,
        data: &TextChangedData,
    ) -> Result<(), ProjectionError> {
        let Some(field) = TextField::parse(&data.key) else {
            return Err(ProjectionError::DisallowedTextKey(data.key.clone()));
        };

        // The event only carries the node; resolve it to the registered name
        let name_row = self
            .names
            .find_by_name_hash(ctx.chain_id, &data.node)
            .await?
            .ok_or_else(|| {
                ProjectionError::ProcessingError(format!(
                    "no registered name for node {} on chain {}",
                    data.node, ctx.chain_id
                ))
            })?;

        self.text_records
            .set_field(ctx.chain_id, &name_row.name, field, &data.value)
            .await?;

        match field {
            TextField::Avatar => {
                self.names
                    .update_logo_url(ctx.chain_id, &data.node, &data.value)
                    .await?;
            }
            TextField::Banner => {
                self.names
                    .update_banner_url(ctx.chain_id, &data.node, &data.value)
                    .await?;
            }
            _ => {}
        }

        Ok(())
    }
}
