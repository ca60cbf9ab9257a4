//! Renewal projector

use crate::domain::errors::ProjectionError;
use crate::domain::models::{ReceiptContext, RenewalData};
use crate::infrastructure::persistence::repositories::NameRepository;

/// Applies renewal events: sets the new expiry, creating a partial record
/// when the token was never seen.
#[derive(Clone)]
pub struct RenewalProjector {
    names: NameRepository,
}

impl RenewalProjector {
    pub fn new(names: NameRepository) -> Self {
        Self { names }
    }

    pub async fn apply(
        &self,
        ctx: &ReceiptContext,
        data: &RenewalData,
    ) -> Result<(), ProjectionError> {
        self.names
            .upsert_expiry(
                ctx.chain_id,
                &data.token_id,
                &data.full_name,
                &data.name_hash,
                data.expires_at,
            )
            .await?;

        Ok(())
    }
}
