//! Ownership transfer projector

use crate::domain::errors::ProjectionError;
use crate::domain::models::{ReceiptContext, TransferData};
use crate::infrastructure::persistence::repositories::NameRepository;
use crate::utils::logging;

/// Applies ownership transfers with a conditional match on the previous
/// owner. A stale or duplicate delivery whose previous owner no longer
/// matches simply no-ops; the handler does not distinguish "already
/// applied" from "genuinely out of order".
#[derive(Clone)]
pub struct TransferProjector {
    names: NameRepository,
}

impl TransferProjector {
    pub fn new(names: NameRepository) -> Self {
        Self { names }
    }

    pub async fn apply(
        &self,
        ctx: &ReceiptContext,
        data: &TransferData,
    ) -> Result<(), ProjectionError> {
        let matched = self
            .names
            .transfer_owner(ctx.chain_id, &data.token_id, &data.from, &data.to)
            .await?;

        if !matched {
            logging::log_debug(&format!(
                "Transfer of token {} on chain {} matched no row (previous owner {}), skipping",
                data.token_id, ctx.chain_id, data.from
            ));
        }

        Ok(())
    }
}
