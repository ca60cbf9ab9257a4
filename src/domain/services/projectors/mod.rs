//! Event projectors
//!
//! One idempotent handler per event family, each applying a decoded event
//! to the read-model store with upserts on natural keys. Replaying the same
//! event converges to the same state.

mod ip_metadata;
mod registration;
mod renewal;
mod text_record;
mod transfer;

pub use ip_metadata::IpMetadataProjector;
pub use registration::RegistrationProjector;
pub use renewal::RenewalProjector;
pub use text_record::TextRecordProjector;
pub use transfer::TransferProjector;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::ProjectionError;
use crate::domain::models::{EventData, EventJob};
use crate::domain::services::retry::RetryHandler;
use crate::infrastructure::persistence::repositories::Repositories;
use crate::infrastructure::queue::{JobDispatcher, JobHandler};
use crate::utils::logging;

/// Aggregates the per-family handlers and routes each job by its payload.
/// Every handler runs inside a bounded retry; when the retry budget is
/// spent the job is re-enqueued for another delivery attempt, at the cost
/// of possible duplicate scheduling.
pub struct EventProjector {
    registration: RegistrationProjector,
    renewal: RenewalProjector,
    transfer: TransferProjector,
    text_record: TextRecordProjector,
    ip_metadata: IpMetadataProjector,
    dispatcher: Arc<JobDispatcher>,
    retry: RetryHandler,
}

impl EventProjector {
    pub fn new(
        repositories: &Repositories,
        dispatcher: Arc<JobDispatcher>,
        retry: RetryHandler,
        metadata_base_url: String,
    ) -> Self {
        Self {
            registration: RegistrationProjector::new(
                repositories.names.clone(),
                repositories.text_records.clone(),
                repositories.token_metadata.clone(),
                metadata_base_url,
            ),
            renewal: RenewalProjector::new(repositories.names.clone()),
            transfer: TransferProjector::new(repositories.names.clone()),
            text_record: TextRecordProjector::new(
                repositories.names.clone(),
                repositories.text_records.clone(),
            ),
            ip_metadata: IpMetadataProjector::new(repositories.ipa_metadata.clone()),
            dispatcher,
            retry,
        }
    }

    /// Apply one job through its family handler, with bounded retry
    pub async fn apply(&self, job: &EventJob) -> Result<(), ProjectionError> {
        let ctx = &job.receipt;

        match &job.return_values {
            EventData::Registration(data) => {
                self.retry
                    .retry_until(|| self.registration.apply(ctx, data))
                    .await
            }
            EventData::Renewal(data) => {
                self.retry.retry_until(|| self.renewal.apply(ctx, data)).await
            }
            EventData::Transfer(data) => {
                self.retry
                    .retry_until(|| self.transfer.apply(ctx, data))
                    .await
            }
            EventData::TextChanged(data) => {
                self.retry
                    .retry_until(|| self.text_record.apply(ctx, data))
                    .await
            }
            EventData::IpAssetRegistered(data) => {
                self.retry
                    .retry_until(|| self.ip_metadata.apply(ctx, data))
                    .await
            }
        }
    }
}

#[async_trait]
impl JobHandler for EventProjector {
    async fn handle(&self, job: EventJob) -> Result<(), ProjectionError> {
        match self.apply(&job).await {
            Ok(()) => Ok(()),
            // Validation failures go through the broker's own retry policy
            // and eventually fail permanently
            Err(e @ ProjectionError::DisallowedTextKey(_)) => Err(e),
            Err(e) => {
                // Local retries exhausted: schedule another delivery of the
                // same job
                logging::log_warning(&format!(
                    "Job {} for tx {} exhausted local retries ({}), re-enqueueing",
                    job.event_type.job_name(),
                    job.receipt.tx_hash,
                    e
                ));
                self.dispatcher.dispatch(job)?;
                Ok(())
            }
        }
    }
}
