//! Manager wiring the queue system and one scanner per configured chain

use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::application::scanner::ChainScanner;
use crate::config::AppConfig;
use crate::domain::errors::ScannerError;
use crate::domain::models::ChainRegistry;
use crate::domain::services::projectors::EventProjector;
use crate::domain::services::retry::RetryHandler;
use crate::infrastructure::evm::EvmClient;
use crate::infrastructure::persistence::repositories::Repositories;
use crate::infrastructure::queue::{self, QueueConfig, QueueWorker};
use crate::utils::logging;

/// Builds and supervises the scanners and queue workers. Chains share no
/// mutable state, so each scanner loop runs independently.
pub struct ScannerManager {
    config: AppConfig,
    scanners: Vec<ChainScanner>,
    scanner_tasks: HashMap<String, JoinHandle<()>>,
    worker_tasks: Vec<JoinHandle<()>>,
}

impl ScannerManager {
    /// Creates a new scanner manager instance
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            scanners: Vec::new(),
            scanner_tasks: HashMap::new(),
            worker_tasks: Vec::new(),
        }
    }

    /// Initialize the queue system and one scanner per enabled chain
    pub async fn initialize(&mut self, repositories: Repositories) -> Result<(), ScannerError> {
        let registry = ChainRegistry::from_config(&self.config)?;
        let indexer = &self.config.indexer;

        // Queue system first: one named queue per event family, all consumed
        // by the shared projector
        let (dispatcher, receivers) = queue::build_queues();
        let projector = Arc::new(EventProjector::new(
            &repositories,
            dispatcher.clone(),
            RetryHandler::with_config(indexer.tx_retry_attempts, indexer.tx_retry_delay_ms),
            indexer.metadata_base_url.clone(),
        ));

        let queue_config = QueueConfig {
            concurrency: indexer.queue_concurrency,
            attempts: indexer.queue_attempts,
            backoff_base_ms: indexer.queue_backoff_ms,
        };

        for (kind, receiver) in receivers {
            let worker = QueueWorker::new(
                kind.queue_name(),
                receiver,
                projector.clone(),
                queue_config.clone(),
            );
            self.worker_tasks.push(tokio::spawn(worker.run()));
        }

        logging::log_info("Queue system initialized");

        for chain in registry.chains() {
            let client = EvmClient::new(chain)?;

            let scanner = ChainScanner::new(
                chain.clone(),
                Arc::new(client),
                repositories.block_records.clone(),
                dispatcher.clone(),
                indexer.clone(),
            );

            logging::log_info(&format!(
                "[{}] Scanner initialized (chain id {}, rpc {})",
                chain.name, chain.chain_id, chain.rpc_url
            ));
            self.scanners.push(scanner);
        }

        Ok(())
    }

    /// Spawn every initialized scanner loop
    pub async fn start_all(&mut self) {
        for scanner in self.scanners.drain(..) {
            let network = scanner.network().to_string();
            let handle = tokio::spawn(scanner.run());
            self.scanner_tasks.insert(network, handle);
        }
    }

    /// Abort every scanner loop and queue worker
    pub async fn stop_all(&mut self) {
        for (network, handle) in self.scanner_tasks.drain() {
            handle.abort();
            logging::log_info(&format!("[{}] Scanner stopped", network));
        }

        for handle in self.worker_tasks.drain(..) {
            handle.abort();
        }
        logging::log_info("Queue workers stopped");
    }
}
