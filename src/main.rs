use names_indexer::application::scanner::ScannerManager;
use names_indexer::config::AppConfig;
use names_indexer::infrastructure::persistence::{DbPool, RepositoryFactory};
use names_indexer::utils::logging;

#[tokio::main]
async fn main() {
    logging::init_logger();

    let config = AppConfig::from_env();

    match DbPool::new(&config).await {
        Ok(db_pool) => {
            let repositories = RepositoryFactory::create_repositories(&db_pool);

            let mut manager = ScannerManager::new(config.clone());

            match manager.initialize(repositories).await {
                Ok(()) => {
                    manager.start_all().await;

                    tokio::signal::ctrl_c()
                        .await
                        .expect("Failed to listen for Ctrl+C");
                    manager.stop_all().await;
                }
                Err(e) => {
                    logging::log_error(&format!("Error initializing scanners: {}", e));
                }
            }
        }
        Err(e) => logging::log_error(&format!("Failed to connect to database: {}", e)),
    }
}
