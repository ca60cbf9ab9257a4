use sea_orm::DatabaseConnection;

use crate::infrastructure::persistence::connection::DbPool;
use crate::infrastructure::persistence::repositories::{
    BlockRecordRepository, IpaMetadataRepository, NameRepository, Repositories,
    TextRecordRepository, TokenMetadataRepository,
};

/// Factory for creating repositories
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create all repositories
    pub fn create_repositories(db_pool: &DbPool) -> Repositories {
        let conn = db_pool.get_connection().clone();
        Self::create_repositories_with(conn)
    }

    /// Create all repositories from an existing connection
    pub fn create_repositories_with(conn: DatabaseConnection) -> Repositories {
        Repositories::new(
            BlockRecordRepository::new(conn.clone()),
            NameRepository::new(conn.clone()),
            TextRecordRepository::new(conn.clone()),
            TokenMetadataRepository::new(conn.clone()),
            IpaMetadataRepository::new(conn),
        )
    }
}
