use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::CatalogResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // inserts or replaces an entity
    async fn save(&self, entity: &Entity) -> CatalogResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> CatalogResult<Entity>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}

impl From<String> for RepositoryStore {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamodb" | "ddb" => RepositoryStore::DynamoDB,
            "memory" | "mem" => RepositoryStore::Memory,
            _ => RepositoryStore::LocalDynamoDB,
        }
    }
}
