use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::{memory_store::MemoryStore, mongodb_store::MongoDBStore};
use crate::config::StoreConfig;
use crate::models::{TodoItem, UpdateTodoRequest};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No item with this id exists for the owner.
    #[error("Todo item '{0}' not found")]
    NotFound(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// The TodoStore trait abstracts item storage. Records are keyed by (owner id, item id);
/// an item owned by someone else is indistinguishable from a missing one.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create_todo(&self, item: &TodoItem) -> Result<(), StoreError>;
    /// All of the owner's items, oldest first.
    async fn get_todos(&self, owner_id: &str) -> Result<Vec<TodoItem>, StoreError>;
    async fn get_todo(&self, owner_id: &str, item_id: &str)
        -> Result<Option<TodoItem>, StoreError>;
    async fn update_todo(
        &self,
        owner_id: &str,
        item_id: &str,
        update: &UpdateTodoRequest,
    ) -> Result<TodoItem, StoreError>;
    async fn delete_todo(&self, owner_id: &str, item_id: &str) -> Result<(), StoreError>;
    async fn set_attachment_url(
        &self,
        owner_id: &str,
        item_id: &str,
        attachment_url: &str,
    ) -> Result<TodoItem, StoreError>;
}

/// Creates a concrete store implementation based on the StoreConfig.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn TodoStore>, String> {
    match config {
        StoreConfig::Memory => {
            info!("Using in-memory todo store; items are lost on restart.");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreConfig::MongoDB(mongo_config) => {
            let store = MongoDBStore::new(mongo_config)
                .await
                .map_err(|e| format!("Failed to create MongoDB store: {}", e))?;
            info!("Successfully created MongoDB store.");
            Ok(Arc::new(store))
        }
    }
}
