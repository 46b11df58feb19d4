use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TodoStore};
use crate::models::{TodoItem, UpdateTodoRequest};

/// Process-local store. Each owner's items are kept in insertion (creation) order.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, Vec<TodoItem>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn find_mut<'a>(
    items: &'a mut HashMap<String, Vec<TodoItem>>,
    owner_id: &str,
    item_id: &str,
) -> Result<&'a mut TodoItem, StoreError> {
    items
        .get_mut(owner_id)
        .and_then(|owned| owned.iter_mut().find(|i| i.item_id == item_id))
        .ok_or_else(|| StoreError::NotFound(item_id.to_string()))
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn create_todo(&self, item: &TodoItem) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let owned = items.entry(item.owner_id.clone()).or_default();
        if owned.iter().any(|i| i.item_id == item.item_id) {
            return Err(StoreError::Backend(format!(
                "Duplicate item id '{}'",
                item.item_id
            )));
        }
        owned.push(item.clone());
        Ok(())
    }

    async fn get_todos(&self, owner_id: &str) -> Result<Vec<TodoItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items.get(owner_id).cloned().unwrap_or_default())
    }

    async fn get_todo(
        &self,
        owner_id: &str,
        item_id: &str,
    ) -> Result<Option<TodoItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items
            .get(owner_id)
            .and_then(|owned| owned.iter().find(|i| i.item_id == item_id))
            .cloned())
    }

    async fn update_todo(
        &self,
        owner_id: &str,
        item_id: &str,
        update: &UpdateTodoRequest,
    ) -> Result<TodoItem, StoreError> {
        let mut items = self.items.write().await;
        let item = find_mut(&mut items, owner_id, item_id)?;
        item.apply(update);
        Ok(item.clone())
    }

    async fn delete_todo(&self, owner_id: &str, item_id: &str) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let owned = items
            .get_mut(owner_id)
            .ok_or_else(|| StoreError::NotFound(item_id.to_string()))?;
        let before = owned.len();
        owned.retain(|i| i.item_id != item_id);
        if owned.len() == before {
            return Err(StoreError::NotFound(item_id.to_string()));
        }
        Ok(())
    }

    async fn set_attachment_url(
        &self,
        owner_id: &str,
        item_id: &str,
        attachment_url: &str,
    ) -> Result<TodoItem, StoreError> {
        let mut items = self.items.write().await;
        let item = find_mut(&mut items, owner_id, item_id)?;
        item.attachment_url = Some(attachment_url.to_string());
        Ok(item.clone())
    }
}
