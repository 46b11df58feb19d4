use tracing::info;

use super::TodoError;
use crate::attachments::{new_image_id, Presigner};
use crate::models::{CreateTodoRequest, TodoItem, UpdateTodoRequest};
use crate::store::TodoStore;

fn validate_name(name: &str) -> Result<String, TodoError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TodoError::Validation("name must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Creates a new item for `owner_id`. The item id and creation time are assigned here.
pub async fn create_todo(
    store: &dyn TodoStore,
    owner_id: &str,
    request: CreateTodoRequest,
) -> Result<TodoItem, TodoError> {
    let name = validate_name(&request.name)?;
    let item = TodoItem::new(owner_id, name, request.due_date);
    store.create_todo(&item).await?;
    info!(user_id = owner_id, item_id = %item.item_id, "Created todo");
    Ok(item)
}

pub async fn get_todos(store: &dyn TodoStore, owner_id: &str) -> Result<Vec<TodoItem>, TodoError> {
    Ok(store.get_todos(owner_id).await?)
}

pub async fn update_todo(
    store: &dyn TodoStore,
    owner_id: &str,
    item_id: &str,
    request: UpdateTodoRequest,
) -> Result<TodoItem, TodoError> {
    let update = UpdateTodoRequest {
        name: validate_name(&request.name)?,
        ..request
    };
    let item = store.update_todo(owner_id, item_id, &update).await?;
    info!(user_id = owner_id, item_id, done = item.done, "Updated todo");
    Ok(item)
}

pub async fn delete_todo(
    store: &dyn TodoStore,
    owner_id: &str,
    item_id: &str,
) -> Result<(), TodoError> {
    store.delete_todo(owner_id, item_id).await?;
    info!(user_id = owner_id, item_id, "Deleted todo");
    Ok(())
}

/// Points the item at a fresh attachment object and returns the URL to upload it to.
pub async fn generate_upload_url(
    store: &dyn TodoStore,
    presigner: &dyn Presigner,
    owner_id: &str,
    item_id: &str,
) -> Result<String, TodoError> {
    let image_id = new_image_id();
    let upload_url = presigner
        .upload_url(&image_id)
        .map_err(TodoError::Attachment)?;
    store
        .set_attachment_url(owner_id, item_id, &presigner.attachment_url(&image_id))
        .await?;
    info!(user_id = owner_id, item_id, image_id = %image_id, "Issued attachment upload URL");
    Ok(upload_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory_store::MemoryStore;
    use chrono::NaiveDate;

    struct FakePresigner;

    impl Presigner for FakePresigner {
        fn upload_url(&self, image_id: &str) -> Result<String, String> {
            Ok(format!("https://upload.example/{}?sig=1", image_id))
        }

        fn attachment_url(&self, image_id: &str) -> String {
            format!("https://cdn.example/{}", image_id)
        }
    }

    fn jan_8() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    fn create_request(name: &str) -> CreateTodoRequest {
        CreateTodoRequest {
            name: name.to_string(),
            due_date: jan_8(),
        }
    }

    #[tokio::test]
    async fn test_create_buy_milk() {
        let store = MemoryStore::new();
        let item = create_todo(&store, "alice", create_request("buy milk"))
            .await
            .unwrap();
        assert!(!item.done);
        assert_eq!(item.due_date, jan_8());
        assert_eq!(item.name, "buy milk");
        assert_eq!(store.get_todos("alice").await.unwrap(), vec![item]);
    }

    #[tokio::test]
    async fn test_create_trims_and_rejects_blank_names() {
        let store = MemoryStore::new();
        let item = create_todo(&store, "alice", create_request("  walk dog "))
            .await
            .unwrap();
        assert_eq!(item.name, "walk dog");

        let err = create_todo(&store, "alice", create_request("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
        assert_eq!(store.get_todos("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_created_ids_are_unique() {
        let store = MemoryStore::new();
        let mut ids = std::collections::HashSet::new();
        for i in 0..20 {
            let item = create_todo(&store, "alice", create_request(&format!("task {}", i)))
                .await
                .unwrap();
            assert!(ids.insert(item.item_id));
        }
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_done() {
        let store = MemoryStore::new();
        let item = create_todo(&store, "alice", create_request("buy milk"))
            .await
            .unwrap();
        let toggle = |done: bool| UpdateTodoRequest {
            name: item.name.clone(),
            due_date: item.due_date,
            done,
        };
        let once = update_todo(&store, "alice", &item.item_id, toggle(!item.done))
            .await
            .unwrap();
        let twice = update_todo(&store, "alice", &item.item_id, toggle(!once.done))
            .await
            .unwrap();
        assert_eq!(twice.done, item.done);
        assert_eq!(twice.item_id, item.item_id);
        assert_eq!(twice.owner_id, item.owner_id);
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let store = MemoryStore::new();
        let err = delete_todo(&store, "alice", "nope").await.unwrap_err();
        assert_eq!(err, TodoError::NotFound("nope".to_string()));
    }

    #[tokio::test]
    async fn test_generate_upload_url_stores_attachment_url() {
        let store = MemoryStore::new();
        let item = create_todo(&store, "alice", create_request("buy milk"))
            .await
            .unwrap();

        let url = generate_upload_url(&store, &FakePresigner, "alice", &item.item_id)
            .await
            .unwrap();
        assert!(url.starts_with("https://upload.example/"));

        let stored = store
            .get_todo("alice", &item.item_id)
            .await
            .unwrap()
            .unwrap();
        let attachment = stored.attachment_url.unwrap();
        assert!(attachment.starts_with("https://cdn.example/"));
        // Both URLs name the same object.
        let image_id = attachment.trim_start_matches("https://cdn.example/");
        assert!(url.contains(image_id));
    }

    #[tokio::test]
    async fn test_generate_upload_url_for_foreign_item_is_not_found() {
        let store = MemoryStore::new();
        let item = create_todo(&store, "alice", create_request("buy milk"))
            .await
            .unwrap();
        let err = generate_upload_url(&store, &FakePresigner, "bob", &item.item_id)
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::NotFound(_)));
    }
}
