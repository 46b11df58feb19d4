use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{
    ClientOptions, FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument,
};
use mongodb::{Client, Collection, IndexModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{TodoItem, UpdateTodoRequest};
use crate::store::{StoreError, TodoStore};

/// The config struct for MongoDB connections.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct MongoDBConfig {
    pub uri: String,
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    "todos".to_string()
}

/// A `TodoStore` backed by a single MongoDB collection of `TodoItem` documents.
pub struct MongoDBStore {
    collection: Collection<TodoItem>,
}

fn backend(context: &str) -> impl Fn(mongodb::error::Error) -> StoreError + '_ {
    move |e| StoreError::Backend(format!("{}: {}", context, e))
}

impl MongoDBStore {
    /// Connects, then ensures the (ownerId, itemId) unique index and the listing index exist.
    pub async fn new(config: &MongoDBConfig) -> Result<Self, StoreError> {
        info!("Connecting to MongoDB at URI: {}", config.uri);

        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(backend("Failed to parse MongoDB URI"))?;
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client =
            Client::with_options(client_options).map_err(backend("Failed to create client"))?;
        let collection = client
            .database(&config.database)
            .collection::<TodoItem>(&config.collection);

        let mut unique_item = IndexModel::default();
        unique_item.keys = doc! { "ownerId": 1, "itemId": 1 };
        unique_item.options = Some(IndexOptions::builder().unique(true).build());
        collection
            .create_index(unique_item, None)
            .await
            .map_err(backend("Failed to create unique index on (ownerId, itemId)"))?;

        let mut by_created = IndexModel::default();
        by_created.keys = doc! { "ownerId": 1, "createdAt": 1 };
        collection
            .create_index(by_created, None)
            .await
            .map_err(backend("Failed to create index on (ownerId, createdAt)"))?;

        info!("MongoDB connection established successfully.");
        Ok(Self { collection })
    }

    fn item_filter(owner_id: &str, item_id: &str) -> Document {
        doc! { "ownerId": owner_id, "itemId": item_id }
    }

    fn update_document(update: &UpdateTodoRequest) -> Document {
        doc! {
            "$set": {
                "name": &update.name,
                "dueDate": update.due_date.format("%Y-%m-%d").to_string(),
                "done": update.done,
            }
        }
    }

    fn return_updated() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }
}

#[async_trait]
impl TodoStore for MongoDBStore {
    async fn create_todo(&self, item: &TodoItem) -> Result<(), StoreError> {
        self.collection
            .insert_one(item, None)
            .await
            .map_err(backend("Failed to insert todo"))?;
        Ok(())
    }

    async fn get_todos(&self, owner_id: &str) -> Result<Vec<TodoItem>, StoreError> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": 1 })
            .build();
        let cursor = self
            .collection
            .find(doc! { "ownerId": owner_id }, options)
            .await
            .map_err(backend("Failed to list todos"))?;
        let items: Vec<TodoItem> = cursor
            .try_collect()
            .await
            .map_err(backend("Failed to read todo document"))?;
        debug!("Loaded {} todos for owner", items.len());
        Ok(items)
    }

    async fn get_todo(
        &self,
        owner_id: &str,
        item_id: &str,
    ) -> Result<Option<TodoItem>, StoreError> {
        self.collection
            .find_one(Self::item_filter(owner_id, item_id), None)
            .await
            .map_err(backend("Failed to query todo"))
    }

    async fn update_todo(
        &self,
        owner_id: &str,
        item_id: &str,
        update: &UpdateTodoRequest,
    ) -> Result<TodoItem, StoreError> {
        self.collection
            .find_one_and_update(
                Self::item_filter(owner_id, item_id),
                Self::update_document(update),
                Self::return_updated(),
            )
            .await
            .map_err(backend("Failed to update todo"))?
            .ok_or_else(|| StoreError::NotFound(item_id.to_string()))
    }

    async fn delete_todo(&self, owner_id: &str, item_id: &str) -> Result<(), StoreError> {
        let result = self
            .collection
            .delete_one(Self::item_filter(owner_id, item_id), None)
            .await
            .map_err(backend("Failed to delete todo"))?;
        if result.deleted_count == 0 {
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
        self.collection
            .find_one_and_update(
                Self::item_filter(owner_id, item_id),
                doc! { "$set": { "attachmentUrl": attachment_url } },
                Self::return_updated(),
            )
            .await
            .map_err(backend("Failed to set attachment url"))?
            .ok_or_else(|| StoreError::NotFound(item_id.to_string()))
    }
}
