//! REST client for the todo backend.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    CreateTodoRequest, TodoItem, TodoListResponse, TodoResponse, UpdateTodoRequest,
    UploadUrlResponse,
};

/// Unreserved characters stay literal inside a path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },
}

/// The backend operations the views rely on.
#[async_trait]
pub trait TodosBackend: Send + Sync {
    async fn get_todos(&self, id_token: &str) -> Result<Vec<TodoItem>, ApiError>;
    async fn create_todo(
        &self,
        id_token: &str,
        request: &CreateTodoRequest,
    ) -> Result<TodoItem, ApiError>;
    async fn patch_todo(
        &self,
        id_token: &str,
        item_id: &str,
        request: &UpdateTodoRequest,
    ) -> Result<(), ApiError>;
    async fn delete_todo(&self, id_token: &str, item_id: &str) -> Result<(), ApiError>;
    async fn get_upload_url(&self, id_token: &str, item_id: &str) -> Result<String, ApiError>;
    /// PUT the bytes straight to the object store; no bearer token is sent.
    async fn upload_file(&self, upload_url: &str, bytes: Vec<u8>) -> Result<(), ApiError>;
}

/// `reqwest`-backed implementation talking to the HTTP API at `endpoint`.
#[derive(Clone)]
pub struct TodosApi {
    client: Client,
    endpoint: String,
}

impl TodosApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    fn item_url(&self, item_id: &str, suffix: &str) -> String {
        self.url(&format!(
            "/todos/{}{}",
            utf8_percent_encode(item_id, SEGMENT_ENCODE_SET),
            suffix
        ))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TodosBackend for TodosApi {
    async fn get_todos(&self, id_token: &str) -> Result<Vec<TodoItem>, ApiError> {
        debug!("Fetching todos from {}", self.endpoint);
        let response =
            Self::send(self.client.get(self.url("/todos")).bearer_auth(id_token)).await?;
        let body: TodoListResponse = response.json().await?;
        Ok(body.items)
    }

    async fn create_todo(
        &self,
        id_token: &str,
        request: &CreateTodoRequest,
    ) -> Result<TodoItem, ApiError> {
        let response = Self::send(
            self.client
                .post(self.url("/todos"))
                .bearer_auth(id_token)
                .json(request),
        )
        .await?;
        let body: TodoResponse = response.json().await?;
        Ok(body.item)
    }

    async fn patch_todo(
        &self,
        id_token: &str,
        item_id: &str,
        request: &UpdateTodoRequest,
    ) -> Result<(), ApiError> {
        Self::send(
            self.client
                .patch(self.item_url(item_id, ""))
                .bearer_auth(id_token)
                .json(request),
        )
        .await?;
        Ok(())
    }

    async fn delete_todo(&self, id_token: &str, item_id: &str) -> Result<(), ApiError> {
        Self::send(
            self.client
                .delete(self.item_url(item_id, ""))
                .bearer_auth(id_token),
        )
        .await?;
        Ok(())
    }

    async fn get_upload_url(&self, id_token: &str, item_id: &str) -> Result<String, ApiError> {
        let response = Self::send(
            self.client
                .post(self.item_url(item_id, "/attachment"))
                .bearer_auth(id_token),
        )
        .await?;
        let body: UploadUrlResponse = response.json().await?;
        Ok(body.upload_url)
    }

    async fn upload_file(&self, upload_url: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        Self::send(self.client.put(upload_url).body(bytes)).await?;
        Ok(())
    }
}
