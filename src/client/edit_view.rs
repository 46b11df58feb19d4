//! State behind the attachment upload screen for a single item.

use std::sync::Arc;

use tracing::{debug, info};

use super::api::{ApiError, TodosBackend};
use super::auth::AuthClient;
use super::notifier::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    NoUpload,
    FetchingPresignedUrl,
    UploadingFile,
}

pub struct EditView {
    backend: Arc<dyn TodosBackend>,
    auth: Arc<dyn AuthClient>,
    notifier: Arc<dyn Notifier>,
    item_id: String,
    file: Option<Vec<u8>>,
    state: UploadState,
}

impl EditView {
    pub fn new(
        backend: Arc<dyn TodosBackend>,
        auth: Arc<dyn AuthClient>,
        notifier: Arc<dyn Notifier>,
        item_id: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            auth,
            notifier,
            item_id: item_id.into(),
            file: None,
            state: UploadState::NoUpload,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    /// Select the file to upload. Only the first selected file is kept.
    pub fn select_file(&mut self, bytes: Option<Vec<u8>>) {
        self.file = bytes;
    }

    /// Upload the selected file as the item's attachment.
    pub async fn submit(&mut self) {
        let Some(bytes) = self.file.clone() else {
            self.notifier.alert("File should be selected");
            return;
        };

        match self.upload(bytes).await {
            Ok(()) => {
                info!(item_id = %self.item_id, "Attachment uploaded");
                self.notifier.alert("File was uploaded!");
            }
            Err(e) => {
                debug!("Upload failed: {}", e);
                self.notifier
                    .alert(&format!("Could not upload a file: {}", e));
            }
        }
        self.state = UploadState::NoUpload;
    }

    async fn upload(&mut self, bytes: Vec<u8>) -> Result<(), ApiError> {
        let id_token = self.auth.id_token().unwrap_or_default();

        self.state = UploadState::FetchingPresignedUrl;
        let upload_url = self.backend.get_upload_url(&id_token, &self.item_id).await?;

        self.state = UploadState::UploadingFile;
        self.backend.upload_file(&upload_url, bytes).await
    }
}
