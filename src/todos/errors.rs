use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Absent, or owned by someone else.
    #[error("Todo item '{0}' not found")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Attachment failure: {0}")]
    Attachment(String),
}

impl From<StoreError> for TodoError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(item_id) => TodoError::NotFound(item_id),
            StoreError::Backend(msg) => TodoError::Storage(msg),
        }
    }
}
