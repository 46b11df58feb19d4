//! Headless state for the list and upload screens, plus the HTTP client they drive.

pub mod api;
pub mod auth;
pub mod edit_view;
pub mod notifier;
pub mod pagination;
pub mod todos_view;

pub use api::{ApiError, TodosApi, TodosBackend};
pub use auth::{AuthClient, SessionAuth};
pub use edit_view::{EditView, UploadState};
pub use notifier::{LogNotifier, Notifier, QueuedNotifier};
pub use pagination::{total_pages, PageWindow, PAGE_SIZE};
pub use todos_view::{default_due_date, LoadState, TodosView};
