//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! configuration, the bearer-token chain, the item store and the presigner.

use crate::attachments::Presigner;
use crate::auth::Auth;
use crate::config::ConfigV1;
use crate::store::TodoStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; every field is a cheap `Arc` handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Bearer-token authentication chain.
    pub auth: Arc<Auth>,
    /// Item storage backend.
    pub store: Arc<dyn TodoStore>,
    /// Upload URL issuer for attachments.
    pub presigner: Arc<dyn Presigner>,
}
