#[allow(clippy::module_inception)]
pub mod auth;

// Re-export from auth.rs so we can do "use crate::auth::*;"
pub use auth::{parse_authorization, Auth};
