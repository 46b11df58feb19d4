// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod attachments;
#[allow(clippy::module_inception)]
pub mod config;
pub mod logging;
pub mod store;

pub use attachments::*;
pub use config::*;
pub use logging::*;
pub use store::*;
