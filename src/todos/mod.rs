//! Todo operations expressed over the item store and the attachment presigner.
//!
//! Request handlers stay thin: they authenticate, extract parameters and call
//! into this module, which owns validation and the shape of each mutation.

pub mod errors;
pub mod operations;

pub use errors::TodoError;
pub use operations::{
    create_todo, delete_todo, generate_upload_url, get_todos, update_todo,
};
