pub mod base;
pub mod s3_presigner;

pub use base::{create_presigner, new_image_id, Presigner};
