use std::sync::Arc;

use tracing::info;

use super::s3_presigner::S3Presigner;
use crate::config::AttachmentsConfig;

/// Issues capability URLs for attachment objects. The application never handles the bytes itself.
pub trait Presigner: Send + Sync {
    /// A short-lived URL the client can `PUT` the object `image_id` to.
    fn upload_url(&self, image_id: &str) -> Result<String, String>;
    /// The URL at which the uploaded object will be readable.
    fn attachment_url(&self, image_id: &str) -> String;
}

pub fn create_presigner(config: &AttachmentsConfig) -> Arc<dyn Presigner> {
    info!(
        "Attachment uploads go to bucket '{}' ({}), URLs valid for {}s",
        config.bucket, config.region, config.url_expiration
    );
    Arc::new(S3Presigner::new(config))
}

/// A fresh, opaque identifier for an attachment object.
pub fn new_image_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
