use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Object-store bucket that receives attachment uploads.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct AttachmentsConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Lifetime of an upload URL, in seconds.
    #[serde(default = "default_url_expiration")]
    pub url_expiration: u64,
    /// Path-style endpoint (e.g. a MinIO URL). When absent the virtual-hosted
    /// AWS endpoint `https://<bucket>.s3.<region>.amazonaws.com` is used.
    pub endpoint: Option<String>,
}

fn default_url_expiration() -> u64 {
    300
}
