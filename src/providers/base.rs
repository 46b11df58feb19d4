use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    jwks_provider::{JwksProvider, JwksProviderConfig},
    secret_provider::{SecretProvider, SecretProviderConfig},
};
use crate::models::user::User;

/// Configuration options for each token provider.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
#[serde(tag = "type")]
pub enum ProviderConfig {
    #[serde(rename = "jwks")]
    Jwks(JwksProviderConfig),
    #[serde(rename = "secret")]
    Secret(SecretProviderConfig),
}

/// A token provider must be able to return a User or an error.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    fn get_name(&self) -> &str;
    /// The scheme matched against the Authorization header.
    fn get_type(&self) -> &str {
        "Bearer"
    }
    async fn authenticate(&self, token: &str) -> Result<User, String>;
}

/// Create a token provider from a given config.
pub fn create_auth_provider(config: &ProviderConfig) -> Box<dyn Provider> {
    match config {
        ProviderConfig::Jwks(cfg) => Box::new(JwksProvider::new(cfg)),
        ProviderConfig::Secret(cfg) => Box::new(SecretProvider::new(cfg)),
    }
}
