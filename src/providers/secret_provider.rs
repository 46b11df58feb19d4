use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::user::User;
use crate::providers::Provider;

/// Validates HS256 tokens signed with a shared secret.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct SecretProviderConfig {
    pub name: String,
    pub secret: String,
    /// Required `iss` claim, if set.
    pub issuer: Option<String>,
    /// Required `aud` claim, if set.
    pub audience: Option<String>,
}

pub struct SecretProvider {
    config: SecretProviderConfig,
    key: DecodingKey,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

impl SecretProvider {
    pub fn new(config: &SecretProviderConfig) -> Self {
        info!("Creating shared-secret provider '{}'", config.name);
        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            config: config.clone(),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        match &self.config.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = &self.config.issuer {
            validation.set_issuer(&[iss]);
        }
        validation
    }
}

#[async_trait::async_trait]
impl Provider for SecretProvider {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    async fn authenticate(&self, token: &str) -> Result<User, String> {
        let decoded = decode::<Claims>(token, &self.key, &self.validation())
            .map_err(|e| format!("Failed to decode JWT: {}", e))?;
        debug!("Token accepted by '{}'", self.config.name);
        Ok(User::new(decoded.claims.sub, self.config.name.clone()))
    }
}
