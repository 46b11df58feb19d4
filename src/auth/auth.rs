use std::time::Duration;

use futures::future::{select_ok, FutureExt};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::models::User;
use crate::providers::{create_auth_provider, Provider, ProviderConfig};

/// Holds the configured token providers.
pub struct Auth {
    pub providers: Vec<Box<dyn Provider>>,
    config: AuthConfig,
}

/// Split an Authorization header into its scheme and credentials.
pub fn parse_authorization(auth_header: &str) -> Option<(&str, &str)> {
    let mut parts = auth_header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(credentials), None) => Some((scheme, credentials)),
        _ => None,
    }
}

impl Auth {
    /// Initialize the Auth struct by creating providers from the configurations.
    pub fn new(provider_config: &[ProviderConfig], config: AuthConfig) -> Self {
        info!("Creating auth providers...");
        let providers = provider_config.iter().map(create_auth_provider).collect();
        Self::with_providers(providers, config)
    }

    pub fn with_providers(providers: Vec<Box<dyn Provider>>, config: AuthConfig) -> Self {
        Auth { providers, config }
    }

    /// Authenticates a caller using the first provider that accepts the token. Each provider
    /// call runs under a timeout so a slow provider won't block the others.
    /// If all fail or time out, returns None.
    pub async fn authenticate(&self, auth_header: &str, ip: &str) -> Option<User> {
        let Some((auth_type, token)) = parse_authorization(auth_header) else {
            warn!("Missing or malformed Authorization header from IP='{}'", ip);
            return None;
        };

        debug!(
            "Authenticating with auth_type='{}' from IP='{}'",
            auth_type, ip
        );

        let timeout_duration = Duration::from_millis(self.config.timeout_in_ms);
        let futures = self
            .providers
            .iter()
            .filter(|p| p.get_type().eq_ignore_ascii_case(auth_type))
            .map(|provider| {
                let name = provider.get_name().to_owned();
                async move {
                    match timeout(timeout_duration, provider.authenticate(token)).await {
                        Ok(Ok(user)) => Ok(user),
                        Ok(Err(e)) => Err(format!("Provider '{}' failed: {}", name, e)),
                        Err(_) => Err(format!("Provider '{}' timed out", name)),
                    }
                }
                .boxed()
            })
            .collect::<Vec<_>>();

        if futures.is_empty() {
            warn!("No providers found for auth type: '{}'", auth_type);
            return None;
        }

        // select_ok returns on the first success, dropping the remaining futures.
        match select_ok(futures).await {
            Ok((user, _remaining)) => {
                info!(
                    user_id = %user.user_id,
                    provider = %user.provider,
                    "Authenticated request"
                );
                Some(user)
            }
            Err(e) => {
                warn!("All providers failed; last error: {}", e);
                None
            }
        }
    }
}
