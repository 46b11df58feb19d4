use std::net::SocketAddr;

use axum::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::StatusCode;
use http::request::Parts;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// The authenticated caller. `user_id` is the token subject and owns the caller's items.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    /// Name of the provider that accepted the token.
    pub provider: String,
}

impl User {
    pub fn new(user_id: impl Into<String>, provider: impl Into<String>) -> Self {
        User {
            user_id: user_id.into(),
            provider: provider.into(),
        }
    }
}

/// Implementation of the request extractor for User.
/// When authentication fails, we return a 401 with a Bearer challenge.
#[async_trait]
impl FromRequestParts<AppState> for User {
    type Rejection = HTTPError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<User, HTTPError> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        // Only used for logging; absent when the router is driven without a socket.
        let client_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        match state.auth.authenticate(auth_header, &client_ip).await {
            Some(user) => Ok(user),
            None => {
                debug!("Rejecting request from IP='{}'", client_ip);
                Err(HTTPError::new(
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized access",
                    Some("Bearer".to_string()),
                ))
            }
        }
    }
}
