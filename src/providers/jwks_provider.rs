#[allow(unused_imports)]
use cached::proc_macro::cached;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::models::user::User;
use crate::providers::Provider;

/// Validates tokens issued by a hosted identity provider that publishes its keys as a JWKS document.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct JwksProviderConfig {
    pub name: String,
    pub cert_uri: String,
    /// Required `iss` claim, if set.
    pub issuer: Option<String>,
}

pub struct JwksProvider {
    pub config: JwksProviderConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct Claims {
    sub: String,
}

impl JwksProvider {
    pub fn new(config: &JwksProviderConfig) -> Self {
        info!(
            "Creating JWKS provider '{}' with keys from {}",
            config.name, config.cert_uri
        );
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl Provider for JwksProvider {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    /// Decode the header, pick the key by `kid`, then validate signature and expiry.
    async fn authenticate(&self, token: &str) -> Result<User, String> {
        let header =
            decode_header(token).map_err(|e| format!("Failed to decode JWT header: {}", e))?;

        let alg = match header.alg {
            Algorithm::RS256 | Algorithm::RS512 => header.alg,
            _ => return Err(format!("Unsupported JWT algorithm: {:?}", header.alg)),
        };

        let kid = header.kid.ok_or("Missing 'kid' in JWT header")?;
        debug!("Using kid: {}", kid);

        let certs = get_certs(self.config.cert_uri.to_string()).await?;
        let jwks: JwkSet = serde_json::from_str(&certs)
            .map_err(|e| format!("Failed to parse certificates: {}", e))?;
        let jwk = jwks.find(&kid).ok_or(format!(
            "Failed to find certificate with matching kid {}",
            kid
        ))?;

        let decoding_key = DecodingKey::from_jwk(jwk)
            .map_err(|e| format!("Failed to create decoding key from JWK: {}", e))?;

        let mut validation = Validation::new(alg);
        validation.validate_aud = false;
        if let Some(iss) = &self.config.issuer {
            validation.set_issuer(&[iss]);
        }

        let decoded = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| format!("Failed to decode JWT: {}", e))?;

        Ok(User::new(decoded.claims.sub, self.config.name.clone()))
    }
}

/// Retrieves the key set from a remote URI. Cached for 600s to avoid repeated fetches.
#[cfg_attr(not(test), cached(time = 600, result = true))]
pub async fn get_certs(cert_uri: String) -> Result<String, String> {
    debug!("Fetching certificates from {}", cert_uri);
    let res = reqwest::get(&cert_uri)
        .await
        .map_err(|e| format!("Failed to download certificates: {}", e))?;

    if res.status().is_success() {
        let json: Value = res
            .json()
            .await
            .map_err(|e| format!("Failed to parse certificate JSON: {}", e))?;
        Ok(json.to_string())
    } else {
        Err(format!("Failed to download certificates: {}", res.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    const RSA_KEY: &str = include_str!("../../tests/fixtures/jwks_rsa_key.pem");
    const RSA_MODULUS: &str = "urE-yg2PX5wBfWEBW1wRR4VWcaRpopFO6LUYSjJSM4MI5bluy24ryMoPvb7URLAeiZsRAt5TycOVQnJhppme905HgsVfkCYGZzifD17wFP-cw_xy38BRxsPVjXyk0EOf7nX8LNZj2VuFlXvWrEUP_XjUUAlyxGJRmSDFVWIym5IFWM2zvY8iPfJAb8C0BdViIeWDW8YGRAYt1XDYLpDCq65pwb0Qnq2_XE_X363d9MzeYQyiHEsPAnuw1CMEhqujU08Vq3Vgv0HbkIaB7hWza0SQkXBFKL1tY_aZqfYa9y6IF3955FZ1J4UcGKbbH8dZkoxIYwZArgVkQaCIrGDfdw";

    fn jwks() -> String {
        json!({"keys": [{
            "kty": "RSA",
            "alg": "RS256",
            "use": "sig",
            "kid": "testkid",
            "n": RSA_MODULUS,
            "e": "AQAB"
        }]})
        .to_string()
    }

    fn config(url: &str) -> JwksProviderConfig {
        JwksProviderConfig {
            name: "TestJWKS".to_string(),
            cert_uri: url.to_string(),
            issuer: None,
        }
    }

    fn signed_token(kid: &str, claims: serde_json::Value) -> String {
        let mut header = jsonwebtoken::Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        jsonwebtoken::encode(
            &header,
            &claims,
            &jsonwebtoken::EncodingKey::from_rsa_pem(RSA_KEY.as_bytes()).unwrap(),
        )
        .expect("Failed to create token")
    }

    #[tokio::test]
    async fn test_get_certs_failure() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;
        let result = get_certs(server.url()).await;
        m.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected_before_fetch() {
        let provider = JwksProvider::new(&config("http://127.0.0.1:1"));
        assert!(provider.authenticate("invalid.token").await.is_err());
    }

    #[tokio::test]
    async fn test_valid_token_yields_subject() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(jwks())
            .create_async()
            .await;

        let provider = JwksProvider::new(&config(&server.url()));
        let token = signed_token("testkid", json!({"sub": "auth0|42", "exp": 4102444800usize}));

        let user = provider
            .authenticate(&token)
            .await
            .expect("Authentication should succeed");
        m.assert_async().await;
        assert_eq!(user.user_id, "auth0|42");
        assert_eq!(user.provider, "TestJWKS");
    }

    #[tokio::test]
    async fn test_unknown_kid_is_rejected() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(jwks())
            .create_async()
            .await;

        let provider = JwksProvider::new(&config(&server.url()));
        let token = signed_token("otherkid", json!({"sub": "auth0|42", "exp": 4102444800usize}));
        let err = provider.authenticate(&token).await.unwrap_err();
        assert!(err.contains("otherkid"));
    }

    #[tokio::test]
    async fn test_hmac_token_is_rejected() {
        let provider = JwksProvider::new(&config("http://127.0.0.1:1"));
        let mut header = jsonwebtoken::Header::new(Algorithm::HS512);
        header.kid = Some("testkid".to_string());
        let token = jsonwebtoken::encode(
            &header,
            &json!({"sub": "mallory", "exp": 4102444800usize}),
            &jsonwebtoken::EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let err = provider.authenticate(&token).await.unwrap_err();
        assert!(err.contains("Unsupported JWT algorithm"));
    }
}
