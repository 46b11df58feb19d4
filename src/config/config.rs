use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::attachments::AttachmentsConfig;
use super::logging::LoggingConfig;
use super::store::StoreConfig;
use crate::providers::ProviderConfig;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "TODOAPP_CONFIG";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub store: StoreConfig,
    pub attachments: AttachmentsConfig,
}

/// Settings for the bearer-token provider chain.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct AuthConfig {
    /// Upper bound for a single provider's token check.
    pub timeout_in_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            timeout_in_ms: 3000,
        }
    }
}

/// Build the figment for `path`, with `TODOAPP_*` environment variables layered on top.
/// Nested keys use `__`, e.g. `TODOAPP_ATTACHMENTS__BUCKET`.
pub fn figment(path: &str) -> Figment {
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed("TODOAPP_").ignore(&["CONFIG"]).split("__"))
}

/// Extract a `ConfigV1` from any figment, unwrapping the version tag.
pub fn extract_config(figment: &Figment) -> Result<ConfigV1, String> {
    match figment.extract::<Config>() {
        Ok(Config::ConfigV1(c)) => Ok(c),
        Err(e) => Err(format!("Error loading configuration: {}", e)),
    }
}

/// Load config from the file named by `TODOAPP_CONFIG`, or "config.yaml" in the current directory.
pub fn load_config() -> Result<ConfigV1, String> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    extract_config(&figment(&path))
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), String> {
    let schema = schema_for!(Config);
    let text = serde_json::to_string_pretty(&schema).map_err(|e| e.to_string())?;
    println!("{}", text);
    Ok(())
}
