use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::mongodb_store::MongoDBConfig;

/// The item-store backends. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreConfig {
    /// Process-local store, lost on restart.
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "mongo")]
    MongoDB(MongoDBConfig),
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Memory
    }
}
