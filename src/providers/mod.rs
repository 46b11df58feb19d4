pub mod base;
pub mod jwks_provider;
pub mod secret_provider;

pub use base::{create_auth_provider, Provider, ProviderConfig};
