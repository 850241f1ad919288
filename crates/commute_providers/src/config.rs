use thiserror::Error;

pub const API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const ROUTE_ENDPOINT_ENV_VAR: &str = "COMMUTE_ROUTE_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVariable(&'static str),
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    /// `/api/route` URL used for primary routing instead of the Routes API
    pub route_endpoint: Option<String>,
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVariable(API_KEY_ENV_VAR))?;

        let route_endpoint =
            lookup(ROUTE_ENDPOINT_ENV_VAR).filter(|endpoint| !endpoint.trim().is_empty());

        Ok(Self {
            api_key,
            route_endpoint,
        })
    }
}
