use crate::constants::{
    API_KEY_VAR, API_URL_VAR, DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, MAX_TOKENS_VAR,
    MODEL_VAR,
};
use crate::error::ConfigError;

/// Settings for the completion service, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;

        let max_tokens = match lookup(MAX_TOKENS_VAR) {
            None => DEFAULT_MAX_TOKENS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidValue {
                        var: MAX_TOKENS_VAR,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        var: MAX_TOKENS_VAR,
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            api_key,
            api_url: lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
        })
    }
}
