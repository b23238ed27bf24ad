use thiserror::Error;

/// Startup misconfiguration. Always fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API Key for Groq is missing. Set {0} in the environment or a .env file.")]
    MissingApiKey(&'static str),

    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Height must be between {min} and {max} cm, got {value}")]
    HeightOutOfRange { value: u16, min: u16, max: u16 },

    #[error("Weight must be between {min} and {max} kg, got {value}")]
    WeightOutOfRange { value: u16, min: u16, max: u16 },
}

/// Failure of a single completion call. The pipeline reports every variant
/// the same way; the distinction exists for logs and tests.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request to completion service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }
}
