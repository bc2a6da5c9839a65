use thiserror::Error;

pub type LandingResult<T> = Result<T, LandingError>;

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("missing binding: {0}")]
    MissingBinding(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("media playback failed: {0}")]
    Playback(String),

    #[error("dom operation failed: {0}")]
    Dom(String),

    #[error("config format error: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}
