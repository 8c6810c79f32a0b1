use thiserror::Error;

/// Errors raised while reading card input.
///
/// None of these cross the icon/format contract: callers of those get `None`
/// or a passthrough string. They surface only from config parsing and the
/// presenter, and are always logged before being degraded.
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid card config: {0}")]
    Config(String),

    #[error("malformed entity: {0}")]
    MalformedEntity(String),
}

pub type Result<T, E = PresentError> = std::result::Result<T, E>;
