use thiserror::Error;

/// Errors produced by the recommender.
///
/// Ranking calls only ever surface `NotFound`; the cart parser returns
/// `MalformedCart`, which the cart entry point turns into the random fallback.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RecommendError {
    /// Target item id does not resolve in the catalog snapshot.
    #[error("product not found: {0}")]
    NotFound(String),

    /// Cart payload is not a JSON array of ids.
    #[error("malformed cart input: {0}")]
    MalformedCart(String),

    /// Catalog snapshot could not be decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Invalid configuration override.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cbor error: {0}")]
    Cbor(#[from] serde_cbor::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
