use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("publish error: {0}")]
    Publish(String),
}
