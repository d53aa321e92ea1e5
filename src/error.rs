use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to parse chart configuration: {0}")]
    ConfigParse(String),

    #[error("malformed cross-window message: {0}")]
    MalformedMessage(String),

    #[error("invalid lifecycle transition: {0}")]
    Lifecycle(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
