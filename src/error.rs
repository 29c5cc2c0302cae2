use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid mesh asset: {0}")]
    InvalidMesh(String),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Stored value for {key} is not an integer: {value}")]
    NotAnInteger { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
