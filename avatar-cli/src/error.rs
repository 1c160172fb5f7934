use data_error::AvatarError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InlineParamsParseError {
    #[error("Invalid parameter {0:?}: expected name=value")]
    InvalidKeyValPair(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't retrieve home directory!")]
    HomeDirNotFound,

    #[error("Couldn't load config: {0}")]
    ConfigLoadError(String),

    #[error("Could not open profile storage: {0}")]
    StorageOpenError(String),

    #[error("No avatar saved for user {0}")]
    AvatarNotFound(String),

    #[error("Could not read image: {0}")]
    ImageReadError(String),

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    AvatarError(#[from] AvatarError),

    #[error(transparent)]
    InlineParamsParseError(#[from] InlineParamsParseError),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}
