use thiserror::Error;

pub type Result<T> = std::result::Result<T, AvatarError>;

#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Parsing error")]
    Parse,
    #[error("Storage error: {0} {1}")]
    Storage(String, String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AvatarError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}

impl From<toml::de::Error> for AvatarError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for AvatarError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Config(e.to_string())
    }
}
