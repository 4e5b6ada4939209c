use shared::errors::HttpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Http(HttpError::NotFound(_)))
    }

    pub fn http(&self) -> Option<&HttpError> {
        match self {
            ClientError::Http(err) => Some(err),
            _ => None,
        }
    }
}
