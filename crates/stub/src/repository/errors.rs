use shared::errors::HttpError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => HttpError::NotFound(format!("{what} not found")),
            RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
        }
    }
}
