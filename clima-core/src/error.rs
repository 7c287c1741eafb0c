use reqwest::StatusCode;
use thiserror::Error;

/// Shown when an error carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Erro ao buscar dados do clima";

/// Failures of the geocoding or forecast calls.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Cidade não encontrada")]
    NotFound,

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Request failed with status code {}", .status.as_u16())]
    Status { status: StatusCode },

    #[error("{0}")]
    Malformed(String),
}

/// Coarse classification of a [`LookupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NetworkOrUpstream,
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::NetworkOrUpstream,
        }
    }

    /// Text to put on screen for this error.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            msg
        }
    }
}

/// Failures of the durable key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
