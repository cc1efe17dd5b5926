//! Error types shared by the playback engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// Selection parameters point at content that does not exist.
    #[error("content not found: {0}")]
    ContentNotFound(String),

    /// The content source failed to deliver chapter, verse or timing data.
    #[error("failed to fetch {what}: {reason}")]
    Fetch { what: String, reason: String },

    /// The audio primitive refused to start.
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PlayerError {
    pub fn fetch(what: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// Short message for the empty/error screens.
    pub fn user_message(&self) -> String {
        match self {
            Self::ContentNotFound(what) => format!("Nothing to show for {}.", what),
            Self::Fetch { what, .. } => format!("Could not load {}. Press 't' to retry.", what),
            Self::PlaybackRejected(_) => "Audio could not start. Press space to try again.".to_string(),
            Self::InvalidSelection(reason) => format!("Invalid selection: {}", reason),
            other => format!("Error: {}", other),
        }
    }

    /// Whether fetching again can reasonably succeed. A rejected start is
    /// retried in place with play/pause instead.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Io(_))
    }
}
