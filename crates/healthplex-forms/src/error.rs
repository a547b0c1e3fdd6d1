use std::path::PathBuf;

use thiserror::Error;

use healthplex_core::CoreError;
use healthplex_export::ExportError;
use healthplex_payload::PayloadError;

#[derive(Debug, Error)]
pub enum FormsError {
    #[error("no config directory found")]
    NoConfigDir,

    #[error("failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error(
        "config_version {found} is newer than this build supports ({supported}). \
         Please update healthplex-forms."
    )]
    ConfigVersion { found: u32, supported: u32 },

    #[error("draft storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Field(#[from] CoreError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Why a webhook submission failed. The display text is shown to the user.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Webhook URL not configured. Please update the forms configuration")]
    NotConfigured,

    #[error("Request timed out. Please check your internet connection and try again.")]
    Timeout,

    /// Non-2xx response; `message` is the start of the response body or a
    /// generic status line.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Payload(#[from] PayloadError),
}
