use thiserror::Error;

use healthplex_core::CoreError;
use healthplex_instruments::error::InstrumentError;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid form data: {0}")]
    Field(#[from] CoreError),

    #[error("scoring failed: {0}")]
    Scoring(#[from] InstrumentError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
