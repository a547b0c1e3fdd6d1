use thiserror::Error;

use healthplex_core::CoreError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
