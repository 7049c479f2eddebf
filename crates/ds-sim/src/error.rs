use ds_core::DsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] DsError),

    #[error("simulation configuration error: {0}")]
    Config(String),
}

impl SimError {
    /// `true` for caller mistakes such as deploying zero probes.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SimError::Core(DsError::InvalidArgument(_)))
    }
}

pub type SimResult<T> = Result<T, SimError>;
