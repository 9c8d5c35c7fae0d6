use thiserror::Error;

pub type Result<T> = std::result::Result<T, NnError>;

/// Error variants from hyper-parameter construction or model estimation
#[derive(Error, Debug)]
pub enum NnError {
    #[error("k must be at least one")]
    InvalidK,
    #[error(transparent)]
    BaseCrate(#[from] tabula::Error),
}
