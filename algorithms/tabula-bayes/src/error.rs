use thiserror::Error;

/// Simplified `Result` using [`NaiveBayesError`](crate::NaiveBayesError) as error type
pub type Result<T> = std::result::Result<T, NaiveBayesError>;

/// Error variants from hyper-parameter construction or model estimation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NaiveBayesError {
    /// The name of the target attribute is empty
    #[error("the name of the target attribute is empty")]
    EmptyTarget,
    #[error(transparent)]
    BaseCrate(#[from] tabula::Error),
}
