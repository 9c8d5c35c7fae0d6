//! Error types in tabula
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("unknown attribute {0}")]
    UnknownAttribute(String),
    #[error("attribute {0} is numeric, only discrete attributes are supported here")]
    NumericAttribute(String),
    #[error("attribute {0} is declared twice")]
    DuplicateAttribute(String),
    #[error("row has {got} values, but {expected} attributes are declared")]
    RowLength { expected: usize, got: usize },
    #[error("value for attribute {0} does not match its declared kind")]
    ValueKind(String),
    #[error("value for attribute {0} is not a finite number")]
    NonFiniteValue(String),
    #[error("mismatched shapes: {0} predictions for {1} targets")]
    MismatchedShapes(usize, usize),
    #[error("not enough samples")]
    NotEnoughSamples,
}
