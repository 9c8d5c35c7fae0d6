//! # Naive Bayes
//!
//! `tabula-bayes` implements a Naive Bayes classifier for categorical attributes. Every
//! attribute except the target is treated as a set of opaque categories, numeric values
//! included. Class priors and per-class conditional probabilities are estimated by counting,
//! optionally with Laplace (add-one) smoothing, and an instance is assigned the class with the
//! highest sum of log-probabilities.

mod categorical_nb;
mod error;
mod hyperparams;

pub use categorical_nb::CategoricalNb;
pub use error::{NaiveBayesError, Result};
pub use hyperparams::{CategoricalNbParams, CategoricalNbValidParams};
