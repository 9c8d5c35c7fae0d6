//! `tabula` is a small toolkit of classical classifiers for tabular data.
//!
//! Datasets follow the ARFF model: a list of named attributes, each either numeric or discrete
//! with an enumerated value domain, and one row of possibly missing values per instance. This
//! crate holds the shared pieces every learner builds on:
//!
//! * the [`Dataset`](dataset::Dataset) with its column storage and derived statistics
//! * the [`Fit`](traits::Fit) and [`Predict`](traits::Predict) traits
//! * checked hyperparameters with [`ParamGuard`]
//! * evaluation of predictions with a [`ConfusionMatrix`](metrics::ConfusionMatrix)
//!
//! The learners live in their own crates:
//!
//! | Name | Purpose |
//! | :--- | :--- |
//! | `tabula-trees` | ID3 decision trees with pre-pruning |
//! | `tabula-nn` | k-nearest-neighbour classification with a mixed distance |
//! | `tabula-bayes` | categorical Naive Bayes with optional Laplace smoothing |
//! | `tabula-datasets` | ARFF reader and bundled sample datasets |
//!

pub mod benchmarks;
pub mod dataset;
pub mod error;
mod metrics_classification;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, Float, Instance, Value};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{ConfusionMatrix, ToConfusionMatrix};
}
