//! # Nearest neighbour classification
//!
//! `tabula-nn` classifies an instance by a majority vote among the `k` training instances closest
//! to it. Instances mix numeric and discrete attributes, so the distance combines both:
//!
//! * numeric attributes are min-max scaled to `[0, 1]` with the training statistics and
//!   contribute their squared difference
//! * discrete attributes contribute zero if both values are present and equal, one otherwise
//!
//! The distance is the square root of the summed contributions. See [`MixedDistance`] for the
//! handling of missing values.
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//! use tabula_nn::KnnClassifier;
//!
//! let dataset = tabula_datasets::weather_numeric();
//! let model = KnnClassifier::params("play").k(3).fit(&dataset).unwrap();
//!
//! let day = Instance::new()
//!     .with("outlook", "overcast")
//!     .with("temperature", Value::numeric(70.0))
//!     .with("humidity", Value::numeric(80.0))
//!     .with("windy", "FALSE");
//! assert_eq!(model.predict(&day), "yes");
//! ```

mod algorithm;
pub mod distance;
mod error;
mod hyperparams;

pub use algorithm::*;
pub use distance::{Distance, MixedDistance, Point};
pub use error::{NnError, Result};
pub use hyperparams::*;
