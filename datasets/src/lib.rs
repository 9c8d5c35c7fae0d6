//! `tabula-datasets` reads ARFF documents into a [`tabula::Dataset`] and bundles a few small
//! datasets ready to be used in tests and examples.
//!
//! ## Current State
//!
//! Currently the following datasets are provided:
//!
//! * `["weather"]` : the play-tennis weather data, once with nominal attributes only and once with
//!   numeric temperature and humidity
//!
//! ## Using a dataset
//!
//! Enable the corresponding feature in your Cargo.toml:
//! ```ignore
//! tabula-datasets = { version = "0.1.0", features = ["weather"] }
//! ```
//! and then use it in your example or tests as
//! ```ignore
//! let (train, valid) = tabula_datasets::weather_nominal()
//!     .split_with_ratio(0.8);
//! ```

mod arff;

pub use arff::{from_reader, parse_arff, read_arff, ArffError, Result};

#[cfg(feature = "weather")]
use tabula::Dataset;

#[cfg(feature = "weather")]
/// Play-tennis weather data with 14 instances and five discrete attributes
///
/// The attributes are `outlook`, `temperature`, `humidity`, `windy` and the class `play`.
pub fn weather_nominal() -> Dataset<f64> {
    parse_arff(include_str!("../data/weather.nominal.arff")).unwrap()
}

#[cfg(feature = "weather")]
/// Play-tennis weather data with numeric `temperature` and `humidity`
pub fn weather_numeric() -> Dataset<f64> {
    parse_arff(include_str!("../data/weather.numeric.arff")).unwrap()
}
