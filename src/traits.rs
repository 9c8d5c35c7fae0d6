//! Provide traits for different classes of algorithms
//!

use crate::dataset::{Dataset, Float, Instance};

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For the
/// classifiers in this toolkit the name of the target attribute is part of the hyperparameters,
/// the remaining attributes are the features.
pub trait Fit<F: Float, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &Dataset<F>) -> Result<Self::Object, E>;
}

/// Predict the class label of an instance
///
/// Prediction is total: missing or unseen values are resolved by the fallback policy of the
/// respective model and never result in an error.
pub trait Predict<F: Float> {
    fn predict(&self, instance: &Instance<F>) -> String;

    /// Predicts every instance of a dataset, in index order
    fn predict_dataset(&self, dataset: &Dataset<F>) -> Vec<String> {
        dataset
            .instances()
            .map(|instance| self.predict(&instance))
            .collect()
    }
}
