use std::marker::PhantomData;

use tabula::{
    error::{Error, Result},
    Float, ParamGuard,
};

use crate::DecisionTree;

/// The set of hyperparameters that can be specified for fitting a
/// [decision tree](struct.DecisionTree.html).
///
/// ### Example
///
/// ```rust
/// use tabula::prelude::*;
/// use tabula::metrics::ToConfusionMatrix;
/// use tabula_trees::DecisionTree;
///
/// // Initialize the default set of parameters, `play` is the attribute to predict
/// let params = DecisionTree::params("play");
/// // Set the parameters to the desired values
/// let params = params.max_depth(5).min_samples(2);
///
/// // Load the data
/// let dataset = tabula_datasets::weather_nominal();
/// // Fit the decision tree on the training data
/// let tree = params.fit(&dataset).unwrap();
/// // Predict on the training data and check accuracy
/// let accuracy = tree
///     .predict_dataset(&dataset)
///     .confusion_matrix(dataset.targets("play").unwrap())
///     .unwrap()
///     .accuracy();
/// assert!(accuracy > 0.99);
/// ```
///
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTreeValidParams<F> {
    target: String,
    max_depth: usize,
    min_samples: usize,

    float_marker: PhantomData<F>,
}

impl<F: Float> DecisionTreeValidParams<F> {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTreeParams<F>(DecisionTreeValidParams<F>);

impl<F: Float> DecisionTreeParams<F> {
    pub fn new<S: Into<String>>(target: S) -> Self {
        Self(DecisionTreeValidParams {
            target: target.into(),
            max_depth: 10,
            min_samples: 5,
            float_marker: PhantomData,
        })
    }

    /// Sets the depth at which every node becomes a leaf, the root has depth zero
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.0.max_depth = max_depth;
        self
    }

    /// Sets the minimum number of instances a node needs to be split further
    pub fn min_samples(mut self, min_samples: usize) -> Self {
        self.0.min_samples = min_samples;
        self
    }
}

impl<F: Float> DecisionTree<F> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `max_depth = 10`
    /// * `min_samples = 5`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params<S: Into<String>>(target: S) -> DecisionTreeParams<F> {
        DecisionTreeParams::new(target)
    }
}

impl<F: Float> ParamGuard for DecisionTreeParams<F> {
    type Checked = DecisionTreeValidParams<F>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.target.is_empty() {
            Err(Error::Parameters(
                "the name of the target attribute is empty".to_string(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
