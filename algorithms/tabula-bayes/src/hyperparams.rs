use std::marker::PhantomData;

use tabula::{Float, ParamGuard};

use crate::{CategoricalNb, NaiveBayesError};

/// A verified hyper-parameter set ready for the estimation of a categorical Naive Bayes model
///
/// See [`CategoricalNbParams`](crate::CategoricalNbParams) for more informations.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalNbValidParams<F> {
    target: String,
    laplace: bool,

    float_marker: PhantomData<F>,
}

impl<F: Float> CategoricalNbValidParams<F> {
    /// Name of the attribute to predict
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether add-one smoothing is applied to priors and conditional probabilities
    pub fn laplace(&self) -> bool {
        self.laplace
    }
}

/// A hyper-parameter set during construction
///
/// The parameter set can be verified into a
/// [`CategoricalNbValidParams`](crate::CategoricalNbValidParams) by calling
/// [ParamGuard::check](tabula::ParamGuard::check). It is also possible to directly fit a model
/// with [Fit::fit](tabula::traits::Fit::fit) which implicitely verifies the parameter set prior
/// to the model estimation and forwards any error.
///
/// # Parameters
///
/// | Name | Default | Purpose |
/// | :--- | :--- | :--- |
/// | [laplace](Self::laplace) | `true` | Add-one smoothing. Keeps unseen feature/class combinations from forcing a probability of zero |
///
/// # Errors
///
/// Returns [`EmptyTarget`](NaiveBayesError::EmptyTarget) if the name of the target is empty.
///
/// # Example
///
/// ```rust
/// use tabula::prelude::*;
/// use tabula_bayes::{CategoricalNb, Result};
///
/// let dataset = tabula_datasets::weather_nominal();
/// let model = CategoricalNb::params("play").laplace(true).fit(&dataset)?;
///
/// let day = Instance::new()
///     .with("outlook", "sunny")
///     .with("temperature", "cool")
///     .with("humidity", "high")
///     .with("windy", "TRUE");
/// assert_eq!(model.predict(&day), "no");
/// # Result::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalNbParams<F>(CategoricalNbValidParams<F>);

impl<F: Float> CategoricalNbParams<F> {
    /// Create new [CategoricalNbParams] set with default values for its parameters
    pub fn new<S: Into<String>>(target: S) -> Self {
        Self(CategoricalNbValidParams {
            target: target.into(),
            laplace: true,
            float_marker: PhantomData,
        })
    }

    /// Enables or disables add-one smoothing
    pub fn laplace(mut self, laplace: bool) -> Self {
        self.0.laplace = laplace;
        self
    }
}

impl<F: Float> CategoricalNb<F> {
    /// Construct a new set of hyperparameters for the attribute `target`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params<S: Into<String>>(target: S) -> CategoricalNbParams<F> {
        CategoricalNbParams::new(target)
    }
}

impl<F: Float> ParamGuard for CategoricalNbParams<F> {
    type Checked = CategoricalNbValidParams<F>;
    type Error = NaiveBayesError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.target.is_empty() {
            Err(NaiveBayesError::EmptyTarget)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}
