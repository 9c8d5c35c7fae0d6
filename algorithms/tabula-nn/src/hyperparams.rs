use std::marker::PhantomData;

use tabula::{Float, ParamGuard};

use crate::{KnnClassifier, NnError};

/// A verified hyper-parameter set ready for the estimation of a k-nearest-neighbour classifier
///
/// See [`KnnParams`](crate::KnnParams) for more information.
#[derive(Clone, Debug, PartialEq)]
pub struct KnnValidParams<F> {
    target: String,
    k: usize,

    float_marker: PhantomData<F>,
}

impl<F: Float> KnnValidParams<F> {
    /// Name of the attribute to predict
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of neighbours which vote on a prediction
    pub fn k(&self) -> usize {
        self.k
    }
}

/// A hyper-parameter set during construction
///
/// Configures a k-nearest-neighbour classifier. The only parameter besides the target is the
/// number of neighbours `k`, which defaults to three.
///
/// ### Errors
///
/// The validation fails if `k` is zero or the target name is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct KnnParams<F>(KnnValidParams<F>);

impl<F: Float> KnnParams<F> {
    pub fn new<S: Into<String>>(target: S) -> Self {
        Self(KnnValidParams {
            target: target.into(),
            k: 3,
            float_marker: PhantomData,
        })
    }

    /// Sets the number of neighbours which vote on a prediction
    ///
    /// If `k` exceeds the number of training instances all of them vote.
    pub fn k(mut self, k: usize) -> Self {
        self.0.k = k;
        self
    }
}

impl<F: Float> KnnClassifier<F> {
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params<S: Into<String>>(target: S) -> KnnParams<F> {
        KnnParams::new(target)
    }
}

impl<F: Float> ParamGuard for KnnParams<F> {
    type Checked = KnnValidParams<F>;
    type Error = NnError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.k == 0 {
            Err(NnError::InvalidK)
        } else if self.0.target.is_empty() {
            Err(tabula::Error::Parameters("the name of the target attribute is empty".to_string()).into())
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}
