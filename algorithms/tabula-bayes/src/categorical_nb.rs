use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};
use ndarray::{Array1, Array2, Axis};
use ndarray_stats::QuantileExt;
use tabula::{
    dataset::{Dataset, Instance, Value},
    traits::{Fit, Predict},
    Float,
};

use crate::error::{NaiveBayesError, Result};
use crate::hyperparams::CategoricalNbValidParams;

/// Conditional probabilities of a single feature
#[derive(Debug, Clone, PartialEq)]
struct FeatureTable<F> {
    name: String,
    /// Categories in domain order, followed by observed values outside the domain
    values: Vec<String>,
    /// Probability of every value given a class, classes x values
    probabilities: Array2<F>,
}

impl<F: Float> FeatureTable<F> {
    fn position(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|x| x == value)
    }
}

/// Fitted categorical Naive Bayes classifier
///
/// Naive Bayes assumes that the features are conditionally independent given the class. The
/// posterior of a class is then proportional to its prior times the conditional probability of
/// every observed feature value:
///
/// ```text
/// ln P(c | x) = ln P(c) + sum_i ln P(x_i | c) + const
/// ```
///
/// Both factors are estimated by counting. With Laplace smoothing the prior of a class is
/// `(count + 1) / (N + classes)` and the conditional probability of a value is
/// `(joint + 1) / (class total + values)`, where the class total counts the instances of the
/// class with a present value for the feature. Without smoothing the plain ratios are used and
/// a class without instances has a conditional probability of zero.
///
/// The classes are the domain of the target attribute. The categories of a feature are the
/// domain of a discrete attribute, or the observed values rendered as text for a numeric one.
///
/// ### Prediction
///
/// Features absent from an instance are skipped. A value never seen during training has the
/// probability `1 / (values + 1)` with smoothing and zero without. A zero probability sets the
/// score of the class to negative infinity. The class with the highest score is predicted, the
/// first class in domain order wins ties. If every class scores negative infinity the class with
/// the highest prior is predicted.
///
/// ### Example
///
/// ```rust
/// use approx::assert_abs_diff_eq;
/// use tabula::prelude::*;
/// use tabula_bayes::{CategoricalNb, Result};
///
/// let dataset = tabula_datasets::weather_nominal();
/// let model = CategoricalNb::params("play").laplace(false).fit(&dataset)?;
///
/// assert_abs_diff_eq!(model.prior("yes").unwrap(), 9.0 / 14.0);
/// assert_abs_diff_eq!(
///     model.conditional_probability("no", "outlook", "sunny").unwrap(),
///     3.0 / 5.0
/// );
/// assert_abs_diff_eq!(
///     model.conditional_probability("yes", "outlook", "overcast").unwrap(),
///     4.0 / 9.0
/// );
/// # Result::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalNb<F> {
    target: String,
    laplace: bool,
    classes: Vec<String>,
    priors: Array1<F>,
    features: Vec<FeatureTable<F>>,
}

impl<F: Float> Fit<F, NaiveBayesError> for CategoricalNbValidParams<F> {
    type Object = CategoricalNb<F>;

    /// Estimates priors and conditional probabilities by counting
    ///
    /// Instances with a missing target are left out. Instances with a missing feature value are
    /// left out of the counts of that feature only.
    fn fit(&self, dataset: &Dataset<F>) -> Result<Self::Object> {
        let targets = dataset.targets(self.target())?;

        let rows = (0..dataset.nsamples())
            .filter(|idx| targets[*idx].is_some())
            .collect::<Vec<_>>();

        if rows.is_empty() {
            return Err(tabula::Error::NotEnoughSamples.into());
        }
        if rows.len() < dataset.nsamples() {
            warn!(
                "ignoring {} instances without a value for target {}",
                dataset.nsamples() - rows.len(),
                self.target()
            );
        }

        let classes = categories(
            dataset.domain(self.target()).unwrap_or(&[]),
            rows.iter().filter_map(|idx| targets[*idx].clone()),
        );
        // class of every training row
        let row_classes = rows
            .iter()
            .filter_map(|idx| targets[*idx].as_deref())
            .filter_map(|class| classes.iter().position(|x| x == class))
            .collect::<Vec<_>>();

        let mut class_count = Array1::<usize>::zeros(classes.len());
        for class in &row_classes {
            class_count[*class] += 1;
        }

        let nsamples = F::cast(rows.len());
        let nclasses = F::cast(classes.len());
        let priors = class_count.mapv(|count| {
            let count = F::cast(count);
            if self.laplace() {
                (count + F::one()) / (nsamples + nclasses)
            } else {
                count / nsamples
            }
        });

        let features = dataset
            .feature_indices(self.target())
            .into_iter()
            .map(|idx| {
                let column = dataset.column(idx);
                let values = categories(
                    dataset.domain_at(idx).unwrap_or(&[]),
                    rows.iter()
                        .filter_map(|row| column.category(*row))
                        .map(|x| x.into_owned()),
                );

                let mut joint = Array2::<usize>::zeros((classes.len(), values.len()));
                for (row, class) in rows.iter().zip(row_classes.iter()) {
                    if let Some(value) = column.category(*row) {
                        if let Some(pos) = values.iter().position(|x| *x == value) {
                            joint[(*class, pos)] += 1;
                        }
                    }
                }

                let totals = joint.sum_axis(Axis(1));
                let nvalues = F::cast(values.len());
                let probabilities = Array2::from_shape_fn(joint.dim(), |(class, pos)| {
                    let count = F::cast(joint[(class, pos)]);
                    let total = F::cast(totals[class]);
                    if self.laplace() {
                        (count + F::one()) / (total + nvalues)
                    } else if totals[class] == 0 {
                        F::zero()
                    } else {
                        count / total
                    }
                });

                FeatureTable {
                    name: dataset.attributes()[idx].name().to_string(),
                    values,
                    probabilities,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "estimated {} classes from {} instances with {} features, class counts {:?}",
            classes.len(),
            rows.len(),
            features.len(),
            class_count.to_vec()
        );

        Ok(CategoricalNb {
            target: self.target().to_string(),
            laplace: self.laplace(),
            classes,
            priors,
            features,
        })
    }
}

impl<F: Float> CategoricalNb<F> {
    /// Name of the predicted attribute
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether the probabilities were estimated with Laplace smoothing
    pub fn laplace(&self) -> bool {
        self.laplace
    }

    /// Class labels in the order used by [`joint_log_likelihood`](Self::joint_log_likelihood)
    /// and [`predict_proba`](Self::predict_proba)
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Names of the features in declaration order
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|x| x.name.as_str())
    }

    /// Prior probability of a class, `None` for unknown classes
    pub fn prior(&self, class: &str) -> Option<F> {
        self.class_index(class).map(|idx| self.priors[idx])
    }

    /// Probability of `value` for `feature` given `class`
    ///
    /// Returns `None` if the class, the feature or the value was not part of the training data.
    pub fn conditional_probability(&self, class: &str, feature: &str, value: &str) -> Option<F> {
        let class = self.class_index(class)?;
        let feature = self.features.iter().find(|x| x.name == feature)?;
        let pos = feature.position(value)?;

        Some(feature.probabilities[(class, pos)])
    }

    /// Compute the unnormalized posterior log probability of every class
    ///
    /// Classes with a zero probability factor have a score of negative infinity.
    pub fn joint_log_likelihood(&self, instance: &Instance<F>) -> Array1<F> {
        let values = self
            .features
            .iter()
            .map(|feature| instance.get(&feature.name).map(Value::category))
            .collect::<Vec<_>>();

        Array1::from_shape_fn(self.classes.len(), |class| {
            let prior = self.priors[class];
            if prior <= F::zero() {
                return F::neg_infinity();
            }

            let mut score = prior.ln();
            for (feature, value) in self.features.iter().zip(values.iter()) {
                let value = match value {
                    Some(value) => value,
                    None => continue,
                };

                let prob = match feature.position(value) {
                    Some(pos) => feature.probabilities[(class, pos)],
                    None if self.laplace => F::one() / F::cast(feature.values.len() + 1),
                    None => F::zero(),
                };

                if prob <= F::zero() {
                    return F::neg_infinity();
                }
                score += prob.ln();
            }

            score
        })
    }

    /// Compute the posterior probability of every class
    ///
    /// The probabilities are normalized to sum to one. If every class has a score of negative
    /// infinity all probabilities are zero.
    pub fn predict_proba(&self, instance: &Instance<F>) -> Array1<F> {
        let jll = self.joint_log_likelihood(instance);

        let max = match jll.max() {
            Ok(max) if max.is_finite() => *max,
            _ => return Array1::zeros(jll.len()),
        };

        // log-sum-exp, shifted by the maximum
        let probs = jll.mapv(|x| (x - max).exp());
        let sum = probs.sum();
        probs / sum
    }

    fn class_index(&self, class: &str) -> Option<usize> {
        self.classes.iter().position(|x| x == class)
    }
}

impl<F: Float> Predict<F> for CategoricalNb<F> {
    fn predict(&self, instance: &Instance<F>) -> String {
        let jll = self.joint_log_likelihood(instance);

        let best = if jll.iter().all(|x| x.is_infinite() && x.is_sign_negative()) {
            // no class explains the instance, fall back to the most frequent one
            self.priors.argmax()
        } else {
            jll.argmax()
        };

        best.ok()
            .and_then(|idx| self.classes.get(idx))
            .cloned()
            .unwrap_or_default()
    }
}

impl<F: Float> fmt::Display for CategoricalNb<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "=== Naive Bayes model for {} ===", self.target)?;
        writeln!(f)?;
        writeln!(f, "Prior probabilities:")?;
        for (class, prior) in self.classes.iter().zip(self.priors.iter()) {
            writeln!(f, "  P({}) = {:.4}", class, prior)?;
        }

        writeln!(f)?;
        writeln!(f, "Conditional probabilities:")?;
        for feature in &self.features {
            let mut order = (0..feature.values.len()).collect::<Vec<_>>();
            order.sort_by(|a, b| feature.values[*a].cmp(&feature.values[*b]));

            writeln!(f)?;
            writeln!(f, "feature: {}", feature.name)?;
            for (class_idx, class) in self.classes.iter().enumerate() {
                writeln!(f, "  class: {}", class)?;
                for pos in &order {
                    writeln!(
                        f,
                        "    P({}|{}) = {:.4}",
                        feature.values[*pos],
                        class,
                        feature.probabilities[(class_idx, *pos)]
                    )?;
                }
            }
        }

        Ok(())
    }
}

/// Domain values followed by observed values outside the domain, in first-seen order
fn categories<I: Iterator<Item = String>>(domain: &[String], observed: I) -> Vec<String> {
    let mut seen = domain.iter().cloned().collect::<HashSet<_>>();
    let mut values = domain.to_vec();

    for value in observed {
        if seen.insert(value.clone()) {
            values.push(value);
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use tabula::dataset::{Attribute, DatasetBuilder};
    use tabula::ParamGuard;

    fn fruit() -> Dataset<f64> {
        let mut builder = DatasetBuilder::new();
        builder
            .add_attribute(Attribute::discrete("colour", vec!["red", "yellow", "green"]))
            .unwrap();
        builder.add_attribute(Attribute::numeric("weight")).unwrap();
        builder
            .add_attribute(Attribute::discrete("fruit", vec!["apple", "banana", "cherry"]))
            .unwrap();

        let rows = vec![
            (Some("red"), Some(150.0), Some("apple")),
            (Some("green"), Some(150.0), Some("apple")),
            (Some("red"), Some(120.0), Some("apple")),
            (Some("yellow"), Some(120.0), Some("banana")),
            (None, Some(130.0), Some("banana")),
            (Some("yellow"), None, None),
        ];
        for (colour, weight, fruit) in rows {
            builder
                .add_row(vec![
                    colour.map(Value::from),
                    weight.map(Value::numeric),
                    fruit.map(Value::from),
                ])
                .unwrap();
        }

        builder.build()
    }

    #[test]
    fn smoothed_estimates() -> Result<()> {
        let model = CategoricalNb::params("fruit").fit(&fruit())?;

        assert_eq!(model.classes(), &["apple", "banana", "cherry"]);
        // five labelled instances and three classes
        assert_abs_diff_eq!(model.prior("apple").unwrap(), 4.0 / 8.0);
        assert_abs_diff_eq!(model.prior("banana").unwrap(), 3.0 / 8.0);
        assert_abs_diff_eq!(model.prior("cherry").unwrap(), 1.0 / 8.0);

        // one banana has no colour, the class total is one
        assert_abs_diff_eq!(
            model.conditional_probability("banana", "colour", "yellow").unwrap(),
            2.0 / 4.0
        );
        assert_abs_diff_eq!(
            model.conditional_probability("apple", "colour", "red").unwrap(),
            3.0 / 6.0
        );
        assert_abs_diff_eq!(
            model.conditional_probability("cherry", "colour", "red").unwrap(),
            1.0 / 3.0
        );

        // numeric values are categories of their own
        assert_abs_diff_eq!(
            model.conditional_probability("apple", "weight", "150").unwrap(),
            3.0 / 6.0
        );

        Ok(())
    }

    #[test]
    fn smoothed_probabilities_are_positive() -> Result<()> {
        let model = CategoricalNb::params("fruit").fit(&fruit())?;

        for class in model.classes() {
            let prior = model.prior(class).unwrap();
            assert!(prior > 0.0 && prior <= 1.0);

            for feature in &model.features {
                for value in &feature.values {
                    let prob = model
                        .conditional_probability(class, &feature.name, value)
                        .unwrap();
                    assert!(prob > 0.0 && prob <= 1.0);
                }
            }
        }

        Ok(())
    }

    #[test]
    fn conditional_probabilities_sum_to_one() -> Result<()> {
        for laplace in &[true, false] {
            let model = CategoricalNb::params("fruit")
                .laplace(*laplace)
                .fit(&fruit())?;

            for feature in &model.features {
                for (class, row) in feature.probabilities.outer_iter().enumerate() {
                    // without smoothing a class without instances has no distribution
                    if !laplace && model.classes()[class] == "cherry" {
                        assert_abs_diff_eq!(row.sum(), 0.0);
                    } else {
                        assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
                    }
                }
            }
        }

        Ok(())
    }

    #[test]
    fn empty_class_is_never_predicted_without_smoothing() -> Result<()> {
        let dataset = fruit();
        let model = CategoricalNb::params("fruit").laplace(false).fit(&dataset)?;

        assert_abs_diff_eq!(model.prior("cherry").unwrap(), 0.0);
        assert_abs_diff_eq!(
            model.conditional_probability("cherry", "colour", "red").unwrap(),
            0.0
        );

        let queries = vec![
            Instance::new(),
            Instance::new().with("colour", "red"),
            Instance::new().with("colour", "purple"),
            Instance::new()
                .with("colour", "yellow")
                .with("weight", Value::numeric(150.0)),
        ];
        for query in &queries {
            assert_ne!(model.predict(query), "cherry");
        }

        Ok(())
    }

    #[test]
    fn unseen_values() -> Result<()> {
        let dataset = fruit();
        let query = Instance::new().with("colour", "purple");

        // smoothing floor of 1 / (values + 1)
        let model = CategoricalNb::params("fruit").fit(&dataset)?;
        let jll = model.joint_log_likelihood(&query);
        assert_abs_diff_eq!(jll[0], (0.5f64).ln() + (0.25f64).ln(), epsilon = 1e-12);

        // exact zero without smoothing
        let model = CategoricalNb::params("fruit").laplace(false).fit(&dataset)?;
        let jll = model.joint_log_likelihood(&query);
        assert!(jll.iter().all(|x| *x == f64::NEG_INFINITY));
        assert_abs_diff_eq!(model.predict_proba(&query).sum(), 0.0);
        // falls back to the largest prior
        assert_eq!(model.predict(&query), "apple");

        Ok(())
    }

    #[test]
    fn posteriors_are_normalized() -> Result<()> {
        let model = CategoricalNb::params("fruit").fit(&fruit())?;
        let query = Instance::new()
            .with("colour", "yellow")
            .with("weight", Value::numeric(120.0));

        let proba = model.predict_proba(&query);
        assert_abs_diff_eq!(proba.sum(), 1.0, epsilon = 1e-12);
        assert_eq!(model.predict(&query), "banana");
        assert_eq!(proba.argmax().unwrap(), 1);

        Ok(())
    }

    #[test]
    fn ties_go_to_first_class() -> Result<()> {
        let mut builder = DatasetBuilder::<f64>::new();
        builder.add_attribute(Attribute::discrete_inferred("x"))?;
        builder.add_attribute(Attribute::discrete_inferred("class"))?;
        builder.add_row(vec![Some("a".into()), Some("second".into())])?;
        builder.add_row(vec![Some("a".into()), Some("first".into())])?;
        let dataset = builder.build();

        let model = CategoricalNb::params("class").fit(&dataset)?;
        assert_eq!(model.predict(&Instance::new().with("x", "a")), "second");

        Ok(())
    }

    #[test]
    fn parameter_dump() -> Result<()> {
        let model = CategoricalNb::params("fruit").fit(&fruit())?;
        let dump = model.to_string();

        assert!(dump.contains("  P(apple) = 0.5000\n"));
        assert!(dump.contains("feature: weight\n  class: apple\n    P(120|apple) = 0.3333\n"));

        Ok(())
    }

    #[test]
    fn invalid_parameters() {
        let dataset = fruit();

        assert_eq!(
            CategoricalNb::<f64>::params("").check(),
            Err(NaiveBayesError::EmptyTarget)
        );
        assert_eq!(
            CategoricalNb::params("weight").fit(&dataset),
            Err(NaiveBayesError::BaseCrate(tabula::Error::NumericAttribute(
                "weight".into()
            )))
        );
    }
}
