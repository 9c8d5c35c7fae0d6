use log::{debug, warn};
use ndarray::{Array1, Array2};
use noisy_float::{checkers::NumChecker, NoisyFloat};
use tabula::{
    dataset::{AttributeKind, Column, Dataset, Instance, LabelCounts, NumericStats},
    traits::{Fit, Predict},
    Float,
};

use crate::distance::{Distance, MixedDistance, NormalizedInstance, Point};
use crate::{KnnValidParams, NnError, Result};

type SortKey<F> = NoisyFloat<F, NumChecker>;

/// Position of a non-target attribute within the normalized matrices
#[derive(Debug, Clone, PartialEq)]
struct Slot {
    name: String,
    kind: AttributeKind,
    column: usize,
}

/// Fitted k-nearest-neighbour classifier
///
/// The model keeps a normalized copy of the training instances. Numeric attributes are scaled to
/// `[0, 1]` with the minimum and maximum of the training data, a missing numeric value is placed
/// at the midpoint `0.5` and so is every value of an attribute whose minimum equals its maximum.
/// Numeric attributes without a single observed value stay missing. Discrete values are kept as
/// they are.
///
/// Predictions scan every training instance, rank them by [`MixedDistance`] and return the
/// majority class of the `k` closest ones. Instances with the same distance are ranked in
/// training order, and if the vote is tied the class of the closer neighbour wins.
#[derive(Debug, Clone, PartialEq)]
pub struct KnnClassifier<F> {
    k: usize,
    target: String,
    slots: Vec<Slot>,
    stats: Vec<Option<NumericStats<F>>>,
    numeric: Array2<Option<F>>,
    discrete: Array2<Option<String>>,
    labels: Vec<String>,
}

impl<F: Float> Fit<F, NnError> for KnnValidParams<F> {
    type Object = KnnClassifier<F>;

    /// Snapshots the normalized training instances
    ///
    /// Instances with a missing target are left out.
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

        let mut slots = Vec::new();
        let mut numeric_columns = Vec::new();
        let mut discrete_columns = Vec::new();
        for idx in dataset.feature_indices(self.target()) {
            let attribute = &dataset.attributes()[idx];
            let column = dataset.column(idx);

            let position = match column {
                Column::Numeric(values) => {
                    numeric_columns.push((values, dataset.numeric_stats_at(idx).copied()));
                    numeric_columns.len() - 1
                }
                Column::Discrete(values) => {
                    discrete_columns.push(values);
                    discrete_columns.len() - 1
                }
            };

            slots.push(Slot {
                name: attribute.name().to_string(),
                kind: column.kind(),
                column: position,
            });
        }

        let numeric = Array2::from_shape_fn((rows.len(), numeric_columns.len()), |(i, j)| {
            let (values, stats) = &numeric_columns[j];
            normalize(values[rows[i]], stats.as_ref())
        });
        let discrete = Array2::from_shape_fn((rows.len(), discrete_columns.len()), |(i, j)| {
            discrete_columns[j][rows[i]].clone()
        });

        let labels = rows
            .iter()
            .filter_map(|idx| targets[*idx].clone())
            .collect::<Vec<_>>();

        debug!(
            "stored {} instances with {} numeric and {} discrete attributes for k = {}",
            labels.len(),
            numeric.ncols(),
            discrete.ncols(),
            self.k()
        );

        Ok(KnnClassifier {
            k: self.k(),
            target: self.target().to_string(),
            slots,
            stats: numeric_columns.into_iter().map(|(_, stats)| stats).collect(),
            numeric,
            discrete,
            labels,
        })
    }
}

impl<F: Float> KnnClassifier<F> {
    pub fn k(&self) -> usize {
        self.k
    }

    /// Name of the predicted attribute
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of stored training instances
    pub fn nsamples(&self) -> usize {
        self.labels.len()
    }

    /// Class labels of the stored training instances
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Applies the training normalization to a query instance
    ///
    /// Numeric values are clamped to the training range before scaling. Absent attributes and
    /// values of the wrong kind are treated as missing.
    pub fn normalize_instance(&self, instance: &Instance<F>) -> NormalizedInstance<F> {
        let mut numeric = Array1::from_elem(self.stats.len(), None);
        let mut discrete = Array1::from_elem(self.discrete.ncols(), None);

        for slot in &self.slots {
            match slot.kind {
                AttributeKind::Numeric => {
                    numeric[slot.column] = normalize(
                        instance.numeric(&slot.name),
                        self.stats[slot.column].as_ref(),
                    );
                }
                AttributeKind::Discrete => {
                    discrete[slot.column] = instance.discrete(&slot.name).map(String::from);
                }
            }
        }

        NormalizedInstance { numeric, discrete }
    }

    /// Returns the normalized training instance at `idx`
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    pub fn point(&self, idx: usize) -> Point<'_, F> {
        Point {
            numeric: self.numeric.row(idx),
            discrete: self.discrete.row(idx),
        }
    }

    /// Distance between a query and a stored training instance
    pub fn distance(&self, instance: &Instance<F>, idx: usize) -> F {
        let query = self.normalize_instance(instance);
        MixedDistance.distance(query.view(), self.point(idx))
    }

    /// Finds the `k` closest training instances
    ///
    /// Returns the indices of the training instances together with their distance, ordered by
    /// ascending distance. Equal distances keep the training order.
    pub fn k_nearest(&self, instance: &Instance<F>) -> Vec<(usize, F)> {
        let query = self.normalize_instance(instance);

        let mut dists = (0..self.nsamples())
            .map(|idx| (idx, MixedDistance.rdistance(query.view(), self.point(idx))))
            .collect::<Vec<_>>();

        // stable sort, ties keep training order
        dists.sort_by_key(|(_, dist)| sort_key(*dist));

        dists
            .into_iter()
            .take(self.k)
            .map(|(idx, rdist)| (idx, MixedDistance.rdist_to_dist(rdist)))
            .collect()
    }
}

impl<F: Float> Predict<F> for KnnClassifier<F> {
    /// Majority class among the `k` nearest training instances
    fn predict(&self, instance: &Instance<F>) -> String {
        self.k_nearest(instance)
            .into_iter()
            .map(|(idx, _)| self.labels[idx].as_str())
            .collect::<LabelCounts>()
            .majority()
            .unwrap_or_default()
            .to_string()
    }
}

/// Min-max scaling of a single value
///
/// Attributes without statistics stay missing, missing values and constant attributes map to
/// the midpoint.
fn normalize<F: Float>(value: Option<F>, stats: Option<&NumericStats<F>>) -> Option<F> {
    let stats = stats?;
    let half = F::cast(0.5);

    let value = match value {
        Some(value) => value,
        None => return Some(half),
    };

    // halved operands keep `max - min` finite over the whole float range
    let range = stats.max * half - stats.min * half;
    if range.is_nan() || range <= F::zero() {
        return Some(half);
    }

    let value = value.max(stats.min).min(stats.max);
    Some((value * half - stats.min * half) / range)
}

/// Orders NaN distances after every other distance
fn sort_key<F: Float>(dist: F) -> SortKey<F> {
    if dist.is_nan() {
        SortKey::new(F::infinity())
    } else {
        SortKey::new(dist)
    }
}
