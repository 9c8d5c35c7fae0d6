use rand::seq::SliceRandom;
use rand::Rng;

use super::{Dataset, Float};

impl<F: Float> Dataset<F> {
    /// Creates a new dataset from the instances at `indices`, in the given order
    ///
    /// Numeric statistics are recomputed for the selected instances, while the value domains of
    /// discrete attributes are carried over from `self`. This keeps the domains of a train and a
    /// test partition identical.
    ///
    /// ### Panics
    ///
    /// If an index is out of bounds
    pub fn select(&self, indices: &[usize]) -> Dataset<F> {
        let columns = self
            .columns
            .iter()
            .map(|column| column.select(indices))
            .collect();

        Dataset::from_columns(
            self.attributes.clone(),
            columns,
            Some(self.domains.clone()),
            indices.len(),
        )
    }

    /// Split dataset into two disjoint chunks
    ///
    /// This function splits the instances in two disjoint chunks, where the first chunk holds
    /// `ratio` of all instances and the second the remainder. The order of instances is kept.
    pub fn split_with_ratio(&self, ratio: f32) -> (Dataset<F>, Dataset<F>) {
        let n = (self.nsamples() as f32 * ratio).ceil() as usize;
        let n = n.min(self.nsamples());

        let first = (0..n).collect::<Vec<_>>();
        let second = (n..self.nsamples()).collect::<Vec<_>>();

        (self.select(&first), self.select(&second))
    }

    /// Returns a copy of the dataset with the instances in random order
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Dataset<F> {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        self.select(&indices)
    }
}
