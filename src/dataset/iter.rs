use super::{Dataset, Float, Instance};

/// Iterator over the instances of a dataset, in index order
pub struct Instances<'a, F> {
    dataset: &'a Dataset<F>,
    idx: usize,
}

impl<'a, F: Float> Instances<'a, F> {
    pub fn new(dataset: &'a Dataset<F>) -> Instances<'a, F> {
        Instances { dataset, idx: 0 }
    }
}

impl<'a, F: Float> Iterator for Instances<'a, F> {
    type Item = Instance<F>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.dataset.nsamples() {
            return None;
        }

        let instance = self.dataset.instance(self.idx);
        self.idx += 1;

        Some(instance)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.nsamples() - self.idx;
        (remaining, Some(remaining))
    }
}

impl<'a, F: Float> ExactSizeIterator for Instances<'a, F> {}
