use ndarray::{Array1, ArrayView1, Zip};
use tabula::Float;

/// A normalized instance, borrowed from a training matrix or a query
///
/// Numeric values are already scaled to `[0, 1]`, discrete values are kept as they are. Both
/// parts hold one entry per attribute of that kind, in declaration order. `None` marks a missing
/// value.
#[derive(Debug, Clone, Copy)]
pub struct Point<'a, F> {
    pub numeric: ArrayView1<'a, Option<F>>,
    pub discrete: ArrayView1<'a, Option<String>>,
}

/// An owned normalized instance, see [`Point`]
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInstance<F> {
    pub numeric: Array1<Option<F>>,
    pub discrete: Array1<Option<String>>,
}

impl<F: Float> NormalizedInstance<F> {
    pub fn view(&self) -> Point<'_, F> {
        Point {
            numeric: self.numeric.view(),
            discrete: self.discrete.view(),
        }
    }
}

// Should be symmetric and zero for identical points without missing values
pub trait Distance<F: Float> {
    // Panics if a and b do not have the same layout
    fn distance(&self, a: Point<F>, b: Point<F>) -> F;

    // Fast distance metric that keeps the order of the distance function
    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        self.distance(a, b)
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist
    }
}

/// Euclidean distance over numeric attributes combined with the Hamming distance over discrete
/// attributes
///
/// A numeric attribute contributes the squared difference of both values, or exactly one if
/// either value is missing. A discrete attribute contributes zero if both values are present and
/// equal, one otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixedDistance;

impl<F: Float> Distance<F> for MixedDistance {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        self.rdist_to_dist(self.rdistance(a, b))
    }

    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        let numeric = Zip::from(&a.numeric)
            .and(&b.numeric)
            .fold(F::zero(), |acc, a, b| match (a, b) {
                (Some(a), Some(b)) => acc + (*a - *b) * (*a - *b),
                _ => acc + F::one(),
            });

        let discrete = Zip::from(&a.discrete)
            .and(&b.discrete)
            .fold(F::zero(), |acc, a, b| match (a, b) {
                (Some(a), Some(b)) if a == b => acc,
                _ => acc + F::one(),
            });

        numeric + discrete
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.sqrt()
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist.powi(2)
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    use super::*;

    fn point(numeric: &[Option<f64>], discrete: &[Option<&str>]) -> NormalizedInstance<f64> {
        NormalizedInstance {
            numeric: arr1(numeric),
            discrete: discrete.iter().map(|x| x.map(String::from)).collect(),
        }
    }

    #[test]
    fn mixed_dist() {
        let a = point(&[Some(0.5), Some(0.0)], &[Some("red"), Some("small")]);
        let b = point(&[Some(0.2), Some(0.4)], &[Some("red"), Some("large")]);

        // 0.3^2 + 0.4^2 + 0 + 1
        let ab = MixedDistance.distance(a.view(), b.view());
        assert_abs_diff_eq!(ab, 1.25f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(MixedDistance.rdistance(a.view(), b.view()), 1.25, epsilon = 1e-12);
        assert_abs_diff_eq!(
            MixedDistance.rdist_to_dist(MixedDistance.dist_to_rdist(ab)),
            ab,
            epsilon = 1e-12
        );

        // symmetric
        assert_abs_diff_eq!(MixedDistance.distance(b.view(), a.view()), ab);
    }

    #[test]
    fn self_distance_is_zero() {
        let a = point(&[Some(0.1), Some(1.0)], &[Some("x")]);
        assert_abs_diff_eq!(MixedDistance.distance(a.view(), a.view()), 0.0);
    }

    #[test]
    fn missing_values_count_as_one() {
        let a = point(&[None, Some(0.5)], &[None]);
        let b = point(&[Some(0.3), Some(0.5)], &[Some("x")]);

        assert_abs_diff_eq!(MixedDistance.rdistance(a.view(), b.view()), 2.0);
        // even if both are missing
        assert_abs_diff_eq!(MixedDistance.rdistance(a.view(), a.view()), 2.0);
    }

    #[test]
    fn triangle_inequality() {
        let a = point(&[Some(0.5), Some(0.6)], &[Some("x")]);
        let b = point(&[Some(0.4), Some(0.3)], &[Some("y")]);
        let c = point(&[Some(0.1), Some(0.9)], &[Some("x")]);

        let ab = MixedDistance.distance(a.view(), b.view());
        let bc = MixedDistance.distance(b.view(), c.view());
        let ac = MixedDistance.distance(a.view(), c.view());
        assert!(ab + bc > ac);
    }
}
