//! Piecewise-linear interpolation with a flat fill outside the sampled range.

/// Value returned for abscissae outside the sampled range.
pub const FILL_VALUE: f64 = 0.0;

/// A piecewise-linear interpolant over `(x, y)` samples.
#[derive(Debug, Clone)]
pub struct LinearInterpolant {
    /// Sorted x values (knots). Duplicates are allowed.
    xs: Vec<f64>,
    /// Corresponding y values.
    ys: Vec<f64>,
}

impl LinearInterpolant {
    /// Build from paired samples in any order. The pairs are sorted by x
    /// (stable, so duplicate knots keep their file order). Returns `None`
    /// when there are no samples.
    pub fn new(mut samples: Vec<(f64, f64)>) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (xs, ys) = samples.into_iter().unzip();
        Some(Self { xs, ys })
    }

    /// Sampled x range, inclusive.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Evaluate at `x`. Outside the sampled range the result is exactly
    /// [`FILL_VALUE`]; the end segments are never extended.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (lo, hi) = self.domain();
        if x < lo || x > hi {
            return FILL_VALUE;
        }

        // First knot strictly greater than x; the enclosing segment ends there.
        let upper = self.xs.partition_point(|&k| k <= x);
        if upper == self.xs.len() {
            return self.ys[upper - 1];
        }
        let lower = upper - 1;

        let h = self.xs[upper] - self.xs[lower];
        let t = (x - self.xs[lower]) / h;
        self.ys[lower] + t * (self.ys[upper] - self.ys[lower])
    }

    /// Evaluate at each point of `grid`.
    pub fn resample<I>(&self, grid: I) -> Vec<f64>
    where
        I: IntoIterator<Item = f64>,
    {
        grid.into_iter().map(|x| self.evaluate(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn red() -> LinearInterpolant {
        LinearInterpolant::new(vec![(400.0, 0.1), (500.0, 0.5), (600.0, 0.2)]).unwrap()
    }

    #[test]
    fn passes_through_knots() {
        let f = red();
        assert_relative_eq!(f.evaluate(400.0), 0.1);
        assert_relative_eq!(f.evaluate(500.0), 0.5);
        assert_relative_eq!(f.evaluate(600.0), 0.2);
    }

    #[test]
    fn linear_between_knots() {
        let f = red();
        assert_relative_eq!(f.evaluate(450.0), 0.3, epsilon = 1e-12);
        assert_relative_eq!(f.evaluate(550.0), 0.35, epsilon = 1e-12);
    }

    #[test]
    fn zero_outside_range() {
        let f = red();
        assert_eq!(f.evaluate(399.999), 0.0);
        assert_eq!(f.evaluate(300.0), 0.0);
        assert_eq!(f.evaluate(600.001), 0.0);
        assert_eq!(f.evaluate(1100.0), 0.0);
    }

    #[test]
    fn unsorted_samples_are_sorted() {
        let f = LinearInterpolant::new(vec![(600.0, 0.2), (400.0, 0.1), (500.0, 0.5)]).unwrap();
        assert_eq!(f.domain(), (400.0, 600.0));
        assert_relative_eq!(f.evaluate(450.0), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn duplicate_knots_do_not_divide_by_zero() {
        let f = LinearInterpolant::new(vec![(400.0, 0.1), (500.0, 0.2), (500.0, 0.4), (600.0, 0.0)])
            .unwrap();
        let v = f.evaluate(500.0);
        assert!(v.is_finite());
        assert_relative_eq!(v, 0.4);
        assert_relative_eq!(f.evaluate(450.0), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn single_sample() {
        let f = LinearInterpolant::new(vec![(500.0, 0.7)]).unwrap();
        assert_relative_eq!(f.evaluate(500.0), 0.7);
        assert_eq!(f.evaluate(505.0), 0.0);
        assert!(LinearInterpolant::new(Vec::new()).is_none());
    }

    #[test]
    fn resample_grid() {
        let out = red().resample([395.0, 400.0, 450.0, 605.0]);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], 0.0);
        assert_relative_eq!(out[2], 0.3, epsilon = 1e-12);
        assert_eq!(out[3], 0.0);
    }
}
