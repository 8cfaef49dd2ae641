use rand::Rng;

/// A source of the random values consumed during
/// network generation, breeding and mutation.
///
/// Any [`Rng`] is a `RandomSource`, so a seeded generator
/// can be passed wherever reproducible runs are wanted.
/// Implementing the trait directly allows customizing
/// how fresh weights are drawn, by overriding
/// [`random_clamped`].
///
/// [`random_clamped`]: RandomSource::random_clamped
///
/// # Examples
/// ```
/// use neuroevolution::RandomSource;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let weight = rng.random_clamped();
/// assert!((-1.0..=1.0).contains(&weight));
/// ```
pub trait RandomSource {
    /// Returns a uniformly distributed value in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Returns a uniformly distributed value in `[-1, 1]`.
    fn random_clamped(&mut self) -> f64 {
        self.unit() * 2.0 - 1.0
    }

    /// Returns `true` with probability `chance`.
    fn chance(&mut self, chance: f64) -> bool {
        self.unit() < chance
    }
}

impl<R: Rng> RandomSource for R {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
