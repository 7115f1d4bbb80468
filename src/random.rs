use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Source of the random variates a Metropolis step consumes.
///
/// Every `rand::Rng` is a random source. A seeded generator reproduces a
/// chain bit-for-bit.
pub trait RandomSource {
    /// A uniform draw from `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// A normal draw with the given mean and standard deviation.
    fn normal(&mut self, mean: f64, scale: f64) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn normal(&mut self, mean: f64, scale: f64) -> f64 {
        let z: f64 = StandardNormal.sample(self);
        mean + scale * z
    }
}
