//! Genetic operators over [`Genome`]s.
//!
//! - **Crossover**: [`crossover_mean`] averages two parents parameter by parameter
//! - **Mutation**: [`Mutation`] adds a uniform perturbation to each parameter
//!   with a fixed probability
//!
//! Both return or modify independent storage; a child never shares state
//! with its parents.

use rand::{Rng, distr::Distribution};
use rand_distr::{Bernoulli, Uniform};
use skyhop_brain::Genome;

use crate::ConfigError;

/// Builds a child whose every parameter is the arithmetic mean of its parents'.
#[must_use]
pub fn crossover_mean(a: &Genome, b: &Genome) -> Genome {
    a.zip_map(b, |x, y| (x + y) / 2.0)
}

/// Per-parameter uniform mutation.
#[derive(Debug, Clone)]
pub struct Mutation {
    rate: Bernoulli,
    perturbation: Uniform<f32>,
}

impl Mutation {
    /// Creates a mutation that touches each parameter with probability `rate`
    /// and adds a value drawn from `[-range, range]`.
    pub fn new(rate: f64, range: f32) -> Result<Self, ConfigError> {
        let rate = Bernoulli::new(rate).map_err(|_| ConfigError::MutationRate { rate })?;
        let perturbation =
            Uniform::new_inclusive(-range, range).map_err(|_| ConfigError::MutationRange { range })?;
        Ok(Self { rate, perturbation })
    }

    pub fn apply<R>(&self, genome: &mut Genome, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for param in genome.params_mut() {
            if self.rate.sample(rng) {
                *param += self.perturbation.sample(rng);
            }
        }
    }
}
