use serde::{Deserialize, Serialize};

/// How a generation's entries are scheduled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parallelism {
    /// One pass over all entries per tick, in population order.
    #[default]
    Sequential,
    /// Entries are split into this many chunks, each advanced on its own
    /// scoped thread. Entries never interact, so results match the
    /// sequential mode exactly.
    Threads(usize),
}

/// Parameters of the evolutionary loop.
///
/// Every field has a default, so a configuration file only needs the fields
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    /// Number of entries per generation.
    pub population_size: usize,
    /// Number of top genomes carried over unchanged and used as parents.
    pub elite_count: usize,
    /// Probability of perturbing each parameter of a child.
    pub mutation_rate: f64,
    /// Perturbations are drawn uniformly from `[-mutation_range, mutation_range]`.
    pub mutation_range: f32,
    /// An entry stops after its score has not increased for more than this many ticks.
    pub stagnation_ticks: u32,
    /// Give every slot a fresh course after breeding. When off, each slot
    /// replays the course it started with in every generation.
    pub reseed_worlds: bool,
    pub parallelism: Parallelism,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            elite_count: 10,
            mutation_rate: 0.1,
            mutation_range: 0.2,
            stagnation_ticks: 300,
            reseed_worlds: true,
            parallelism: Parallelism::Sequential,
        }
    }
}

impl TrainerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.elite_count == 0 || self.elite_count > self.population_size {
            return Err(ConfigError::EliteCount {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRate {
                rate: self.mutation_rate,
            });
        }
        if !self.mutation_range.is_finite() || self.mutation_range < 0.0 {
            return Err(ConfigError::MutationRange {
                range: self.mutation_range,
            });
        }
        if self.parallelism == Parallelism::Threads(0) {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("elite count must be between 1 and the population size {population_size}, got {elite_count}")]
    EliteCount {
        elite_count: usize,
        population_size: usize,
    },
    #[display("mutation rate must be within [0, 1], got {rate}")]
    MutationRate { rate: f64 },
    #[display("mutation range must be finite and non-negative, got {range}")]
    MutationRange { range: f32 },
    #[display("thread count must be at least 1")]
    ZeroThreads,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TrainerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.population_size, 50);
        assert_eq!(config.elite_count, 10);
        assert_eq!(config.stagnation_ticks, 300);
        assert!(config.reseed_worlds);
    }

    #[test]
    fn test_validate_rejects_each_invalid_field() {
        let cases = [
            (
                TrainerConfig {
                    population_size: 0,
                    elite_count: 0,
                    ..TrainerConfig::default()
                },
                ConfigError::EmptyPopulation,
            ),
            (
                TrainerConfig {
                    elite_count: 0,
                    ..TrainerConfig::default()
                },
                ConfigError::EliteCount {
                    elite_count: 0,
                    population_size: 50,
                },
            ),
            (
                TrainerConfig {
                    elite_count: 51,
                    ..TrainerConfig::default()
                },
                ConfigError::EliteCount {
                    elite_count: 51,
                    population_size: 50,
                },
            ),
            (
                TrainerConfig {
                    mutation_rate: 1.5,
                    ..TrainerConfig::default()
                },
                ConfigError::MutationRate { rate: 1.5 },
            ),
            (
                TrainerConfig {
                    mutation_range: -0.1,
                    ..TrainerConfig::default()
                },
                ConfigError::MutationRange { range: -0.1 },
            ),
            (
                TrainerConfig {
                    parallelism: Parallelism::Threads(0),
                    ..TrainerConfig::default()
                },
                ConfigError::ZeroThreads,
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_nan_rate_is_rejected() {
        let config = TrainerConfig {
            mutation_rate: f64::NAN,
            ..TrainerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MutationRate { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrainerConfig =
            serde_json::from_str(r#"{ "population_size": 8, "parallelism": { "threads": 2 } }"#)
                .unwrap();
        assert_eq!(config.population_size, 8);
        assert_eq!(config.elite_count, 10);
        assert_eq!(config.parallelism, Parallelism::Threads(2));
        assert!(config.reseed_worlds);

        let err = serde_json::from_str::<TrainerConfig>(r#"{ "population": 8 }"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }
}
