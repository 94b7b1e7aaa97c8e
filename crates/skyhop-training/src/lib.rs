//! Evolutionary training for skyhop controllers.
//!
//! - [`config`] - [`TrainerConfig`] and its validation
//! - [`genetic`] - The [`Population`] and its generation loop
//! - [`operators`] - Crossover and mutation
//! - [`report`] - Per-generation summaries
//! - [`export`] - The JSON genome exchange document
//!
//! # Example
//!
//! ```no_run
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use skyhop_training::{GenerationOutcome, Population, TrainerConfig};
//!
//! let mut population = Population::new(TrainerConfig::default(), Pcg32::seed_from_u64(0))?;
//! if let GenerationOutcome::Completed(report) = population.run_generation() {
//!     println!("best score: {}", report.best_score);
//! }
//! # Ok::<(), skyhop_training::ConfigError>(())
//! ```

pub use self::{config::*, export::*, genetic::*, report::*};

pub mod config;
pub mod export;
pub mod genetic;
pub mod operators;
pub mod report;
