//! Simulation engine for the skyhop platformer.
//!
//! The engine owns everything that happens inside a single game: the agent's
//! physics, the procedurally generated platforms, scrolling, scoring and the
//! win/loss conditions. It knows nothing about how a direction is chosen
//! (keyboard or neural controller) nor about how a frame is drawn.
//!
//! - [`core`] - Plain data: directions, geometry, platforms, the finish line
//! - [`engine`] - The [`World`] state machine, platform generation, seeds,
//!   snapshots and the [`GameSession`] that couples a world with a [`Pilot`]
//!
//! # Example
//!
//! ```
//! use skyhop_engine::{Direction, World, WorldSeed};
//!
//! let mut world = World::new(WorldSeed::from_u64(7));
//! world.set_direction(Direction::Right);
//! for _ in 0..120 {
//!     world.step();
//! }
//! assert!(world.score() > 0);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("direction must be -1, 0 or 1, got {value}")]
pub struct DirectionError {
    value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid world seed {input:?}: expected 32 hex characters")]
pub struct SeedParseError {
    input: String,
}
