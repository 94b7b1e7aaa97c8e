//! Simulation state and the rules that advance it.
//!
//! - [`World`] - One game: agent, platforms, score, terminal flags
//! - [`WorldSeed`] - Seed for deterministic platform generation
//! - [`WorldSnapshot`] / [`FrameObserver`] - Read-only per-tick view for displays
//! - [`GameSession`] / [`Pilot`] - A world driven by a direction source
//! - [`KeyHold`] - Keyboard state machine for human play
//!
//! # Tick Order
//!
//! Every call to [`World::step`] runs the same fixed sequence:
//!
//! 1. Horizontal move with screen wrap
//! 2. Gravity
//! 3. Platform motion (sliding, falling)
//! 4. Landing detection (first matching platform wins)
//! 5. Scrolling, scoring, level update, platform regeneration, win check
//! 6. Loss check (agent below the screen)
//! 7. Observer notification
//!
//! Once the world is won or lost it ignores further steps.

pub use self::{physics::*, seed::*, session::*, snapshot::*, world::*};

mod generator;
mod physics;
mod seed;
mod session;
mod snapshot;
mod world;
