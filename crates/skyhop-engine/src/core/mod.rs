//! Plain data types shared by the simulation.
//!
//! - [`Direction`] / [`Heading`] - Agent input and moving-platform travel direction
//! - [`Position`] / [`Size`] - Screen-space geometry (y grows downwards)
//! - [`Platform`] / [`PlatformKind`] - The things the agent bounces on
//! - [`FinishLine`] - Decorative goal marker that scrolls with the world

pub use self::{direction::*, geometry::*, platform::*};

pub(crate) mod direction;
pub(crate) mod geometry;
pub(crate) mod platform;
