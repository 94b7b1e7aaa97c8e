use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::DirectionError;

/// Horizontal input applied to the agent for one tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    #[default]
    None,
    Right,
}

impl Direction {
    /// Maps a controller output index to a direction.
    ///
    /// Index 0 is left, index 1 is right, every other index means no movement.
    #[must_use]
    pub const fn from_action_index(index: usize) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Right,
            _ => Self::None,
        }
    }

    /// Returns the direction as an integer in `{-1, 0, 1}`.
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::None => 0,
            Self::Right => 1,
        }
    }

    #[must_use]
    pub fn sign(self) -> f32 {
        f32::from(self.value())
    }
}

impl TryFrom<i32> for Direction {
    type Error = DirectionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Left),
            0 => Ok(Self::None),
            1 => Ok(Self::Right),
            _ => Err(DirectionError { value }),
        }
    }
}

/// Travel direction of a moving platform. Never neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

impl Distribution<Heading> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Heading {
        if rng.random_bool(0.5) {
            Heading::Right
        } else {
            Heading::Left
        }
    }
}
