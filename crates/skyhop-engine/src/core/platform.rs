use serde::{Deserialize, Serialize};

use super::{
    direction::Heading,
    geometry::{PLATFORM_SIZE, Position, Size, WORLD_WIDTH},
};

/// Downward acceleration of a disappearing platform once it starts falling,
/// in units per tick squared.
pub const FALL_ACCELERATION: f32 = 0.5;

/// Behaviour of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    /// Static platform. Bounces the agent every time it lands.
    Normal,
    /// Slides horizontally and reverses at the screen edges.
    Moving,
    /// Bounces the agent once, then falls out of the world.
    Disappearing,
}

/// A platform the agent can land on.
///
/// The position is the top-left corner; every platform has the same
/// [`PLATFORM_SIZE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub(crate) x: f32,
    pub(crate) y: f32,
    kind: PlatformKind,
    heading: Heading,
    touched: bool,
    is_falling: bool,
    fall_speed: f32,
}

impl Platform {
    #[must_use]
    pub fn new(x: f32, y: f32, kind: PlatformKind, heading: Heading) -> Self {
        Self {
            x,
            y,
            kind,
            heading,
            touched: false,
            is_falling: false,
            fall_speed: 0.0,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Returns the y coordinate of the top surface.
    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn size(&self) -> Size {
        PLATFORM_SIZE
    }

    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + PLATFORM_SIZE.width / 2.0
    }

    #[must_use]
    pub fn kind(&self) -> PlatformKind {
        self.kind
    }

    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[must_use]
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    #[must_use]
    pub fn is_falling(&self) -> bool {
        self.is_falling
    }

    #[must_use]
    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    /// Returns `true` if the span `[left, right)` overlaps this platform horizontally.
    #[must_use]
    pub fn overlaps_horizontally(&self, left: f32, right: f32) -> bool {
        right > self.x && left < self.x + PLATFORM_SIZE.width
    }

    /// Advances the platform by one tick.
    ///
    /// `speed` is the horizontal distance a moving platform covers this tick.
    pub(crate) fn advance(&mut self, speed: f32) {
        if self.kind.is_moving() && !self.is_falling {
            self.x += speed * self.heading.sign();
            if self.x <= 0.0 || self.x + PLATFORM_SIZE.width >= WORLD_WIDTH {
                self.heading = self.heading.reversed();
            }
        }

        if self.is_falling {
            self.fall_speed += FALL_ACCELERATION;
            self.y += self.fall_speed;
        }
    }

    /// Marks the platform as landed on.
    ///
    /// Returns `true` if the landing bounces the agent. A disappearing platform
    /// bounces only on its first touch and starts falling afterwards.
    pub(crate) fn land(&mut self) -> bool {
        match self.kind {
            PlatformKind::Normal | PlatformKind::Moving => true,
            PlatformKind::Disappearing => {
                if self.touched {
                    return false;
                }
                self.touched = true;
                self.is_falling = true;
                true
            }
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.fall_speed.is_finite()
    }
}

/// Goal marker placed far above the start. Reaching the winning score is what
/// ends the game; the marker only scrolls with the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinishLine {
    pub position: Position,
    pub size: Size,
}

impl FinishLine {
    pub const INITIAL: Self = Self {
        position: Position::new(0.0, -10_800.0),
        size: Size::new(321.0, 182.0),
    };
}
