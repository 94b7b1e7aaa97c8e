use serde::{Deserialize, Serialize};

/// Width of the visible world.
pub const WORLD_WIDTH: f32 = 320.0;
/// Height of the visible world. Anything whose y exceeds it is below the screen.
pub const WORLD_HEIGHT: f32 = 480.0;

/// Fixed hitbox of the agent.
pub const AGENT_HITBOX: Size = Size::new(50.0, 50.0);
/// Fixed size of every platform.
pub const PLATFORM_SIZE: Size = Size::new(57.0, 15.0);

/// A point in screen space. The y axis grows downwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
