use std::convert::Infallible;

use crate::core::Direction;

use super::World;

/// Who is steering a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ControlMode {
    Human,
    Ai,
}

/// Chooses the direction of a world for the next tick.
pub trait Pilot {
    type Error;

    fn steer(&mut self, world: &World) -> Result<Direction, Self::Error>;

    fn control_mode(&self) -> ControlMode;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
}

/// Left/right key-hold state for human play.
///
/// Pressing a key steers toward its side. Releasing a key returns to neutral
/// unless the other key is still held, in which case the direction is kept.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyHold {
    left: bool,
    right: bool,
    direction: Direction,
}

impl KeyHold {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
        }
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Left => {
                self.left = true;
                self.direction = Direction::Left;
            }
            Key::Right => {
                self.right = true;
                self.direction = Direction::Right;
            }
        }
    }

    pub fn release(&mut self, key: Key) {
        let other_held = match key {
            Key::Left => self.right,
            Key::Right => self.left,
        };
        if !other_held {
            self.direction = Direction::None;
        }
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
        }
    }
}

impl Pilot for KeyHold {
    type Error = Infallible;

    fn steer(&mut self, _world: &World) -> Result<Direction, Self::Error> {
        Ok(self.direction)
    }

    fn control_mode(&self) -> ControlMode {
        ControlMode::Human
    }
}

/// A world coupled with the single pilot allowed to steer it.
#[derive(Debug)]
pub struct GameSession<P> {
    world: World,
    pilot: P,
}

impl<P> GameSession<P>
where
    P: Pilot,
{
    #[must_use]
    pub fn new(world: World, pilot: P) -> Self {
        Self { world, pilot }
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn pilot(&self) -> &P {
        &self.pilot
    }

    pub fn pilot_mut(&mut self) -> &mut P {
        &mut self.pilot
    }

    #[must_use]
    pub fn control_mode(&self) -> ControlMode {
        self.pilot.control_mode()
    }

    #[must_use]
    pub fn into_parts(self) -> (World, P) {
        (self.world, self.pilot)
    }

    /// Asks the pilot for a direction and advances the world one tick.
    ///
    /// Does nothing once the world is terminal. If the pilot fails, the world
    /// is left untouched.
    pub fn increment_frame(&mut self) -> Result<(), P::Error> {
        if self.world.is_terminal() {
            return Ok(());
        }
        let direction = self.pilot.steer(&self.world)?;
        self.world.set_direction(direction);
        self.world.step();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorldSeed;

    #[test]
    fn test_press_and_release_single_key() {
        let mut keys = KeyHold::new();
        keys.press(Key::Left);
        assert_eq!(keys.direction(), Direction::Left);
        keys.release(Key::Left);
        assert_eq!(keys.direction(), Direction::None);
        assert!(!keys.is_held(Key::Left));
    }

    #[test]
    fn test_release_keeps_direction_while_other_key_held() {
        let mut keys = KeyHold::new();
        keys.press(Key::Left);
        keys.press(Key::Right);
        assert_eq!(keys.direction(), Direction::Right);

        keys.release(Key::Left);
        assert_eq!(keys.direction(), Direction::Right);

        keys.press(Key::Left);
        keys.release(Key::Right);
        assert_eq!(keys.direction(), Direction::Left);
        keys.release(Key::Left);
        assert_eq!(keys.direction(), Direction::None);
    }

    #[test]
    fn test_session_applies_pilot_direction() {
        let mut keys = KeyHold::new();
        keys.press(Key::Right);
        let mut session = GameSession::new(World::new(WorldSeed::from_u64(1)), keys);
        assert!(session.control_mode().is_human());

        let start_x = session.world().position().x;
        session.increment_frame().unwrap();
        assert_eq!(session.world().direction(), Direction::Right);
        assert!(session.world().position().x > start_x);
        assert_eq!(session.world().ticks(), 1);
    }

    struct FailingPilot;

    impl Pilot for FailingPilot {
        type Error = &'static str;

        fn steer(&mut self, _world: &World) -> Result<Direction, Self::Error> {
            Err("broken")
        }

        fn control_mode(&self) -> ControlMode {
            ControlMode::Ai
        }
    }

    #[test]
    fn test_pilot_error_leaves_world_untouched() {
        let mut session = GameSession::new(World::new(WorldSeed::from_u64(2)), FailingPilot);
        assert_eq!(session.increment_frame(), Err("broken"));
        assert_eq!(session.world().ticks(), 0);
    }
}
