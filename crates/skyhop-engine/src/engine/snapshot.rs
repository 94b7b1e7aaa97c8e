use serde::Serialize;

use crate::core::{FinishLine, Platform, Position, Size};

/// Read-only view of a world after one tick.
///
/// Produced by [`World::snapshot`](super::World::snapshot) and handed to the
/// bound [`FrameObserver`] once every tick, after all state mutation is done.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorldSnapshot<'a> {
    pub tick: u64,
    pub position: Position,
    pub hitbox: Size,
    pub platform_size: Size,
    pub platforms: &'a [Platform],
    pub finish_line: FinishLine,
    pub score: u32,
    pub level: u32,
    pub game_over: bool,
    pub game_won: bool,
}

/// Display collaborator notified after every tick.
///
/// Observers never influence the simulation. Any `FnMut(&WorldSnapshot)`
/// closure is an observer.
pub trait FrameObserver: Send {
    fn on_frame(&mut self, snapshot: &WorldSnapshot<'_>);
}

impl<F> FrameObserver for F
where
    F: FnMut(&WorldSnapshot<'_>) + Send,
{
    fn on_frame(&mut self, snapshot: &WorldSnapshot<'_>) {
        self(snapshot);
    }
}
