use std::fmt;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::{
    AGENT_HITBOX, Direction, FinishLine, PLATFORM_SIZE, Platform, PlatformKind, Position, Size,
    WORLD_HEIGHT, WORLD_WIDTH,
};

use super::{
    FrameObserver, WorldSeed, WorldSnapshot, generator,
    physics::{
        FPS, GENERATION_CUTOFF_SCORE, GRAVITY, JUMP_FORCE, LANDING_BAND, PLATFORM_SPEED,
        SCORE_PER_LEVEL, SPEED, WIN_SCORE, WRAP_LEFT,
    },
};

const START_PLATFORM_X: f32 = WORLD_WIDTH / 2.0 - 30.0;
const START_PLATFORM_Y: f32 = WORLD_HEIGHT / 2.0;
/// The camera scrolls whenever the agent rises above this line.
const SCROLL_LINE: f32 = WORLD_HEIGHT / 2.0;

/// One game: the agent, its platforms, score and terminal flags.
///
/// A world is fully determined by its [`WorldSeed`] and the sequence of
/// directions it is fed. Once won or lost it is terminal and [`World::step`]
/// does nothing.
pub struct World {
    seed: WorldSeed,
    rng: Pcg32,
    position: Position,
    direction: Direction,
    gravity_speed: f32,
    score: u32,
    level: u32,
    platforms: Vec<Platform>,
    finish_line: FinishLine,
    game_over: bool,
    game_won: bool,
    ticks: u64,
    last_scroll: f32,
    observer: Option<Box<dyn FrameObserver>>,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("seed", &self.seed)
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("gravity_speed", &self.gravity_speed)
            .field("score", &self.score)
            .field("level", &self.level)
            .field("platforms", &self.platforms.len())
            .field("game_over", &self.game_over)
            .field("game_won", &self.game_won)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl World {
    /// Builds the initial world for `seed`: the start platform with the agent
    /// standing on it, plus the first batch of generated platforms.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.to_bytes());
        let start = Platform::new(
            START_PLATFORM_X,
            START_PLATFORM_Y,
            PlatformKind::Normal,
            rng.random(),
        );
        let position = Position::new(
            start.center_x() - AGENT_HITBOX.width / 2.0,
            start.y() - AGENT_HITBOX.height,
        );
        let mut platforms = vec![start];
        generator::refill(&mut platforms, 1, &mut rng);

        Self {
            seed,
            rng,
            position,
            direction: Direction::None,
            gravity_speed: 0.0,
            score: 0,
            level: 1,
            platforms,
            finish_line: FinishLine::INITIAL,
            game_over: false,
            game_won: false,
            ticks: 0,
            last_scroll: 0.0,
            observer: None,
        }
    }

    /// Builds a world from a seed drawn from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self::new(rand::rng().random())
    }

    /// Restores the initial state of the current seed. The bound observer is kept.
    pub fn reset(&mut self) {
        self.reseed(self.seed);
    }

    /// Replaces the world with the initial state of `seed`. The bound observer is kept.
    pub fn reseed(&mut self, seed: WorldSeed) {
        let observer = self.observer.take();
        *self = Self::new(seed);
        self.observer = observer;
    }

    pub fn bind_observer(&mut self, observer: Box<dyn FrameObserver>) {
        self.observer = Some(observer);
    }

    pub fn unbind_observer(&mut self) -> Option<Box<dyn FrameObserver>> {
        self.observer.take()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advances the world by one fixed timestep.
    pub fn step(&mut self) {
        if self.is_terminal() {
            return;
        }
        self.ticks += 1;
        self.last_scroll = 0.0;

        self.position.x += self.direction.sign() * SPEED / FPS;
        if self.position.x < WRAP_LEFT {
            self.position.x = WORLD_WIDTH;
        }
        if self.position.x > WORLD_WIDTH {
            self.position.x = WRAP_LEFT;
        }

        self.gravity_speed += GRAVITY;
        self.position.y += self.gravity_speed / FPS;

        for platform in &mut self.platforms {
            platform.advance(PLATFORM_SPEED / FPS);
        }

        self.detect_landing();

        if self.position.y < SCROLL_LINE {
            self.scroll_by(SCROLL_LINE - self.position.y);
        }

        if self.position.y > WORLD_HEIGHT {
            self.game_over = true;
        }

        self.notify_observer();
    }

    fn detect_landing(&mut self) {
        let falling = self.gravity_speed > 0.0;
        let left = self.position.x;
        let right = left + AGENT_HITBOX.width;
        let feet = self.position.y + AGENT_HITBOX.height;

        let landed = self.platforms.iter_mut().find(|p| {
            falling
                && p.overlaps_horizontally(left, right)
                && feet >= p.y
                && feet < p.y + LANDING_BAND
        });
        if let Some(platform) = landed
            && platform.land()
        {
            self.gravity_speed = -JUMP_FORCE;
        }
    }

    fn scroll_by(&mut self, amount: f32) {
        self.last_scroll = amount;
        self.position.y += amount;
        for platform in &mut self.platforms {
            platform.y += amount;
        }
        self.finish_line.position.y += amount;

        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let gained = amount.floor() as u32;
        self.score = self.score.saturating_add(gained);
        self.level = self.score / SCORE_PER_LEVEL + 1;

        if self.score < GENERATION_CUTOFF_SCORE {
            generator::refill(&mut self.platforms, self.level, &mut self.rng);
        } else if self.score >= WIN_SCORE {
            self.game_won = true;
        }
    }

    fn notify_observer(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.on_frame(&self.snapshot());
            self.observer = Some(observer);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot<'_> {
        WorldSnapshot {
            tick: self.ticks,
            position: self.position,
            hitbox: AGENT_HITBOX,
            platform_size: PLATFORM_SIZE,
            platforms: &self.platforms,
            finish_line: self.finish_line,
            score: self.score,
            level: self.level,
            game_over: self.game_over,
            game_won: self.game_won,
        }
    }

    #[must_use]
    pub fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Top-left corner of the agent's hitbox.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn hitbox(&self) -> Size {
        AGENT_HITBOX
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Vertical speed of the agent. Negative while rising.
    #[must_use]
    pub fn gravity_speed(&self) -> f32 {
        self.gravity_speed
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    #[must_use]
    pub fn finish_line(&self) -> FinishLine {
        self.finish_line
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn is_game_won(&self) -> bool {
        self.game_won
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.game_over || self.game_won
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Distance the camera scrolled during the last tick, 0 if it did not.
    #[must_use]
    pub fn last_scroll(&self) -> f32 {
        self.last_scroll
    }

    /// Returns `false` if any numeric state has become NaN or infinite.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.position.is_finite()
            && self.gravity_speed.is_finite()
            && self.platforms.iter().all(Platform::is_finite)
    }
}
