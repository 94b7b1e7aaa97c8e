//! Reachability-constrained platform generation.
//!
//! New platforms are always stacked above the current highest platform (the
//! *anchor*). The vertical gap is drawn from a window bounded by
//! [`MAX_JUMP_HEIGHT`] so every new platform stays jumpable from its anchor.

use rand::{Rng, seq::IndexedRandom};

use crate::core::{Platform, PlatformKind, WORLD_HEIGHT, WORLD_WIDTH};

use super::physics::{FORCED_GAP, MAX_JUMP_HEIGHT, MIN_PLATFORM_SPACING, MIN_PLATFORM_Y};

const PLATFORMS_AT_FIRST_LEVEL: f32 = 10.0;
const PLATFORMS_AT_LAST_LEVEL: f32 = 5.0;
const LAST_DENSITY_LEVEL: u32 = 10;

/// Largest x a new platform may start at.
const MAX_PLATFORM_X: f32 = WORLD_WIDTH - 60.0;
/// Half-width of the random x offset from a reference platform.
const MAX_X_OFFSET: f32 = 50.0;
const MAX_JITTER: f32 = 0.1;

/// Number of platforms the world keeps alive at `level`.
///
/// Decreases linearly from 10 at level 1 to 5 at level 10, rounded.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn target_platform_count(level: u32) -> usize {
    let t = (level.saturating_sub(1) as f32 / (LAST_DENSITY_LEVEL - 1) as f32).clamp(0.0, 1.0);
    let desired =
        PLATFORMS_AT_FIRST_LEVEL - t * (PLATFORMS_AT_FIRST_LEVEL - PLATFORMS_AT_LAST_LEVEL);
    desired.round() as usize
}

/// Removes platforms below the screen, then stacks new ones until the
/// level's target count is reached.
///
/// Stops early if no platform is left to anchor on.
pub(crate) fn refill<R>(platforms: &mut Vec<Platform>, level: u32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    platforms.retain(|p| p.y < WORLD_HEIGHT);

    let target = target_platform_count(level);
    while platforms.len() < target {
        let Some(anchor_y) = highest_platform_y(platforms) else {
            tracing::debug!(target, "no anchor platform left, generation skipped");
            break;
        };
        let platform = spawn_above(platforms, anchor_y, level, rng);
        platforms.push(platform);
    }
}

fn highest_platform_y(platforms: &[Platform]) -> Option<f32> {
    platforms.iter().map(Platform::y).min_by(f32::total_cmp)
}

/// Creates one platform above the anchor at `anchor_y`.
pub(crate) fn spawn_above<R>(platforms: &[Platform], anchor_y: f32, level: u32, rng: &mut R) -> Platform
where
    R: Rng + ?Sized,
{
    let window_top = f32::max(anchor_y - MAX_JUMP_HEIGHT, MIN_PLATFORM_Y);
    let window_bottom = anchor_y - MIN_PLATFORM_SPACING;

    let kind = draw_kind(level, rng);
    let fraction = placement_fraction(level, rng);
    let y = window_bottom + fraction * (window_top - window_bottom);
    let x = viable_x(platforms, y, rng);
    let y = y.min(anchor_y - FORCED_GAP);

    Platform::new(x, y, kind, rng.random())
}

/// Draws a platform kind. Low levels only produce normal platforms.
pub(crate) fn draw_kind<R>(level: u32, rng: &mut R) -> PlatformKind
where
    R: Rng + ?Sized,
{
    let r: f32 = rng.random();
    let (normal, moving) = match level {
        ..=3 => return PlatformKind::Normal,
        4..=5 => (0.7, 0.9),
        _ => (0.5, 0.8),
    };
    if r < normal {
        PlatformKind::Normal
    } else if r < moving {
        PlatformKind::Moving
    } else {
        PlatformKind::Disappearing
    }
}

/// Position inside the placement window, measured from its bottom (smallest
/// gap) toward its top (largest gap). Grows with the level.
fn placement_fraction<R>(level: u32, rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    #[expect(clippy::cast_precision_loss)]
    let base = 0.5 + 0.5 * (level.min(LAST_DENSITY_LEVEL) as f32 / LAST_DENSITY_LEVEL as f32);
    let jitter = rng.random_range(0.0..MAX_JITTER);
    f32::min(1.0, base + jitter)
}

/// Picks an x near a platform the new one will be reachable from, if any.
fn viable_x<R>(platforms: &[Platform], y: f32, rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    let candidates = platforms
        .iter()
        .filter(|p| p.y > y && p.y <= y + MAX_JUMP_HEIGHT)
        .collect::<Vec<_>>();

    match candidates.choose(rng) {
        Some(reference) => {
            let offset = rng.random_range(-MAX_X_OFFSET..MAX_X_OFFSET);
            (reference.x + offset).clamp(0.0, MAX_PLATFORM_X)
        }
        None => rng.random_range(0.0..MAX_PLATFORM_X),
    }
}
