/// Fixed number of simulation ticks per second.
pub const FPS: f32 = 60.0;

/// Vertical speed added every tick.
pub const GRAVITY: f32 = 20.0;
/// Upward speed given by a bounce.
pub const JUMP_FORCE: f32 = 600.0;
/// Horizontal speed of the agent, per second.
pub const SPEED: f32 = 200.0;
/// Horizontal speed of moving platforms, per second.
pub const PLATFORM_SPEED: f32 = 200.0;

/// Depth of the band below a platform's top surface in which the agent's feet count as landing.
pub const LANDING_BAND: f32 = 10.0;

/// Agent x below which it reappears at the right edge.
pub const WRAP_LEFT: f32 = -10.0;

/// Ticks from a bounce to the apex of the jump.
pub const TICKS_TO_APEX: f32 = JUMP_FORCE / GRAVITY;

/// Highest vertical gap between two platforms that is always jumpable.
///
/// This is the height gained over [`TICKS_TO_APEX`] ticks of the fixed-step
/// integrator, minus the landing band the bounce may start from.
pub const MAX_JUMP_HEIGHT: f32 = (JUMP_FORCE * (TICKS_TO_APEX - 1.0)
    - GRAVITY * TICKS_TO_APEX * (TICKS_TO_APEX - 1.0) / 2.0)
    / FPS
    - LANDING_BAND;

/// Smallest vertical gap the generator aims for between a new platform and its anchor.
pub const MIN_PLATFORM_SPACING: f32 = 100.0;
/// Gap that a new platform always keeps above its anchor, whatever the window says.
pub const FORCED_GAP: f32 = 40.0;
/// New platforms are never placed with a top above this y when the anchor is near the screen top.
pub const MIN_PLATFORM_Y: f32 = 15.0;

/// Score needed to win.
pub const WIN_SCORE: u32 = 10_000;
/// Platforms stop being generated from this score on.
pub const GENERATION_CUTOFF_SCORE: u32 = 9_700;
/// Score covered by each level.
pub const SCORE_PER_LEVEL: u32 = 1_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_jump_height_is_below_integrated_apex() {
        // integrate a bounce from rest and find the highest point
        let mut speed = -JUMP_FORCE;
        let mut y = 0.0_f32;
        let mut apex = 0.0_f32;
        for _ in 0..100 {
            speed += GRAVITY;
            y += speed / FPS;
            apex = apex.min(y);
        }
        assert!(MAX_JUMP_HEIGHT + LANDING_BAND <= -apex + 1e-3);
        assert!(MAX_JUMP_HEIGHT > MIN_PLATFORM_SPACING);
        assert!((MAX_JUMP_HEIGHT - 135.0).abs() < 1e-3);
    }
}
