//! Feature extraction: what a controller sees of the world.
//!
//! The vector is fixed-length and ordered as [`FeatureKind::ALL`]. Training
//! and inference both go through [`extract`], so the order never drifts
//! from what a genome was evolved against.
//!
//! Horizontal offsets are divided by the world width and vertical distances
//! by the world height. Platforms that are already falling are ignored.

use skyhop_engine::{JUMP_FORCE, Platform, WORLD_HEIGHT, WORLD_WIDTH, World};

use crate::genome::FEATURE_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Offset from the agent's centre to the nearest platform at or below its feet.
    BelowDx,
    /// Distance from the feet down to that platform. 1 when there is none.
    BelowDy,
    /// Offset to the nearest platform above the feet.
    AboveDx,
    /// Distance from the feet up to that platform. 1 when there is none.
    AboveDy,
    /// Vertical speed as a fraction of the jump force, negative while rising.
    VerticalVelocity,
    /// Agent centre across the screen, 0 at the left edge.
    HorizontalPosition,
}

impl FeatureKind {
    pub const ALL: [Self; FEATURE_COUNT] = [
        Self::BelowDx,
        Self::BelowDy,
        Self::AboveDx,
        Self::AboveDy,
        Self::VerticalVelocity,
        Self::HorizontalPosition,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::BelowDx => "below_dx",
            Self::BelowDy => "below_dy",
            Self::AboveDx => "above_dx",
            Self::AboveDy => "above_dy",
            Self::VerticalVelocity => "vertical_velocity",
            Self::HorizontalPosition => "horizontal_position",
        }
    }

    fn measure(self, view: &Surroundings<'_>) -> f32 {
        match self {
            Self::BelowDx => view.below.map_or(0.0, |p| view.dx(p)),
            Self::BelowDy => view
                .below
                .map_or(1.0, |p| (p.y() - view.feet) / WORLD_HEIGHT),
            Self::AboveDx => view.above.map_or(0.0, |p| view.dx(p)),
            Self::AboveDy => view
                .above
                .map_or(1.0, |p| (view.feet - p.y()) / WORLD_HEIGHT),
            Self::VerticalVelocity => view.gravity_speed / JUMP_FORCE,
            Self::HorizontalPosition => view.center_x / WORLD_WIDTH,
        }
    }
}

struct Surroundings<'a> {
    center_x: f32,
    feet: f32,
    gravity_speed: f32,
    below: Option<&'a Platform>,
    above: Option<&'a Platform>,
}

impl<'a> Surroundings<'a> {
    fn scan(world: &'a World) -> Self {
        let position = world.position();
        let hitbox = world.hitbox();
        let center_x = position.x + hitbox.width / 2.0;
        let feet = position.y + hitbox.height;

        let targets = || world.platforms().iter().filter(|p| !p.is_falling());
        let below = targets()
            .filter(|p| p.y() >= feet)
            .min_by(|a, b| a.y().total_cmp(&b.y()));
        let above = targets()
            .filter(|p| p.y() < feet)
            .max_by(|a, b| a.y().total_cmp(&b.y()));

        Self {
            center_x,
            feet,
            gravity_speed: world.gravity_speed(),
            below,
            above,
        }
    }

    fn dx(&self, platform: &Platform) -> f32 {
        (platform.center_x() - self.center_x) / WORLD_WIDTH
    }
}

/// Builds the controller input for the current state of `world`.
#[must_use]
pub fn extract(world: &World) -> [f32; FEATURE_COUNT] {
    let view = Surroundings::scan(world);
    FeatureKind::ALL.map(|kind| kind.measure(&view))
}

#[cfg(test)]
mod tests {
    use skyhop_engine::{Direction, WorldSeed};

    use super::*;

    #[test]
    fn test_feature_order_matches_discriminants() {
        for (i, kind) in FeatureKind::ALL.into_iter().enumerate() {
            assert_eq!(kind as usize, i, "{}", kind.id());
        }
    }

    #[test]
    fn test_initial_world_features() {
        let world = World::new(WorldSeed::from_u64(21));
        let features = extract(&world);

        // standing centred on the start platform
        assert!(features[FeatureKind::BelowDx as usize].abs() < 1e-6);
        assert!(features[FeatureKind::BelowDy as usize].abs() < 1e-6);
        assert!(features[FeatureKind::AboveDy as usize] > 0.0);
        assert!(features[FeatureKind::AboveDy as usize] <= 1.0);
        assert!(features[FeatureKind::VerticalVelocity as usize].abs() < f32::EPSILON);
        let expected_x = (130.0 + 57.0 / 2.0) / WORLD_WIDTH;
        assert!((features[FeatureKind::HorizontalPosition as usize] - expected_x).abs() < 1e-6);
    }

    #[test]
    fn test_features_stay_finite_during_play() {
        let mut world = World::new(WorldSeed::from_u64(22));
        world.set_direction(Direction::Right);
        while !world.is_terminal() && world.ticks() < 2_000 {
            world.step();
            let features = extract(&world);
            assert!(features.iter().all(|v| v.is_finite()));
            if world.gravity_speed() < 0.0 {
                assert!(features[FeatureKind::VerticalVelocity as usize] < 0.0);
            }
        }
    }
}
