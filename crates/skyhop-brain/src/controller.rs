use skyhop_engine::{ControlMode, Direction, Pilot, World};

use crate::{
    InferenceError,
    features::extract,
    genome::{FEATURE_COUNT, Genome},
};

/// A genome plus the feature vector it will be asked about next.
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    genome: Genome,
    input: Option<[f32; FEATURE_COUNT]>,
}

impl Controller {
    #[must_use]
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            input: None,
        }
    }

    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    #[must_use]
    pub fn into_genome(self) -> Genome {
        self.genome
    }

    pub fn set_input(&mut self, features: [f32; FEATURE_COUNT]) {
        self.input = Some(features);
    }

    /// Decides on the input set by [`Controller::set_input`].
    pub fn infer(&self) -> Result<Direction, InferenceError> {
        let features = self.input.as_ref().ok_or(InferenceError::UninitializedInput)?;
        self.genome.decide(features)
    }

    pub fn infer_with(&mut self, features: [f32; FEATURE_COUNT]) -> Result<Direction, InferenceError> {
        self.set_input(features);
        self.infer()
    }
}

impl Pilot for Controller {
    type Error = InferenceError;

    fn steer(&mut self, world: &World) -> Result<Direction, Self::Error> {
        self.infer_with(extract(world))
    }

    fn control_mode(&self) -> ControlMode {
        ControlMode::Ai
    }
}

#[cfg(test)]
mod tests {
    use skyhop_engine::{GameSession, WorldSeed};

    use super::*;
    use crate::genome::GenomeRecord;

    #[test]
    fn test_infer_requires_input() {
        let controller = Controller::new(Genome::ZERO);
        assert_eq!(controller.infer(), Err(InferenceError::UninitializedInput));
    }

    #[test]
    fn test_infer_uses_latest_input() {
        // logit 1 follows feature 0, the others stay at zero
        let mut record = GenomeRecord::from(Genome::ZERO);
        record.weight_matrix[0][0] = 1.0;
        record.output_weight_matrix[1][0] = 1.0;
        let genome = Genome::try_from(record).unwrap();

        let mut controller = Controller::new(genome);
        controller.set_input([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(controller.infer(), Ok(Direction::Right));
        assert_eq!(
            controller.infer_with([0.0; FEATURE_COUNT]),
            Ok(Direction::Left)
        );
    }

    #[test]
    fn test_controller_steers_a_session() {
        let world = World::new(WorldSeed::from_u64(11));
        let mut session = GameSession::new(world, Controller::new(Genome::ZERO));
        assert!(session.control_mode().is_ai());
        for _ in 0..30 {
            session.increment_frame().unwrap();
        }
        // the zero genome always ties and goes left
        assert_eq!(session.world().direction(), Direction::Left);
        assert!(session.pilot().infer().is_ok());
    }

    #[test]
    fn test_broken_genome_fails_to_steer() {
        let mut genome = Genome::ZERO;
        if let Some(param) = genome.params_mut().last() {
            *param = f32::NAN;
        }
        let mut session =
            GameSession::new(World::new(WorldSeed::from_u64(12)), Controller::new(genome));
        assert_eq!(
            session.increment_frame(),
            Err(InferenceError::NonFiniteOutput)
        );
        assert_eq!(session.world().ticks(), 0);
    }
}
