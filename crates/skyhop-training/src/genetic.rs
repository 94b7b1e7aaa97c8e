//! Genetic algorithm over controller genomes.
//!
//! A [`Population`] owns a fixed number of [`PopulationEntry`]s, each a world
//! steered by its own controller. Entries never observe each other.
//!
//! # Algorithm Overview
//!
//! 1. **Play** - Every active entry is advanced one tick at a time until all
//!    of them have stopped (game over, won, stagnated or failed)
//! 2. **Rank** - Entries are sorted by final score, best first. Ties keep
//!    population order
//! 3. **Elite Selection** - The top `elite_count` genomes are carried over unchanged
//! 4. **Crossover** - Two parents are drawn uniformly, with replacement, from
//!    the elites and averaged parameter by parameter
//! 5. **Mutation** - Each parameter of the child is perturbed with a fixed
//!    probability (see [`Mutation`])
//! 6. **Reset** - Every world is rebuilt, from a fresh seed unless
//!    [`TrainerConfig::reseed_worlds`] is off, and the loop restarts
//!
//! # Stagnation
//!
//! An entry whose score has not increased for more than
//! [`TrainerConfig::stagnation_ticks`] consecutive ticks is stopped even
//! though its world is not terminal. This bounds the length of a generation
//! when a controller learns to bounce in place.
//!
//! # Failure Isolation
//!
//! If a controller produces a non-finite output, or its world state stops
//! being finite, only that entry is stopped with [`EntryStatus::Failed`]. Its
//! score is frozen and the rest of the population keeps running.
//!
//! # Parallelization
//!
//! With [`Parallelism::Threads`], the entries are split into chunks advanced
//! on scoped threads. Each chunk ticks its entries in lockstep and checks the
//! stop flag every tick; joining the scope is the barrier before breeding.
//! Since entries are independent and every random draw of a world comes
//! from that world's own generator, the outcome is identical to the
//! sequential mode.

use std::{
    cmp::Reverse,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::Serialize;
use skyhop_brain::{Controller, Genome};
use skyhop_engine::{FrameObserver, GameSession, World, WorldSeed};

use crate::{
    ConfigError, GenerationExport, GenerationReport, LoadError, Parallelism, TrainerConfig,
    operators::{Mutation, crossover_mean},
};

/// Why an entry is, or is no longer, running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Active,
    GameOver,
    Won,
    Stagnated,
    Failed,
}

/// One population slot: a world, the controller steering it and its fitness tracking.
#[derive(Debug)]
pub struct PopulationEntry {
    session: GameSession<Controller>,
    last_score: u32,
    no_score_increase_ticks: u32,
    status: EntryStatus,
}

impl PopulationEntry {
    #[must_use]
    pub fn new(world: World, genome: Genome) -> Self {
        Self {
            session: GameSession::new(world, Controller::new(genome)),
            last_score: 0,
            no_score_increase_ticks: 0,
            status: EntryStatus::Active,
        }
    }

    #[must_use]
    pub fn world(&self) -> &World {
        self.session.world()
    }

    #[must_use]
    pub fn genome(&self) -> &Genome {
        self.session.pilot().genome()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.world().score()
    }

    #[must_use]
    pub fn status(&self) -> EntryStatus {
        self.status
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    #[must_use]
    pub fn no_score_increase_ticks(&self) -> u32 {
        self.no_score_increase_ticks
    }

    /// Runs one tick: features, inference, direction, world step, bookkeeping.
    pub fn tick(&mut self, stagnation_ticks: u32) {
        if !self.status.is_active() {
            return;
        }
        if let Err(error) = self.session.increment_frame() {
            tracing::warn!(%error, score = self.score(), "controller failed, entry stopped");
            self.status = EntryStatus::Failed;
            return;
        }

        let world = self.session.world();
        self.status = if !world.is_consistent() {
            tracing::warn!(
                tick = world.ticks(),
                "world state became non-finite, entry stopped"
            );
            EntryStatus::Failed
        } else if world.is_game_won() {
            EntryStatus::Won
        } else if world.is_game_over() {
            EntryStatus::GameOver
        } else if world.score() > self.last_score {
            self.last_score = world.score();
            self.no_score_increase_ticks = 0;
            EntryStatus::Active
        } else {
            self.no_score_increase_ticks += 1;
            if self.no_score_increase_ticks > stagnation_ticks {
                EntryStatus::Stagnated
            } else {
                EntryStatus::Active
            }
        };
    }

    /// Restores the world to its initial layout and clears the tracking fields.
    pub fn restart(&mut self) {
        self.session.world_mut().reset();
        self.clear_tracking();
    }

    /// Swaps in a new genome and starts over on the course of `seed`.
    fn restart_with(&mut self, genome: Genome, seed: WorldSeed) {
        *self.session.pilot_mut() = Controller::new(genome);
        self.session.world_mut().reseed(seed);
        self.clear_tracking();
    }

    fn clear_tracking(&mut self) {
        self.last_score = 0;
        self.no_score_increase_ticks = 0;
        self.status = EntryStatus::Active;
    }
}

/// Cloneable flag used to cancel a running generation.
///
/// The request is observed at the top of the next tick. A cancelled
/// generation never completes and is not bred. [`Population::start`] clears
/// the flag again.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum GenerationOutcome {
    Completed(GenerationReport),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("slot {slot} is out of range for a population of {len}")]
pub struct SlotOutOfRange {
    slot: usize,
    len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("generation is still running with {active} active entries")]
pub struct GenerationInProgress {
    active: usize,
}

/// The population of one training run.
#[derive(Debug)]
pub struct Population {
    config: TrainerConfig,
    mutation: Mutation,
    entries: Vec<PopulationEntry>,
    generation: u64,
    rng: Pcg32,
    stop: StopHandle,
}

impl Population {
    /// Creates a population of random genomes, each paired with a world whose
    /// seed is drawn from `rng`.
    pub fn new(config: TrainerConfig, rng: Pcg32) -> Result<Self, ConfigError> {
        Self::build(config, rng, Vec::new(), 0)
    }

    /// Creates a population seeded from an exported generation.
    ///
    /// The exported genomes fill the first slots in rank order. Missing slots
    /// get random genomes; genomes beyond the population size are ignored.
    /// The generation counter continues from the export.
    pub fn from_export(
        config: TrainerConfig,
        rng: Pcg32,
        export: &GenerationExport,
    ) -> Result<Self, LoadError> {
        let mut genomes = export.genomes()?;
        if genomes.len() > config.population_size {
            tracing::warn!(
                exported = genomes.len(),
                population_size = config.population_size,
                "export has more genomes than the population, extra genomes ignored"
            );
            genomes.truncate(config.population_size);
        }
        Self::build(config, rng, genomes, export.generation)
            .map_err(|source| LoadError::Config { source })
    }

    fn build(
        config: TrainerConfig,
        mut rng: Pcg32,
        mut genomes: Vec<Genome>,
        generation: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mutation = Mutation::new(config.mutation_rate, config.mutation_range)?;

        let loaded = genomes.len();
        while genomes.len() < config.population_size {
            genomes.push(Genome::random(&mut rng));
        }
        let entries = genomes
            .into_iter()
            .map(|genome| PopulationEntry::new(World::new(rng.random()), genome))
            .collect::<Vec<_>>();
        tracing::debug!(
            population_size = entries.len(),
            loaded,
            generation,
            "population created"
        );

        Ok(Self {
            config,
            mutation,
            entries,
            generation,
            rng,
            stop: StopHandle::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Number of completed generations.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn entries(&self) -> &[PopulationEntry] {
        &self.entries
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_active()).count()
    }

    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Clears a pending stop request and restarts the current generation.
    ///
    /// Every entry replays its course from the beginning with the genome it
    /// already has. Nothing is bred and the generation counter is unchanged.
    pub fn start(&mut self) {
        self.stop.resume();
        for entry in &mut self.entries {
            entry.restart();
        }
        tracing::debug!(generation = self.generation + 1, "generation restarted");
    }

    /// Advances every active entry by one tick, in population order.
    ///
    /// Does nothing once a stop was requested. Returns the number of entries
    /// still active.
    pub fn tick(&mut self) -> usize {
        if !self.stop.is_stopped() {
            tick_all(&mut self.entries, self.config.stagnation_ticks);
        }
        self.active_count()
    }

    /// Plays the current generation to the end, then breeds the next one.
    ///
    /// Returns [`GenerationOutcome::Cancelled`] without breeding if a stop was
    /// requested before every entry stopped.
    pub fn run_generation(&mut self) -> GenerationOutcome {
        let stagnation_ticks = self.config.stagnation_ticks;
        let stop = &self.stop;
        match self.config.parallelism {
            Parallelism::Sequential => {
                run_until_settled(&mut self.entries, stagnation_ticks, stop);
            }
            Parallelism::Threads(threads) => {
                let chunk_len = self.entries.len().div_ceil(threads).max(1);
                thread::scope(|s| {
                    for chunk in self.entries.chunks_mut(chunk_len) {
                        s.spawn(move || run_until_settled(chunk, stagnation_ticks, stop));
                    }
                });
            }
        }

        let active = self.active_count();
        if active > 0 {
            tracing::info!(
                generation = self.generation + 1,
                active,
                "generation cancelled"
            );
            return GenerationOutcome::Cancelled;
        }

        let report = self.report();
        tracing::info!(
            generation = report.generation,
            best_score = report.best_score,
            mean_score = report.mean_score,
            "generation completed"
        );
        self.breed();
        GenerationOutcome::Completed(report)
    }

    /// Summarizes the current generation as if it ended now.
    #[must_use]
    pub fn report(&self) -> GenerationReport {
        GenerationReport::from_ranked(
            self.generation + 1,
            &self.ranked(),
            self.config.elite_count,
        )
    }

    /// Entries sorted by score, best first. Equal scores keep population order.
    #[must_use]
    pub fn ranked(&self) -> Vec<&PopulationEntry> {
        let mut ranked = self.entries.iter().collect::<Vec<_>>();
        ranked.sort_by_key(|e| Reverse(e.score()));
        ranked
    }

    /// Breeds the next generation from the finished one.
    pub fn evolve(&mut self) -> Result<(), GenerationInProgress> {
        let active = self.active_count();
        if active > 0 {
            return Err(GenerationInProgress { active });
        }
        self.breed();
        Ok(())
    }

    fn breed(&mut self) {
        let elites = self
            .ranked()
            .into_iter()
            .take(self.config.elite_count)
            .map(|e| e.genome().clone())
            .collect::<Vec<_>>();

        let mut next = elites.clone();
        while next.len() < self.entries.len() {
            let a = &elites[self.rng.random_range(0..elites.len())];
            let b = &elites[self.rng.random_range(0..elites.len())];
            let mut child = crossover_mean(a, b);
            self.mutation.apply(&mut child, &mut self.rng);
            next.push(child);
        }

        for (entry, genome) in self.entries.iter_mut().zip(next) {
            let seed = if self.config.reseed_worlds {
                self.rng.random()
            } else {
                entry.world().seed()
            };
            entry.restart_with(genome, seed);
        }
        self.generation += 1;
        tracing::debug!(generation = self.generation, "next generation bred");
    }

    /// Restores one slot's world to its initial layout. The genome is kept.
    pub fn reset_world(&mut self, slot: usize) -> Result<(), SlotOutOfRange> {
        self.entry_mut(slot)?.restart();
        Ok(())
    }

    /// Attaches a display collaborator to one slot's world.
    pub fn bind_observer(
        &mut self,
        slot: usize,
        observer: Box<dyn FrameObserver>,
    ) -> Result<(), SlotOutOfRange> {
        self.entry_mut(slot)?
            .session
            .world_mut()
            .bind_observer(observer);
        Ok(())
    }

    fn entry_mut(&mut self, slot: usize) -> Result<&mut PopulationEntry, SlotOutOfRange> {
        let len = self.entries.len();
        self.entries
            .get_mut(slot)
            .ok_or(SlotOutOfRange { slot, len })
    }
}

fn tick_all(entries: &mut [PopulationEntry], stagnation_ticks: u32) {
    for entry in entries {
        entry.tick(stagnation_ticks);
    }
}

fn run_until_settled(entries: &mut [PopulationEntry], stagnation_ticks: u32, stop: &StopHandle) {
    while !stop.is_stopped() && entries.iter().any(PopulationEntry::is_active) {
        tick_all(entries, stagnation_ticks);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rand::SeedableRng as _;
    use skyhop_brain::GenomeRecord;
    use skyhop_engine::WorldSnapshot;

    use super::*;

    fn small_config() -> TrainerConfig {
        TrainerConfig {
            population_size: 6,
            elite_count: 2,
            stagnation_ticks: 60,
            ..TrainerConfig::default()
        }
    }

    /// A genome whose only non-zero logit is "no movement".
    fn idle_genome() -> Genome {
        let mut record = GenomeRecord::from(Genome::ZERO);
        record.output_bias_vector = vec![0.0, 0.0, 1.0];
        Genome::try_from(record).unwrap()
    }

    #[test]
    fn test_new_population_is_active() {
        let population = Population::new(small_config(), Pcg32::seed_from_u64(1)).unwrap();
        assert_eq!(population.entries().len(), 6);
        assert_eq!(population.generation(), 0);
        assert_eq!(population.active_count(), 6);

        let config = TrainerConfig {
            elite_count: 7,
            ..small_config()
        };
        assert!(matches!(
            Population::new(config, Pcg32::seed_from_u64(1)),
            Err(ConfigError::EliteCount { .. })
        ));
    }

    #[test]
    fn test_load_fills_missing_slots_with_random_genomes() {
        let mut rng = Pcg32::seed_from_u64(2);
        let persisted = (0..3).map(|_| Genome::random(&mut rng)).collect::<Vec<_>>();
        let export = GenerationExport::new(5, &persisted);
        let config = TrainerConfig {
            population_size: 10,
            elite_count: 3,
            ..TrainerConfig::default()
        };

        let population = Population::from_export(config, Pcg32::seed_from_u64(3), &export).unwrap();
        assert_eq!(population.generation(), 5);
        assert_eq!(population.entries().len(), 10);
        for (entry, genome) in population.entries().iter().zip(&persisted) {
            assert_eq!(entry.genome(), genome);
        }
        for entry in &population.entries()[3..] {
            assert!(!persisted.contains(entry.genome()));
            assert!(entry.genome().params().all(|p| (-1.0..=1.0).contains(&p)));
        }
    }

    #[test]
    fn test_load_ignores_extra_genomes() {
        let genomes = [0.0, 0.1, 0.2, 0.3]
            .map(|value| Genome::from_fn(|_| value))
            .to_vec();
        let export = GenerationExport::new(2, &genomes);
        let config = TrainerConfig {
            population_size: 3,
            elite_count: 1,
            ..TrainerConfig::default()
        };
        let population = Population::from_export(config, Pcg32::seed_from_u64(4), &export).unwrap();
        let loaded = population
            .entries()
            .iter()
            .map(|e| e.genome().clone())
            .collect::<Vec<_>>();
        assert_eq!(loaded, genomes[..3]);
    }

    #[test]
    fn test_load_rejects_malformed_genome() {
        let mut record = GenomeRecord::from(Genome::ZERO);
        record.weight_matrix.pop();
        let export = GenerationExport {
            generation: 1,
            top_ais: vec![GenomeRecord::from(Genome::ZERO), record],
        };
        let err = Population::from_export(small_config(), Pcg32::seed_from_u64(5), &export)
            .unwrap_err();
        assert!(matches!(err, LoadError::Genome { index: 1, .. }));
    }

    #[test]
    fn test_zero_stagnation_stops_on_first_flat_tick() {
        let mut entry = PopulationEntry::new(World::new(WorldSeed::from_u64(6)), idle_genome());
        let mut last = entry.score();
        for _ in 0..1_000 {
            entry.tick(0);
            let score = entry.score();
            if score <= last {
                assert!(
                    entry.status().is_stagnated() || entry.status().is_game_over(),
                    "{:?}",
                    entry.status()
                );
                return;
            }
            assert!(entry.is_active());
            last = score;
        }
        panic!("score kept increasing");
    }

    #[test]
    fn test_stagnation_counts_consecutive_flat_ticks() {
        const LIMIT: u32 = 20;
        for seed in 0..5 {
            let mut entry =
                PopulationEntry::new(World::new(WorldSeed::from_u64(seed)), idle_genome());
            let mut best = 0;
            let mut flat = 0;
            while entry.is_active() {
                entry.tick(LIMIT);
                if entry.score() > best {
                    best = entry.score();
                    flat = 0;
                } else {
                    flat += 1;
                }
                match entry.status() {
                    EntryStatus::Active => assert!(flat <= LIMIT),
                    EntryStatus::Stagnated => assert_eq!(flat, LIMIT + 1),
                    _ => {}
                }
                assert!(entry.world().ticks() < 100_000);
            }
        }
    }

    #[test]
    fn test_failed_entry_is_isolated() {
        let mut broken = Genome::ZERO;
        if let Some(param) = broken.params_mut().last() {
            *param = f32::NAN;
        }
        let mut entry = PopulationEntry::new(World::new(WorldSeed::from_u64(7)), broken);
        entry.tick(300);
        assert_eq!(entry.status(), EntryStatus::Failed);
        assert_eq!(entry.score(), 0);

        entry.tick(300);
        assert_eq!(entry.world().ticks(), 0);
    }

    #[test]
    fn test_idle_entry_stagnates_in_place() {
        for seed in 0..5 {
            let mut entry =
                PopulationEntry::new(World::new(WorldSeed::from_u64(seed)), idle_genome());
            while entry.is_active() {
                entry.tick(300);
                assert!(entry.world().ticks() < 100_000, "entry never stopped");
            }
            assert_eq!(entry.status(), EntryStatus::Stagnated, "seed {seed}");
            assert!(!entry.world().is_terminal());
        }
    }

    #[test]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn test_left_steering_entry_falls_with_score_equal_to_scroll() {
        let mut record = GenomeRecord::from(Genome::ZERO);
        record.output_bias_vector = vec![1.0, 0.0, 0.0];
        let genome = Genome::try_from(record).unwrap();
        let export = GenerationExport::new(0, [&genome]);
        let config = TrainerConfig {
            population_size: 1,
            elite_count: 1,
            ..TrainerConfig::default()
        };
        let mut population =
            Population::from_export(config, Pcg32::seed_from_u64(8), &export).unwrap();

        let mut scrolled = 0;
        loop {
            let finish_y = population.entries()[0].world().finish_line().position.y;
            let active = population.tick();
            let world = population.entries()[0].world();
            let moved = world.finish_line().position.y - finish_y;
            assert!((moved - world.last_scroll()).abs() < 1e-2);
            scrolled += world.last_scroll().floor() as u32;
            if active == 0 {
                break;
            }
            assert!(world.ticks() < 10_000, "entry never fell");
        }

        let entry = &population.entries()[0];
        assert_eq!(entry.status(), EntryStatus::GameOver);
        assert!(entry.world().is_game_over());
        assert!(scrolled > 0);
        assert_eq!(entry.score(), scrolled);
        assert_eq!(population.report().best_score, scrolled);
    }

    #[test]
    fn test_run_generation_reports_and_breeds() {
        let mut population = Population::new(small_config(), Pcg32::seed_from_u64(9)).unwrap();
        let GenerationOutcome::Completed(report) = population.run_generation() else {
            panic!("generation was not completed");
        };
        assert_eq!(report.generation, 1);
        assert_eq!(report.top_genomes.len(), 2);
        assert!(report.best_score >= report.worst_score);
        assert!(f64::from(report.best_score) >= report.mean_score);
        let counts = report.statuses;
        assert_eq!(
            counts.game_over + counts.won + counts.stagnated + counts.failed,
            6
        );

        assert_eq!(population.generation(), 1);
        assert_eq!(population.active_count(), 6);
        for (entry, elite) in population.entries().iter().zip(&report.top_genomes) {
            assert_eq!(entry.genome(), elite);
            assert_eq!(entry.world().ticks(), 0);
        }
        assert_eq!(report.to_export().generation, 1);
    }

    #[test]
    fn test_threaded_run_matches_sequential() {
        let run = |parallelism| {
            let config = TrainerConfig {
                parallelism,
                ..small_config()
            };
            let mut population = Population::new(config, Pcg32::seed_from_u64(10)).unwrap();
            (0..2)
                .map(|_| population.run_generation())
                .collect::<Vec<_>>()
        };
        let sequential = run(Parallelism::Sequential);
        assert!(sequential.iter().all(GenerationOutcome::is_completed));
        assert_eq!(run(Parallelism::Threads(4)), sequential);
        assert_eq!(run(Parallelism::Threads(16)), sequential);
    }

    #[test]
    fn test_cancelled_generation_does_not_breed() {
        let mut population = Population::new(small_config(), Pcg32::seed_from_u64(11)).unwrap();
        let before = population
            .entries()
            .iter()
            .map(|e| e.genome().clone())
            .collect::<Vec<_>>();

        population.tick();
        population.stop_handle().stop();
        assert!(population.run_generation().is_cancelled());
        assert_eq!(population.generation(), 0);
        assert!(population.active_count() > 0);
        assert_eq!(population.tick(), population.active_count());
        for (entry, genome) in population.entries().iter().zip(&before) {
            assert_eq!(entry.genome(), genome);
        }
        assert!(population.evolve().is_err());
    }

    #[test]
    fn test_start_resumes_after_stop() {
        let mut population = Population::new(small_config(), Pcg32::seed_from_u64(15)).unwrap();
        let stop = population.stop_handle();
        population.tick();
        stop.stop();
        assert!(population.run_generation().is_cancelled());
        assert!(population.run_generation().is_cancelled());

        population.start();
        assert!(!stop.is_stopped());
        assert_eq!(population.generation(), 0);
        assert!(
            population
                .entries()
                .iter()
                .all(|e| e.is_active() && e.world().ticks() == 0)
        );
        assert!(population.run_generation().is_completed());
        assert_eq!(population.generation(), 1);
    }

    #[test]
    fn test_breeding_reseeds_worlds_unless_disabled() {
        let seeds = |population: &Population| {
            population
                .entries()
                .iter()
                .map(|e| e.world().seed())
                .collect::<Vec<_>>()
        };

        let mut population = Population::new(small_config(), Pcg32::seed_from_u64(16)).unwrap();
        let before = seeds(&population);
        assert!(population.run_generation().is_completed());
        let after = seeds(&population);
        assert!(before.iter().zip(&after).all(|(a, b)| a != b));

        let config = TrainerConfig {
            reseed_worlds: false,
            ..small_config()
        };
        let mut population = Population::new(config, Pcg32::seed_from_u64(16)).unwrap();
        let before = seeds(&population);
        assert!(population.run_generation().is_completed());
        assert_eq!(seeds(&population), before);
    }

    #[test]
    fn test_ranking_is_stable() {
        let population = Population::new(small_config(), Pcg32::seed_from_u64(12)).unwrap();
        let ranked = population.ranked();
        for (ranked, entry) in ranked.iter().zip(population.entries()) {
            assert!(std::ptr::eq(*ranked, entry));
        }
    }

    #[test]
    fn test_reset_world_and_observer_by_slot() {
        let mut population = Population::new(small_config(), Pcg32::seed_from_u64(13)).unwrap();
        let frames = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&frames);
        population
            .bind_observer(
                1,
                Box::new(move |snapshot: &WorldSnapshot<'_>| {
                    sink.lock().unwrap().push(snapshot.tick);
                }),
            )
            .unwrap();
        for _ in 0..3 {
            population.tick();
        }
        assert_eq!(*frames.lock().unwrap(), vec![1, 2, 3]);

        population.reset_world(1).unwrap();
        assert_eq!(population.entries()[1].world().ticks(), 0);
        assert!(population.entries()[1].is_active());
        assert_eq!(
            population.reset_world(6),
            Err(SlotOutOfRange { slot: 6, len: 6 })
        );
    }
}
