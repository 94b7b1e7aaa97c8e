use std::{path::PathBuf, thread, time::Duration};

use anyhow::Context as _;
use chrono::Utc;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use skyhop_training::{
    GenerationOutcome, GenerationReport, Parallelism, Population, TrainerConfig,
};

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Trainer configuration file (JSON). Flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of entries per generation
    #[arg(long)]
    population: Option<usize>,
    /// Number of top genomes kept and bred from
    #[arg(long)]
    elite: Option<usize>,
    /// Probability of perturbing each parameter of a child
    #[arg(long)]
    mutation_rate: Option<f64>,
    /// Half-width of the uniform perturbation
    #[arg(long)]
    mutation_range: Option<f32>,
    /// Ticks without score increase before an entry is stopped
    #[arg(long)]
    stagnation_ticks: Option<u32>,
    /// Replay the same courses every generation instead of drawing new ones
    #[arg(long)]
    fixed_worlds: bool,
    /// Advance the population on this many threads
    #[arg(long)]
    threads: Option<usize>,
    /// Number of generations to run
    #[arg(long, default_value_t = 100)]
    generations: u64,
    /// Stop once a generation's best score reaches this value
    #[arg(long)]
    target_score: Option<u32>,
    /// Stop after this many seconds; the running generation is discarded
    #[arg(long)]
    time_limit: Option<u64>,
    /// Seed of the trainer's random generator
    #[arg(long)]
    seed: Option<u64>,
    /// Resume from a generation export
    #[arg(long)]
    load: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn trainer_config(&self) -> anyhow::Result<TrainerConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file::<TrainerConfig>("trainer config", path)?,
            None => TrainerConfig::default(),
        };
        if let Some(population) = self.population {
            config.population_size = population;
        }
        if let Some(elite) = self.elite {
            config.elite_count = elite;
        }
        if let Some(rate) = self.mutation_rate {
            config.mutation_rate = rate;
        }
        if let Some(range) = self.mutation_range {
            config.mutation_range = range;
        }
        if let Some(ticks) = self.stagnation_ticks {
            config.stagnation_ticks = ticks;
        }
        if self.fixed_worlds {
            config.reseed_worlds = false;
        }
        if let Some(threads) = self.threads {
            config.parallelism = Parallelism::Threads(threads);
        }
        config.validate().context("Invalid trainer configuration")?;
        Ok(config)
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.trainer_config()?;
    let rng = match arg.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let mut population = match &arg.load {
        Some(path) => {
            let export = util::read_export_file(path)?;
            Population::from_export(config, rng, &export)
                .with_context(|| format!("Failed to resume from {}", path.display()))?
        }
        None => Population::new(config, rng)?,
    };

    if let Some(seconds) = arg.time_limit {
        let stop = population.stop_handle();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(seconds));
            tracing::info!(seconds, "time limit reached, stopping training");
            stop.stop();
        });
    }

    let started_at = Utc::now();
    let mut last_report = None;
    for _ in 0..arg.generations {
        let report = match population.run_generation() {
            GenerationOutcome::Completed(report) => report,
            GenerationOutcome::Cancelled => {
                eprintln!(
                    "Training stopped, generation #{} discarded",
                    population.generation() + 1
                );
                break;
            }
        };
        print_report(&report);
        let reached = arg
            .target_score
            .is_some_and(|target| report.best_score >= target);
        last_report = Some(report);
        if reached {
            eprintln!("Target score reached");
            break;
        }
    }

    let Some(report) = last_report else {
        anyhow::bail!("No generation completed, nothing to save");
    };
    let export = report.to_export();
    util::write_json_output(&export, arg.output.as_deref())?;

    let finished_at = Utc::now();
    eprintln!();
    eprintln!("Generation saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Generation: {}", export.generation);
    eprintln!("  Best score: {}", report.best_score);
    eprintln!("  Genomes: {}", export.top_ais.len());
    eprintln!("  Trained at: {finished_at}");
    eprintln!(
        "  Elapsed: {}s",
        (finished_at - started_at).num_seconds()
    );

    Ok(())
}

fn print_report(report: &GenerationReport) {
    let GenerationReport {
        generation,
        mean_score,
        median_score,
        best_score,
        worst_score,
        statuses,
        top_genomes: _,
    } = report;
    eprintln!("Generation #{generation}:");
    eprintln!("  Score Stats:");
    eprintln!("    Best:   {best_score}");
    eprintln!("    Worst:  {worst_score}");
    eprintln!("    Mean:   {mean_score:.1}");
    eprintln!("    Median: {median_score:.1}");
    eprintln!("  Outcomes:");
    eprintln!("    Game over: {}", statuses.game_over);
    eprintln!("    Won:       {}", statuses.won);
    eprintln!("    Stagnated: {}", statuses.stagnated);
    eprintln!("    Failed:    {}", statuses.failed);
}
