use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Context as _;
use rand::Rng as _;
use serde::Serialize;
use skyhop_brain::Controller;
use skyhop_engine::{GameSession, World, WorldSeed, WorldSnapshot};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to the generation export (JSON format)
    #[arg(long)]
    model: PathBuf,
    /// Index of the genome in the export, 0 being the best
    #[arg(long, default_value_t = 0)]
    rank: usize,
    /// World seed as 32 hex characters; random when omitted
    #[arg(long)]
    seed: Option<WorldSeed>,
    /// Give up after this many ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
    /// Write every frame snapshot to this file, one JSON object per line
    #[arg(long)]
    frames: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
enum Finish {
    Won,
    GameOver,
    TickLimit,
}

#[derive(Debug, Serialize)]
struct PlayOutcome {
    seed: String,
    rank: usize,
    finish: Finish,
    ticks: u64,
    score: u32,
    level: u32,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let export = util::read_export_file(&arg.model)?;
    let genomes = export
        .genomes()
        .with_context(|| format!("Invalid generation export: {}", arg.model.display()))?;
    let count = genomes.len();
    let genome = genomes.into_iter().nth(arg.rank).with_context(|| {
        format!(
            "Rank {} is out of range, the export holds {count} genomes",
            arg.rank
        )
    })?;

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut world = World::new(seed);
    let frame_log = match &arg.frames {
        Some(path) => {
            let log = Arc::new(Mutex::new(FrameLog::create(path)?));
            let sink = Arc::clone(&log);
            world.bind_observer(Box::new(move |snapshot: &WorldSnapshot<'_>| {
                if let Ok(mut log) = sink.lock() {
                    log.write_frame(snapshot);
                }
            }));
            Some((log, path))
        }
        None => None,
    };

    let mut session = GameSession::new(world, Controller::new(genome));
    while !session.world().is_terminal() && session.world().ticks() < arg.max_ticks {
        session
            .increment_frame()
            .with_context(|| format!("Controller failed at tick {}", session.world().ticks()))?;
    }

    if let Some((log, path)) = frame_log {
        let mut log = log
            .lock()
            .map_err(|_| anyhow::anyhow!("Frame log lock was poisoned"))?;
        log.finish()
            .with_context(|| format!("Failed to write frames to {}", path.display()))?;
    }

    let world = session.world();
    let finish = if world.is_game_won() {
        Finish::Won
    } else if world.is_game_over() {
        Finish::GameOver
    } else {
        Finish::TickLimit
    };
    let outcome = PlayOutcome {
        seed: seed.to_string(),
        rank: arg.rank,
        finish,
        ticks: world.ticks(),
        score: world.score(),
        level: world.level(),
    };
    util::write_json_output(&outcome, None)
}

/// JSON-lines sink for frame snapshots.
///
/// Observers cannot fail, so the first write error is kept and reported by
/// [`FrameLog::finish`]; later frames are dropped.
#[derive(Debug)]
struct FrameLog {
    writer: BufWriter<File>,
    error: Option<serde_json::Error>,
}

impl FrameLog {
    fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create frames file: {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            error: None,
        })
    }

    fn write_frame(&mut self, snapshot: &WorldSnapshot<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, snapshot)
            .and_then(|()| writeln!(self.writer).map_err(serde_json::Error::io));
        if let Err(error) = result {
            self.error = Some(error);
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        if let Some(error) = self.error.take() {
            return Err(error.into());
        }
        self.writer.flush()?;
        Ok(())
    }
}
