use serde::Serialize;
use skyhop_brain::Genome;

use crate::{EntryStatus, GenerationExport, PopulationEntry};

/// How many entries ended a generation in each way.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub game_over: usize,
    pub won: usize,
    pub stagnated: usize,
    pub failed: usize,
}

impl StatusCounts {
    fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = EntryStatus>,
    {
        let mut counts = Self::default();
        for status in statuses {
            match status {
                EntryStatus::Active => {}
                EntryStatus::GameOver => counts.game_over += 1,
                EntryStatus::Won => counts.won += 1,
                EntryStatus::Stagnated => counts.stagnated += 1,
                EntryStatus::Failed => counts.failed += 1,
            }
        }
        counts
    }
}

/// Summary of one completed generation.
///
/// Reports are observational: nothing in the trainer reads them back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    /// 1-based index of the generation this report describes.
    pub generation: u64,
    pub mean_score: f64,
    pub median_score: f64,
    pub best_score: u32,
    pub worst_score: u32,
    pub statuses: StatusCounts,
    /// Genomes of the top entries, best first.
    pub top_genomes: Vec<Genome>,
}

impl GenerationReport {
    /// Builds a report from entries ranked best first.
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn from_ranked(generation: u64, ranked: &[&PopulationEntry], top: usize) -> Self {
        let scores = ranked.iter().map(|e| e.score()).collect::<Vec<_>>();
        let count = scores.len().max(1) as f64;
        let mean_score = scores.iter().copied().map(f64::from).sum::<f64>() / count;

        let mid = scores.len() / 2;
        let median_score = match scores.len() {
            0 => 0.0,
            n if n % 2 == 1 => f64::from(scores[mid]),
            _ => (f64::from(scores[mid - 1]) + f64::from(scores[mid])) / 2.0,
        };

        Self {
            generation,
            mean_score,
            median_score,
            best_score: scores.first().copied().unwrap_or(0),
            worst_score: scores.last().copied().unwrap_or(0),
            statuses: StatusCounts::tally(ranked.iter().map(|e| e.status())),
            top_genomes: ranked
                .iter()
                .take(top)
                .map(|e| e.genome().clone())
                .collect(),
        }
    }

    /// Converts the report into the genome exchange document.
    #[must_use]
    pub fn to_export(&self) -> GenerationExport {
        GenerationExport::new(self.generation, &self.top_genomes)
    }
}
