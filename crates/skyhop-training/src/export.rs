use serde::{Deserialize, Serialize};
use skyhop_brain::{Genome, GenomeRecord, GenomeShapeError};

use crate::ConfigError;

/// The genome exchange document: a generation index and its ranked top genomes.
///
/// ```json
/// { "generation": 5, "topAIs": [ { "inputBiasVector": [...], ... } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationExport {
    pub generation: u64,
    #[serde(rename = "topAIs")]
    pub top_ais: Vec<GenomeRecord>,
}

impl GenerationExport {
    #[must_use]
    pub fn new<'a, I>(generation: u64, genomes: I) -> Self
    where
        I: IntoIterator<Item = &'a Genome>,
    {
        Self {
            generation,
            top_ais: genomes
                .into_iter()
                .map(|genome| genome.clone().into())
                .collect(),
        }
    }

    /// Validates every record and returns the genomes in rank order.
    pub fn genomes(&self) -> Result<Vec<Genome>, LoadError> {
        self.top_ais
            .iter()
            .enumerate()
            .map(|(index, record)| {
                Genome::try_from(record.clone()).map_err(|source| LoadError::Genome { index, source })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("topAIs[{index}] is malformed: {source}")]
    Genome {
        index: usize,
        source: GenomeShapeError,
    },
    #[display("cannot build a population from the export: {source}")]
    Config { source: ConfigError },
}
