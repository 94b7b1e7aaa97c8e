//! Fixed-topology network parameters and the forward pass.
//!
//! A [`Genome`] is a two-layer feed-forward network with
//! [`FEATURE_COUNT`] inputs, [`HIDDEN_COUNT`] hidden units and
//! [`OUTPUT_COUNT`] action logits. Both layers use ReLU.
//!
//! The shape is carried by the type. The only place a shape can be wrong is
//! the exchange format, [`GenomeRecord`], whose conversion into a genome
//! validates every layer.

use std::array;

use rand::Rng;
use serde::{Deserialize, Serialize};
use skyhop_engine::Direction;

use crate::InferenceError;

pub const FEATURE_COUNT: usize = 6;
pub const HIDDEN_COUNT: usize = 4;
pub const OUTPUT_COUNT: usize = 3;

/// Total number of scalar parameters in a genome.
pub const PARAM_COUNT: usize =
    HIDDEN_COUNT + HIDDEN_COUNT * FEATURE_COUNT + OUTPUT_COUNT * HIDDEN_COUNT + OUTPUT_COUNT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GenomeRecord", into = "GenomeRecord")]
pub struct Genome {
    input_bias: [f32; HIDDEN_COUNT],
    weight: [[f32; FEATURE_COUNT]; HIDDEN_COUNT],
    output_weight: [[f32; HIDDEN_COUNT]; OUTPUT_COUNT],
    output_bias: [f32; OUTPUT_COUNT],
}

impl Genome {
    pub const ZERO: Self = Self {
        input_bias: [0.0; HIDDEN_COUNT],
        weight: [[0.0; FEATURE_COUNT]; HIDDEN_COUNT],
        output_weight: [[0.0; HIDDEN_COUNT]; OUTPUT_COUNT],
        output_bias: [0.0; OUTPUT_COUNT],
    };

    /// Builds a genome by calling `f` with the index of every parameter, in
    /// [`Genome::params`] order.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize) -> f32,
    {
        let mut genome = Self::ZERO;
        for (i, param) in genome.params_mut().enumerate() {
            *param = f(i);
        }
        genome
    }

    /// Draws every parameter uniformly from `[-1, 1]`.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_fn(|_| rng.random_range(-1.0..=1.0))
    }

    /// Iterates over all parameters: input biases, input weights row by row,
    /// output weights row by row, output biases.
    pub fn params(&self) -> impl Iterator<Item = f32> {
        self.input_bias
            .iter()
            .chain(self.weight.iter().flatten())
            .chain(self.output_weight.iter().flatten())
            .chain(&self.output_bias)
            .copied()
    }

    pub fn params_mut(&mut self) -> impl Iterator<Item = &mut f32> {
        self.input_bias
            .iter_mut()
            .chain(self.weight.iter_mut().flatten())
            .chain(self.output_weight.iter_mut().flatten())
            .chain(&mut self.output_bias)
    }

    /// Combines two genomes parameter by parameter into a new one.
    #[must_use]
    pub fn zip_map<F>(&self, other: &Self, mut f: F) -> Self
    where
        F: FnMut(f32, f32) -> f32,
    {
        let mut child = self.clone();
        for (param, theirs) in child.params_mut().zip(other.params()) {
            *param = f(*param, theirs);
        }
        child
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.params().all(f32::is_finite)
    }

    /// Runs the forward pass and returns the post-ReLU output layer.
    #[must_use]
    pub fn logits(&self, features: &[f32; FEATURE_COUNT]) -> [f32; OUTPUT_COUNT] {
        let hidden: [f32; HIDDEN_COUNT] =
            array::from_fn(|i| relu(self.input_bias[i] + dot(&self.weight[i], features)));
        array::from_fn(|k| relu(self.output_bias[k] + dot(&self.output_weight[k], &hidden)))
    }

    /// Picks the direction of the largest logit. Exact ties go to the lowest index.
    pub fn decide(&self, features: &[f32; FEATURE_COUNT]) -> Result<Direction, InferenceError> {
        let logits = self.logits(features);
        if !logits.iter().all(|v| v.is_finite()) {
            return Err(InferenceError::NonFiniteOutput);
        }
        let mut best = 0;
        for (i, value) in logits.iter().enumerate().skip(1) {
            if *value > logits[best] {
                best = i;
            }
        }
        Ok(Direction::from_action_index(best))
    }
}

fn dot<const N: usize>(a: &[f32; N], b: &[f32; N]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

// NaN passes through so that broken parameters stay detectable.
fn relu(value: f32) -> f32 {
    if value < 0.0 { 0.0 } else { value }
}

/// Layer names as they appear in the exchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Layer {
    #[display("inputBiasVector")]
    InputBias,
    #[display("weightMatrix")]
    Weight,
    #[display("outputWeightMatrix")]
    OutputWeight,
    #[display("outputBiasVector")]
    OutputBias,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenomeShapeError {
    #[display("{layer}: expected {expected} entries, got {actual}")]
    Length {
        layer: Layer,
        expected: usize,
        actual: usize,
    },
    #[display("{layer}: row {row} expected {expected} entries, got {actual}")]
    RowLength {
        layer: Layer,
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("{layer}: contains a non-finite value")]
    NonFinite { layer: Layer },
}

/// Genome as stored in the exchange format, with nested lists instead of
/// fixed arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomeRecord {
    pub input_bias_vector: Vec<f32>,
    pub weight_matrix: Vec<Vec<f32>>,
    pub output_weight_matrix: Vec<Vec<f32>>,
    pub output_bias_vector: Vec<f32>,
}

impl From<Genome> for GenomeRecord {
    fn from(genome: Genome) -> Self {
        Self {
            input_bias_vector: genome.input_bias.to_vec(),
            weight_matrix: genome.weight.iter().map(|row| row.to_vec()).collect(),
            output_weight_matrix: genome.output_weight.iter().map(|row| row.to_vec()).collect(),
            output_bias_vector: genome.output_bias.to_vec(),
        }
    }
}

impl TryFrom<GenomeRecord> for Genome {
    type Error = GenomeShapeError;

    fn try_from(record: GenomeRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            input_bias: to_vector(Layer::InputBias, &record.input_bias_vector)?,
            weight: to_matrix(Layer::Weight, &record.weight_matrix)?,
            output_weight: to_matrix(Layer::OutputWeight, &record.output_weight_matrix)?,
            output_bias: to_vector(Layer::OutputBias, &record.output_bias_vector)?,
        })
    }
}

fn to_vector<const N: usize>(layer: Layer, values: &[f32]) -> Result<[f32; N], GenomeShapeError> {
    let vector: [f32; N] = values
        .try_into()
        .map_err(|_| GenomeShapeError::Length {
            layer,
            expected: N,
            actual: values.len(),
        })?;
    if !vector.iter().all(|v| v.is_finite()) {
        return Err(GenomeShapeError::NonFinite { layer });
    }
    Ok(vector)
}

fn to_matrix<const R: usize, const C: usize>(
    layer: Layer,
    rows: &[Vec<f32>],
) -> Result<[[f32; C]; R], GenomeShapeError> {
    if rows.len() != R {
        return Err(GenomeShapeError::Length {
            layer,
            expected: R,
            actual: rows.len(),
        });
    }
    let mut matrix = [[0.0; C]; R];
    for (row, (target, values)) in matrix.iter_mut().zip(rows).enumerate() {
        if values.len() != C {
            return Err(GenomeShapeError::RowLength {
                layer,
                row,
                expected: C,
                actual: values.len(),
            });
        }
        *target = to_vector(layer, values)?;
    }
    Ok(matrix)
}
