//! Neural controller for skyhop agents.
//!
//! - [`genome`] - Network parameters, the forward pass and the exchange record
//! - [`features`] - The fixed feature vector extracted from a world
//! - [`controller`] - [`Controller`], a genome that can pilot a world
//!
//! # Architecture
//!
//! ```text
//! World --extract--> [f32; 6] --Genome::logits--> [f32; 3] --argmax--> Direction
//! ```
//!
//! Inference is pure: the same genome and features always give the same
//! direction.

pub use self::{controller::*, features::*, genome::*};

pub mod controller;
pub mod features;
pub mod genome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InferenceError {
    #[display("inference requested before any input was set")]
    UninitializedInput,
    #[display("controller produced a non-finite output")]
    NonFiniteOutput,
}
