//! Error taxonomy for sample construction and parameter validation.
//!
//! Grounded on `AleoNet-snarkOS`'s `consensus::error::ConsensusError`:
//! the teacher crate itself has no typed error enum (it propagates
//! `anyhow::Error` at CLI boundaries only), so this shape is imported
//! from elsewhere in the retrieval pack rather than invented.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("need at least 2 samples, got {0}")]
    InsufficientSamples(usize),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
