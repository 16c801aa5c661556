//! Error types for the spanning tree solver.

use mfmst_core::{GraphError, Infeasibility};
use thiserror::Error;

/// Errors that can occur during solving.
#[derive(Error, Debug)]
pub enum MfmstError {
    /// Input graph could not be built
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] GraphError),

    /// No spanning tree can meet the bound
    #[error("Infeasible: {0}")]
    Infeasible(#[from] Infeasibility),

    /// Settings are inconsistent
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for solver operations.
pub type MfmstResult<T> = Result<T, MfmstError>;
