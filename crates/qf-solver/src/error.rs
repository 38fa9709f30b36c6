//! Error types for solver operations.

use qf_core::QfError;
use thiserror::Error;

/// Errors that can occur while solving a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid argument {param}: {issue}")]
    InvalidArgument {
        param: &'static str,
        issue: ArgumentIssue,
    },

    #[error("Invalid visit ratio for the load-dependent center: {value} (must be > 0)")]
    InvalidVisitRatio { value: f64 },

    #[error("Numerical degeneracy at population {population}, shift {shift}: {what}")]
    NumericalDegeneracy {
        what: &'static str,
        population: usize,
        shift: usize,
    },

    #[error("Solve cancelled after {completed_layers} population layers")]
    Cancelled { completed_layers: usize },

    #[error("Unsupported network: {what}")]
    Unsupported { what: String },

    #[error("Core error: {0}")]
    Core(#[from] QfError),
}

/// What is wrong with an argument reported as [`SolverError::InvalidArgument`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentIssue {
    #[error("length {actual}, expected {expected}")]
    Length { expected: usize, actual: usize },

    #[error("entry {index} = {value} {reason}")]
    Value {
        index: usize,
        value: f64,
        reason: &'static str,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;

