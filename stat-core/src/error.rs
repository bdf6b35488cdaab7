//! Structured errors for linear algebra calls
//!
//! Errors are raised at the point of detection and propagate unchanged to
//! the caller. In the dynamic layer they travel as `Value::Error`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const TYPE_MISMATCH: &str = "TYPE_MISMATCH";
    pub const LENGTH_MISMATCH: &str = "LENGTH_MISMATCH";
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const DEGENERATE_INPUT: &str = "DEGENERATE_INPUT";
    pub const RAGGED_MATRIX: &str = "RAGGED_MATRIX";
    pub const EMPTY_INPUT: &str = "EMPTY_INPUT";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
}

/// Errors raised by vector, matrix and orthogonalization operations
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum StatError {
    /// An argument that must be a sequence (or sequence of sequences) is not one
    #[error("{func}() argument '{arg}': expected {expected}, got {got}")]
    #[serde(rename = "TYPE_MISMATCH")]
    TypeMismatch {
        func: String,
        arg: String,
        expected: String,
        got: String,
    },

    #[error("{func}(): vectors must have the same length, got {left} and {right}")]
    #[serde(rename = "LENGTH_MISMATCH")]
    LengthMismatch {
        func: String,
        left: usize,
        right: usize,
    },

    #[error("{func}(): incompatible dimensions {}×{} and {}×{}", .left.0, .left.1, .right.0, .right.1)]
    #[serde(rename = "DIMENSION_MISMATCH")]
    DimensionMismatch {
        func: String,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Normalizing a vector whose norm is zero (or below tolerance)
    #[error("{func}(): degenerate input: {reason}")]
    #[serde(rename = "DEGENERATE_INPUT")]
    DegenerateInput { func: String, reason: String },

    #[error("matrix: row {row} has {len} columns, expected {expected}")]
    #[serde(rename = "RAGGED_MATRIX")]
    RaggedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("{func}(): {what} cannot be empty")]
    #[serde(rename = "EMPTY_INPUT")]
    EmptyInput { func: String, what: String },

    #[error("{func}() expects {expected} arguments, got {got}")]
    #[serde(rename = "ARG_COUNT")]
    ArgCount {
        func: String,
        expected: usize,
        got: usize,
    },

    #[error("Unknown function: {name}")]
    #[serde(rename = "UNDEFINED_FUNC")]
    UnknownFunction { name: String, similar: Vec<String> },
}

impl StatError {
    // ========== Constructors ==========

    pub fn type_mismatch(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::TypeMismatch {
            func: func.to_string(),
            arg: arg.to_string(),
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    pub fn length_mismatch(func: &str, left: usize, right: usize) -> Self {
        Self::LengthMismatch { func: func.to_string(), left, right }
    }

    pub fn dimension_mismatch(func: &str, left: (usize, usize), right: (usize, usize)) -> Self {
        Self::DimensionMismatch { func: func.to_string(), left, right }
    }

    pub fn degenerate(func: &str, reason: impl Into<String>) -> Self {
        Self::DegenerateInput { func: func.to_string(), reason: reason.into() }
    }

    pub fn empty(func: &str, what: &str) -> Self {
        Self::EmptyInput { func: func.to_string(), what: what.to_string() }
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::ArgCount { func: func.to_string(), expected, got }
    }

    pub fn undefined_func(name: &str, similar: Vec<String>) -> Self {
        Self::UnknownFunction { name: name.to_string(), similar }
    }

    // ========== Accessors ==========

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => codes::TYPE_MISMATCH,
            Self::LengthMismatch { .. } => codes::LENGTH_MISMATCH,
            Self::DimensionMismatch { .. } => codes::DIMENSION_MISMATCH,
            Self::DegenerateInput { .. } => codes::DEGENERATE_INPUT,
            Self::RaggedMatrix { .. } => codes::RAGGED_MATRIX,
            Self::EmptyInput { .. } => codes::EMPTY_INPUT,
            Self::ArgCount { .. } => codes::ARG_COUNT,
            Self::UnknownFunction { .. } => codes::UNDEFINED_FUNC,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::TypeMismatch { expected, .. } => {
                Some(format!("Pass a {} or check the argument order", expected))
            }
            Self::LengthMismatch { .. } => Some("Use vectors of equal length".to_string()),
            Self::DimensionMismatch { .. } => {
                Some("Columns of the left matrix must equal rows of the right matrix".to_string())
            }
            Self::DegenerateInput { .. } => {
                Some("Remove zero or linearly dependent vectors".to_string())
            }
            Self::RaggedMatrix { .. } => Some("All matrix rows must have equal length".to_string()),
            Self::ArgCount { func, .. } => Some(format!("Use help('{}') for usage", func)),
            Self::UnknownFunction { similar, .. } if !similar.is_empty() => {
                Some(format!("Similar: {}", similar.join(", ")))
            }
            Self::UnknownFunction { .. } => Some("Use list_functions() for the full list".to_string()),
            Self::EmptyInput { .. } => None,
        }
    }
}
