//! stat core - fundamental types
//!
//! This crate provides the core types used throughout stat:
//! - `Value`: Runtime values (numbers, lists, errors)
//! - `StatError`: Structured errors for vector and matrix operations

mod error;
mod value;

pub use error::{codes, StatError};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{StatError, Value};
}
