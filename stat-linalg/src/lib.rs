//! stat linalg - vector and matrix primitives
//!
//! Provides elementary linear algebra as typed free functions and as
//! registry plugins:
//! - Vector metrics (distance, norm, normalize)
//! - Vector arithmetic (vAdd, vSubtract, dotp)
//! - Matrix operations (transpose, multiply, project)
//! - Orthogonalization (gramSchmidt)
//!
//! All operations are pure: inputs are borrowed and results are new values.

mod types;
mod helpers;
mod vector_ops;
mod ops;
mod orthogonalize;

pub use types::{Matrix, Vector};
pub use helpers::{extract_matrix, extract_vector};
pub use vector_ops::{distance, dotp, norm, normalize, normalize_with, v_add, v_subtract};
pub use ops::{multiply, project, project_sum, transpose};
pub use orthogonalize::{gram_schmidt, gram_schmidt_with};

use stat_plugin::PluginRegistry;

/// Load linear algebra functions into registry
pub fn load_linalg_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Vector metrics
        .with_function(vector_ops::DistanceFn)
        .with_function(vector_ops::NormFn)
        .with_function(vector_ops::NormalizeFn)

        // Vector arithmetic
        .with_function(vector_ops::DotpFn)
        .with_function(vector_ops::VAddFn)
        .with_function(vector_ops::VSubtractFn)

        // Matrix operations
        .with_function(ops::TransposeFn)
        .with_function(ops::MultiplyFn)
        .with_function(ops::ProjectFn)

        // Orthogonalization
        .with_function(orthogonalize::GramSchmidtFn)
}

/// Registry holding every linear algebra function
pub fn linalg_registry() -> PluginRegistry {
    load_linalg_library(PluginRegistry::new())
}
