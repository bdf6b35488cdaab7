//! Gram-Schmidt orthogonalization

use stat_core::{StatError, Value};
use stat_plugin::{FunctionPlugin, FunctionMeta, ArgMeta, EvalContext, DEFAULT_TOLERANCE};
use crate::types::{Matrix, Vector};
use crate::helpers::extract_matrix;
use crate::ops::project_sum;
use crate::vector_ops::{norm, normalize, v_subtract};

/// Orthonormal basis spanning the rows of `a`, one output row per input row
pub fn gram_schmidt(a: &Matrix) -> Result<Matrix, StatError> {
    gram_schmidt_with(a, DEFAULT_TOLERANCE)
}

/// Gram-Schmidt with an explicit relative dependence tolerance
///
/// Rows are processed strictly in order. Row `i` has its projection onto the
/// already orthonormalized rows `0..i` removed and is then normalized, so each
/// output row is unit length and orthogonal to every earlier one.
///
/// A row is rejected as dependent when its residual norm is at most
/// `tolerance * norm(row)`. Rounding noise in the residual scales with the row,
/// so the test gives the same verdict for `s * a` as for `a`.
///
/// Fails with `DegenerateInput` when a row is zero, when a row lies in the span
/// of earlier rows, or when there are more rows than columns.
pub fn gram_schmidt_with(a: &Matrix, tolerance: f64) -> Result<Matrix, StatError> {
    if a.rows() > a.cols() {
        return Err(StatError::degenerate(
            "gramSchmidt",
            format!("{} vectors cannot be orthonormal in {} dimensions", a.rows(), a.cols()),
        ));
    }

    let mut basis: Vec<Vector> = Vec::with_capacity(a.rows());

    for (i, vector) in a.iter_rows().enumerate() {
        let residual = if basis.is_empty() {
            vector.clone()
        } else {
            let so_far = Matrix::from_valid_rows(basis.clone(), a.cols());
            let proj = project_sum(&so_far, vector)?;
            v_subtract(vector, &proj)?
        };

        let scale = norm(vector);
        let residual_norm = norm(&residual);
        tracing::debug!(step = i, scale, residual_norm, "gram-schmidt step");

        if !residual_norm.is_finite() || !scale.is_finite() {
            return Err(StatError::degenerate(
                "gramSchmidt",
                format!("vector {} has a non-finite norm", i),
            ));
        }
        if residual_norm <= tolerance * scale {
            let reason = if scale == 0.0 {
                format!("vector {} is a zero vector", i)
            } else {
                format!("vector {} is linearly dependent on earlier vectors", i)
            };
            tracing::warn!(step = i, scale, residual_norm, "gram-schmidt rejected row");
            return Err(StatError::degenerate("gramSchmidt", reason));
        }

        basis.push(normalize(&residual)?);
    }

    Ok(Matrix::from_valid_rows(basis, a.cols()))
}

// ============================================================================
// GRAMSCHMIDT - Orthonormal basis from a set of vectors
// ============================================================================

pub struct GramSchmidtFn;

static GRAM_SCHMIDT_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("a", "Matrix", "Linearly independent vectors as rows"),
];
static GRAM_SCHMIDT_EXAMPLES: [&str; 2] = [
    "gramSchmidt([[1, 1, 0], [1, 0, 1]]) → two orthonormal rows",
    "gramSchmidt([[3, 0], [1, 1]]) → [[1, 0], [0, 1]]",
];
static GRAM_SCHMIDT_RELATED: [&str; 3] = ["project", "normalize", "vsubtract"];

impl FunctionPlugin for GramSchmidtFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "gramSchmidt",
            description: "Orthonormal basis via the Gram-Schmidt process",
            usage: "gramSchmidt(a)",
            args: &GRAM_SCHMIDT_ARGS,
            returns: "Matrix",
            examples: &GRAM_SCHMIDT_EXAMPLES,
            category: "matrix",
            related: &GRAM_SCHMIDT_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(StatError::arg_count("gramSchmidt", 1, args.len()));
        }

        let a = match extract_matrix(&args[0], "gramSchmidt", "a") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        gram_schmidt_with(&a, ctx.tolerance).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_ops::dotp;
    use stat_core::codes;

    fn assert_orthonormal(m: &Matrix) {
        for (i, vi) in m.iter_rows().enumerate() {
            assert!((norm(vi) - 1.0).abs() < 1e-10, "row {} has norm {}", i, norm(vi));
            for vj in m.iter_rows().take(i) {
                assert!(dotp(vi, vj).unwrap().abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_two_vectors() {
        let a = Matrix::from_rows(vec![[1.0, 1.0, 0.0], [1.0, 0.0, 1.0]]).unwrap();
        let v = gram_schmidt(&a).unwrap();
        assert_eq!(v.shape(), (2, 3));
        assert_orthonormal(&v);

        let s = 1.0 / 2.0_f64.sqrt();
        assert!((v[(0, 0)] - s).abs() < 1e-12);
        assert!((v[(0, 1)] - s).abs() < 1e-12);
    }

    #[test]
    fn test_every_vector_processed() {
        // Three inputs give three outputs; none skipped
        let a = Matrix::from_rows(vec![
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
        ]).unwrap();
        let v = gram_schmidt(&a).unwrap();
        assert_eq!(v.rows(), 3);
        assert_orthonormal(&v);
    }

    #[test]
    fn test_four_dimensional() {
        let a = Matrix::from_rows(vec![
            [2.0, 0.0, 1.0, 0.0],
            [1.0, 3.0, 0.0, 1.0],
            [0.0, 1.0, 4.0, 2.0],
            [1.0, 1.0, 1.0, 5.0],
        ]).unwrap();
        assert_orthonormal(&gram_schmidt(&a).unwrap());
    }

    #[test]
    fn test_first_output_is_normalized_input() {
        let a = Matrix::from_rows(vec![[3.0, 0.0], [1.0, 1.0]]).unwrap();
        let v = gram_schmidt(&a).unwrap();
        assert_eq!(v.to_rows(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_zero_vector_is_degenerate() {
        let a = Matrix::from_rows(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]).unwrap();
        let err = gram_schmidt(&a).unwrap_err();
        assert_eq!(err.code(), codes::DEGENERATE_INPUT);
    }

    #[test]
    fn test_dependent_vector_is_degenerate() {
        let a = Matrix::from_rows(vec![[1.0, 0.0], [2.0, 0.0]]).unwrap();
        match gram_schmidt(&a).unwrap_err() {
            StatError::DegenerateInput { reason, .. } => assert!(reason.contains("vector 1")),
            other => panic!("Expected degenerate input, got {:?}", other),
        }
    }

    #[test]
    fn test_scaled_dependent_rows_are_degenerate() {
        // Dependence is detected at every scale
        for s in [1e-6, 1.0, 1000.0, 1e6] {
            let a = Matrix::from_rows(vec![
                [0.1 * s, 0.2 * s, 0.3 * s],
                [0.3 * s, 0.6 * s, 0.9 * s],
            ]).unwrap();
            match gram_schmidt(&a) {
                Err(StatError::DegenerateInput { reason, .. }) => {
                    assert!(reason.contains("vector 1"), "scale {}: {}", s, reason)
                }
                other => panic!("scale {}: expected degenerate input, got {:?}", s, other),
            }
        }
    }

    #[test]
    fn test_small_independent_rows_accepted() {
        let a = Matrix::from_rows(vec![[1e-12, 0.0, 0.0], [1e-12, 1e-12, 0.0]]).unwrap();
        let v = gram_schmidt(&a).unwrap();
        assert_orthonormal(&v);
    }

    #[test]
    fn test_explicit_tolerance() {
        // Second row leans 1e-6 away from the first
        let a = Matrix::from_rows(vec![[1.0, 0.0], [1.0, 1e-6]]).unwrap();
        assert!(gram_schmidt_with(&a, 1e-10).is_ok());
        assert_eq!(gram_schmidt_with(&a, 1e-3).unwrap_err().code(), codes::DEGENERATE_INPUT);
    }

    #[test]
    fn test_too_many_vectors() {
        let a = Matrix::from_rows(vec![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]).unwrap();
        assert_eq!(gram_schmidt(&a).unwrap_err().code(), codes::DEGENERATE_INPUT);
    }
}
