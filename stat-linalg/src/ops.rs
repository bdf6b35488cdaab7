//! Matrix operations: transpose, multiply, projection

use stat_plugin::prelude::*;
use crate::types::{Matrix, Vector};
use crate::helpers::*;
use crate::vector_ops::{dotp, v_add};

/// New matrix with rows and columns swapped; works for any rectangular shape
pub fn transpose(a: &Matrix) -> Matrix {
    let rows: Vec<Vector> = (0..a.cols())
        .map(|j| a.iter_rows().map(|row| row[j]).collect())
        .collect();
    Matrix::from_valid_rows(rows, a.rows())
}

/// Matrix product `a × b`, each entry a dot product of a row of `a` and a column of `b`
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, StatError> {
    check_matmul_dims(a, b, "multiply")?;

    let columns = transpose(b);
    let rows = a
        .iter_rows()
        .map(|row| columns.iter_rows().map(|col| dotp(row, col)).collect::<Result<Vector, _>>())
        .collect::<Result<Vec<Vector>, _>>()?;

    Matrix::from_rows(rows)
}

/// Per-basis projection contributions of `v`, flattened
///
/// For each basis row `s_i` this emits `s_i[j] * dotp(v, s_i)` for every
/// component `j`, so the result has `rows × cols` entries. With an
/// orthonormal basis each chunk of `cols` entries is the projection of `v`
/// onto that basis vector.
pub fn project(subspace: &Matrix, v: &[f64]) -> Result<Vector, StatError> {
    let mut result = Vec::with_capacity(subspace.rows() * subspace.cols());
    for basis in subspace.iter_rows() {
        let scale = dotp(v, basis).map_err(|_| StatError::length_mismatch("project", v.len(), basis.len()))?;
        result.extend(basis.iter().map(|x| x * scale));
    }
    Ok(Vector::new(result))
}

/// Projection of `v` onto the span of an orthonormal basis: the sum of the
/// chunks produced by [`project`]
pub fn project_sum(subspace: &Matrix, v: &[f64]) -> Result<Vector, StatError> {
    let contributions = project(subspace, v)?;
    contributions
        .chunks(subspace.cols())
        .try_fold(Vector::zeros(subspace.cols()), |acc, chunk| v_add(&acc, chunk))
}

// ============ transpose ============

pub struct TransposeFn;

static TRANSPOSE_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("a", "Matrix", "Matrix to transpose"),
];

static TRANSPOSE_EXAMPLES: [&str; 2] = [
    "transpose([[1, 1, 1], [2, 2, 2], [3, 3, 3]]) → [[1, 2, 3], [1, 2, 3], [1, 2, 3]]",
    "transpose([[1, 2, 3]]) → [[1], [2], [3]]",
];
static TRANSPOSE_RELATED: [&str; 1] = ["multiply"];

impl FunctionPlugin for TransposeFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "transpose", description: "Matrix transpose", usage: "transpose(a)",
            args: &TRANSPOSE_ARGS, returns: "Matrix", examples: &TRANSPOSE_EXAMPLES,
            category: "matrix", related: &TRANSPOSE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 { return Value::Error(StatError::arg_count("transpose", 1, args.len())); }

        let a = match extract_matrix(&args[0], "transpose", "a") { Ok(m) => m, Err(e) => return Value::Error(e) };
        transpose(&a).into()
    }
}

// ============ multiply ============

pub struct MultiplyFn;

static MULTIPLY_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "Left matrix (m×n)"),
    ArgMeta::required("b", "Matrix", "Right matrix (n×p)"),
];

static MULTIPLY_EXAMPLES: [&str; 1] = ["multiply(a, identity) → a"];
static MULTIPLY_RELATED: [&str; 2] = ["transpose", "dotp"];

impl FunctionPlugin for MultiplyFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "multiply", description: "Matrix multiplication", usage: "multiply(a, b)",
            args: &MULTIPLY_ARGS, returns: "Matrix", examples: &MULTIPLY_EXAMPLES,
            category: "matrix", related: &MULTIPLY_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 2 { return Value::Error(StatError::arg_count("multiply", 2, args.len())); }

        let a = match extract_matrix(&args[0], "multiply", "a") { Ok(m) => m, Err(e) => return Value::Error(e) };
        let b = match extract_matrix(&args[1], "multiply", "b") { Ok(m) => m, Err(e) => return Value::Error(e) };

        multiply(&a, &b).into()
    }
}

// ============ project ============

pub struct ProjectFn;

static PROJECT_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("subspace", "Matrix", "Basis vectors as rows"),
    ArgMeta::required("v", "Vector", "Vector to project"),
];

static PROJECT_EXAMPLES: [&str; 2] = [
    "project([[1, 0]], [3, 4]) → [3, 0]",
    "project([[1, 0], [0, 1]], [3, 4]) → [3, 0, 0, 4]",
];
static PROJECT_RELATED: [&str; 2] = ["dotp", "gramschmidt"];

impl FunctionPlugin for ProjectFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "project", description: "Projection contributions of a vector onto each basis vector", usage: "project(subspace, v)",
            args: &PROJECT_ARGS, returns: "Vector", examples: &PROJECT_EXAMPLES,
            category: "matrix", related: &PROJECT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 2 { return Value::Error(StatError::arg_count("project", 2, args.len())); }

        let subspace = match extract_matrix(&args[0], "project", "subspace") { Ok(m) => m, Err(e) => return Value::Error(e) };
        let v = match extract_vector(&args[1], "project", "v") { Ok(v) => v, Err(e) => return Value::Error(e) };

        project(&subspace, &v).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stat_core::codes;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_transpose_square() {
        let a = m(vec![vec![1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0], vec![3.0, 3.0, 3.0]]);
        let expected = vec![vec![1.0, 2.0, 3.0]; 3];
        assert_eq!(transpose(&a).to_rows(), expected);
    }

    #[test]
    fn test_transpose_rectangular() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = transpose(&a);
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.to_rows(), vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
        // Input untouched
        assert_eq!(a.shape(), (2, 3));
    }

    #[test]
    fn test_multiply_identity() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]]);
        let i3 = Matrix::identity(3).unwrap();
        assert_eq!(multiply(&a, &i3).unwrap(), a);
        assert_eq!(multiply(&i3, &a).unwrap(), a);
    }

    #[test]
    fn test_multiply_rectangular() {
        // (2×3)(3×2) = 2×2
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = m(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]);
        let c = multiply(&a, &b).unwrap();
        assert_eq!(c.to_rows(), vec![vec![58.0, 64.0], vec![139.0, 154.0]]);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![1.0, 2.0, 3.0]]);
        let err = multiply(&a, &b).unwrap_err();
        assert_eq!(err, StatError::dimension_mismatch("multiply", (2, 2), (1, 3)));
    }

    #[test]
    fn test_project_single_basis() {
        let basis = m(vec![vec![1.0, 0.0]]);
        assert_eq!(project(&basis, &[3.0, 4.0]).unwrap().as_slice(), &[3.0, 0.0]);
    }

    #[test]
    fn test_project_flattens_per_basis() {
        let basis = m(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(project(&basis, &[3.0, 4.0]).unwrap().as_slice(), &[3.0, 0.0, 0.0, 4.0]);
        assert_eq!(project_sum(&basis, &[3.0, 4.0]).unwrap().as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn test_project_length_mismatch() {
        let basis = m(vec![vec![1.0, 0.0, 0.0]]);
        let err = project(&basis, &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, StatError::length_mismatch("project", 2, 3));
    }

    #[test]
    fn test_multiply_fn() {
        let a = Value::List(vec![Value::numbers([1.0, 2.0]), Value::numbers([3.0, 4.0])]);
        let b = Value::List(vec![Value::numbers([1.0]), Value::numbers([1.0])]);
        let result = MultiplyFn.call(&[a, b], &ctx());
        assert_eq!(result, Value::List(vec![Value::numbers([3.0]), Value::numbers([7.0])]));
    }

    #[test]
    fn test_transpose_fn_rejects_vector() {
        match TransposeFn.call(&[Value::numbers([1.0, 2.0])], &ctx()) {
            Value::Error(e) => assert_eq!(e.code(), codes::TYPE_MISMATCH),
            other => panic!("Expected error, got {:?}", other),
        }
    }
}
