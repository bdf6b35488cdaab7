//! Core matrix and vector types

use std::fmt;
use std::ops::{Deref, Index};
use stat_core::{StatError, Value};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// An ordered, fixed-length sequence of reals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(Vec<f64>);

/// A rectangular matrix stored as rows
///
/// Construction validates that every row has the same length, so every
/// operation downstream may assume `rows() × cols()` is well-formed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    data: Vec<Vector>,
    cols: usize,
}

impl Vector {
    pub fn new(data: Vec<f64>) -> Self {
        Vector(data)
    }

    /// Zero vector of length `n`
    pub fn zeros(n: usize) -> Self {
        Vector(vec![0.0; n])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Convert to DVector<f64>
    pub fn to_dvector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.0)
    }

    /// Convert to Value
    pub fn to_value(&self) -> Value {
        Value::numbers(self.0.iter().copied())
    }
}

impl Deref for Vector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Vector(data)
    }
}

impl From<&[f64]> for Vector {
    fn from(data: &[f64]) -> Self {
        Vector(data.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(data: [f64; N]) -> Self {
        Vector(data.to_vec())
    }
}

impl From<DVector<f64>> for Vector {
    fn from(data: DVector<f64>) -> Self {
        Vector(data.as_slice().to_vec())
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector(iter.into_iter().collect())
    }
}

impl Matrix {
    /// Build a matrix from rows, rejecting empty and ragged input
    pub fn from_rows<R: Into<Vector>>(rows: Vec<R>) -> Result<Self, StatError> {
        let data: Vec<Vector> = rows.into_iter().map(Into::into).collect();
        if data.is_empty() {
            return Err(StatError::empty("matrix", "rows"));
        }

        let cols = data[0].len();
        if cols == 0 {
            return Err(StatError::empty("matrix", "row 0"));
        }

        for (i, row) in data.iter().enumerate() {
            if row.len() != cols {
                return Err(StatError::RaggedMatrix { row: i, len: row.len(), expected: cols });
            }
        }

        Ok(Matrix { data, cols })
    }

    /// n×n identity
    pub fn identity(n: usize) -> Result<Self, StatError> {
        if n == 0 {
            return Err(StatError::empty("identity", "size"));
        }
        let data = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Ok(Matrix { data, cols: n })
    }

    /// Create from nalgebra DMatrix
    pub fn from_dmatrix(m: &DMatrix<f64>) -> Result<Self, StatError> {
        let rows: Vec<Vector> = m.row_iter().map(|r| r.iter().copied().collect()).collect();
        Matrix::from_rows(rows)
    }

    /// Get number of rows
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Get number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Get element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row(&self, row: usize) -> Option<&Vector> {
        self.data.get(row)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &Vector> {
        self.data.iter()
    }

    /// Convert to nested Vec<Vec<f64>>
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.iter().map(|r| r.to_vec()).collect()
    }

    /// Convert to f64 DMatrix (for nalgebra operations)
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.rows(), self.cols, |i, j| self.data[i][j])
    }

    /// Convert to Value (list of row lists)
    pub fn to_value(&self) -> Value {
        Value::List(self.data.iter().map(Vector::to_value).collect())
    }

    /// Wrap rows already known to be non-empty and `cols` wide
    pub(crate) fn from_valid_rows(data: Vec<Vector>, cols: usize) -> Self {
        debug_assert!(!data.is_empty() && data.iter().all(|r| r.len() == cols));
        Matrix { data, cols }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row][col]
    }
}

impl<'de> Deserialize<'de> for Matrix {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            data: Vec<Vector>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Matrix::from_rows(raw.data).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, val) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}", val)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", row)?;
        }
        write!(f, "]")
    }
}

impl From<Vector> for Value {
    fn from(v: Vector) -> Value {
        v.to_value()
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Value {
        m.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stat_core::codes;

    #[test]
    fn test_matrix_creation() {
        let m = Matrix::from_rows(vec![[1.0, 2.0], [3.0, 4.0]]).unwrap();

        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 2);
        assert!(m.is_square());
        assert_eq!(m.get(1, 0), Some(3.0));
        assert_eq!(m.get(2, 2), None);
        assert_eq!(m[(0, 1)], 2.0);
    }

    #[test]
    fn test_ragged_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err.code(), codes::RAGGED_MATRIX);
        assert_eq!(err, StatError::RaggedMatrix { row: 1, len: 1, expected: 2 });
    }

    #[test]
    fn test_empty_rejected() {
        let none: Vec<Vec<f64>> = vec![];
        assert_eq!(Matrix::from_rows(none).unwrap_err().code(), codes::EMPTY_INPUT);
        assert_eq!(Matrix::from_rows(vec![Vec::<f64>::new()]).unwrap_err().code(), codes::EMPTY_INPUT);
        assert!(Matrix::identity(0).is_err());
    }

    #[test]
    fn test_identity() {
        let i3 = Matrix::identity(3).unwrap();
        assert_eq!(i3.to_rows(), vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_dmatrix_interop() {
        let m = Matrix::from_rows(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let dm = m.to_dmatrix();
        assert_eq!(dm.nrows(), 2);
        assert_eq!(dm[(1, 2)], 6.0);
        assert_eq!(Matrix::from_dmatrix(&dm).unwrap(), m);
    }

    #[test]
    fn test_dvector_interop() {
        let v = Vector::from([3.0, 4.0]);
        let dv = v.to_dvector();
        assert_eq!(dv.norm(), 5.0);
        assert_eq!(Vector::from(dv), v);
    }

    #[test]
    fn test_display() {
        let v = Vector::from([1.0, 0.5]);
        assert_eq!(v.to_string(), "[1.0000, 0.5000]");
        let m = Matrix::from_rows(vec![[1.0], [2.0]]).unwrap();
        assert_eq!(m.to_string(), "[[1.0000], [2.0000]]");
    }

    #[test]
    fn test_deserialize_validates_shape() {
        let ok: Matrix = serde_json::from_str(r#"{"data":[[1.0,2.0],[3.0,4.0]],"cols":2}"#).unwrap();
        assert_eq!(ok.shape(), (2, 2));

        let bad: Result<Matrix, _> = serde_json::from_str(r#"{"data":[[1.0,2.0],[3.0]]}"#);
        assert!(bad.is_err());
    }
}
