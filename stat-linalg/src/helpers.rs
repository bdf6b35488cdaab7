//! Helper functions for converting dynamic values and checking shapes

use stat_core::{StatError, Value};
use crate::types::{Matrix, Vector};

/// Extract a vector from a list of Numbers
pub fn extract_vector(value: &Value, func: &str, arg: &str) -> Result<Vector, StatError> {
    match value {
        Value::List(items) => {
            let mut data = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Number(n) => data.push(*n),
                    Value::Error(e) => return Err(e.clone()),
                    other => {
                        let arg = format!("{}[{}]", arg, i);
                        return Err(StatError::type_mismatch(func, &arg, "Number", other.type_name()));
                    }
                }
            }
            Ok(Vector::new(data))
        }
        Value::Error(e) => Err(e.clone()),
        _ => Err(StatError::type_mismatch(func, arg, "List", value.type_name())),
    }
}

/// Extract a matrix from a nested list of Values
pub fn extract_matrix(value: &Value, func: &str, arg: &str) -> Result<Matrix, StatError> {
    match value {
        Value::List(rows) => {
            let mut data = Vec::with_capacity(rows.len());
            for (i, row) in rows.iter().enumerate() {
                let row_arg = format!("{}[{}]", arg, i);
                match row {
                    Value::List(_) => data.push(extract_vector(row, func, &row_arg)?),
                    Value::Error(e) => return Err(e.clone()),
                    other => {
                        return Err(StatError::type_mismatch(func, &row_arg, "List", other.type_name()));
                    }
                }
            }
            Matrix::from_rows(data)
        }
        Value::Error(e) => Err(e.clone()),
        _ => Err(StatError::type_mismatch(func, arg, "List of Lists", value.type_name())),
    }
}

/// Check that two vectors are compatible for an elementwise operation
pub fn check_same_len(a: &[f64], b: &[f64], func: &str) -> Result<(), StatError> {
    if a.len() != b.len() {
        return Err(StatError::length_mismatch(func, a.len(), b.len()));
    }
    Ok(())
}

/// Check that two matrices have compatible dimensions for multiplication
pub fn check_matmul_dims(a: &Matrix, b: &Matrix, func: &str) -> Result<(), StatError> {
    if a.cols() != b.rows() {
        return Err(StatError::dimension_mismatch(func, a.shape(), b.shape()));
    }
    Ok(())
}
