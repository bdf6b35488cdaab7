//! Vector operations: metrics and elementwise arithmetic

use stat_core::{StatError, Value};
use stat_plugin::{FunctionPlugin, FunctionMeta, ArgMeta, EvalContext, DEFAULT_ZERO_TOLERANCE};
use crate::types::Vector;
use crate::helpers::{check_same_len, extract_vector};

/// Euclidean distance between two points
pub fn distance(a: &[f64], b: &[f64]) -> Result<f64, StatError> {
    check_same_len(a, b, "distance")?;
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    Ok(sum.sqrt())
}

/// Euclidean length
pub fn norm(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Unit vector in the direction of `a`; only an exactly zero or non-finite
/// norm is rejected
pub fn normalize(a: &[f64]) -> Result<Vector, StatError> {
    normalize_with(a, DEFAULT_ZERO_TOLERANCE)
}

/// Unit vector in the direction of `a`; fails when `norm(a) <= tolerance`
pub fn normalize_with(a: &[f64], tolerance: f64) -> Result<Vector, StatError> {
    let n = norm(a);
    if !n.is_finite() {
        return Err(StatError::degenerate("normalize", format!("norm is {}", n)));
    }
    if n <= tolerance {
        return Err(StatError::degenerate("normalize", "cannot normalize a zero vector"));
    }
    Ok(a.iter().map(|x| x / n).collect())
}

/// Dot product
pub fn dotp(a: &[f64], b: &[f64]) -> Result<f64, StatError> {
    check_same_len(a, b, "dotp")?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Elementwise sum
pub fn v_add(a: &[f64], b: &[f64]) -> Result<Vector, StatError> {
    check_same_len(a, b, "vAdd")?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// Elementwise difference `a - b`
pub fn v_subtract(a: &[f64], b: &[f64]) -> Result<Vector, StatError> {
    check_same_len(a, b, "vSubtract")?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

// ============================================================================
// Shared argument tables
// ============================================================================

static PAIR_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Vector", "First vector"),
    ArgMeta::required("b", "Vector", "Second vector (same length as a)"),
];
static SINGLE_ARGS: [ArgMeta; 1] = [ArgMeta::required("a", "Vector", "Vector")];

/// Extract both operands of a binary vector function
fn extract_pair(args: &[Value], func: &str) -> Result<(Vector, Vector), StatError> {
    if args.len() != 2 {
        return Err(StatError::arg_count(func, 2, args.len()));
    }
    let a = extract_vector(&args[0], func, "a")?;
    let b = extract_vector(&args[1], func, "b")?;
    Ok((a, b))
}

fn extract_single(args: &[Value], func: &str) -> Result<Vector, StatError> {
    if args.len() != 1 {
        return Err(StatError::arg_count(func, 1, args.len()));
    }
    extract_vector(&args[0], func, "a")
}

// ============================================================================
// DISTANCE - Euclidean distance between two points
// ============================================================================

pub struct DistanceFn;

static DISTANCE_EXAMPLES: [&str; 2] = [
    "distance([0, 0, 1], [0, 0, 10]) → 9",
    "distance([0, 0], [3, 4]) → 5",
];
static DISTANCE_RELATED: [&str; 2] = ["norm", "vsubtract"];

impl FunctionPlugin for DistanceFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "distance",
            description: "Euclidean distance between two points",
            usage: "distance(a, b)",
            args: &PAIR_ARGS,
            returns: "Number",
            examples: &DISTANCE_EXAMPLES,
            category: "vector",
            related: &DISTANCE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let (a, b) = match extract_pair(args, "distance") {
            Ok(pair) => pair,
            Err(e) => return Value::Error(e),
        };
        distance(&a, &b).into()
    }
}

// ============================================================================
// NORM - Euclidean length of a vector
// ============================================================================

pub struct NormFn;

static NORM_EXAMPLES: [&str; 1] = ["norm([3, 4]) → 5"];
static NORM_RELATED: [&str; 2] = ["normalize", "distance"];

impl FunctionPlugin for NormFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "norm",
            description: "Euclidean length of a vector",
            usage: "norm(a)",
            args: &SINGLE_ARGS,
            returns: "Number",
            examples: &NORM_EXAMPLES,
            category: "vector",
            related: &NORM_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match extract_single(args, "norm") {
            Ok(a) => Value::Number(norm(&a)),
            Err(e) => Value::Error(e),
        }
    }
}

// ============================================================================
// NORMALIZE - Unit vector in the same direction
// ============================================================================

pub struct NormalizeFn;

static NORMALIZE_EXAMPLES: [&str; 2] = [
    "normalize([3, 4]) → [0.6, 0.8]",
    "normalize([0, 0]) → DEGENERATE_INPUT",
];
static NORMALIZE_RELATED: [&str; 2] = ["norm", "gramschmidt"];

impl FunctionPlugin for NormalizeFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "normalize",
            description: "Scale a vector to unit length",
            usage: "normalize(a)",
            args: &SINGLE_ARGS,
            returns: "Vector",
            examples: &NORMALIZE_EXAMPLES,
            category: "vector",
            related: &NORMALIZE_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        match extract_single(args, "normalize") {
            Ok(a) => normalize_with(&a, ctx.zero_tolerance).into(),
            Err(e) => Value::Error(e),
        }
    }
}

// ============================================================================
// DOTP - Dot product of two vectors
// ============================================================================

pub struct DotpFn;

static DOTP_EXAMPLES: [&str; 2] = [
    "dotp([1, 2, 3, 4], [5, 6, 7, 8]) → 70",
    "dotp([1, 0], [0, 1]) → 0",
];
static DOTP_RELATED: [&str; 2] = ["norm", "project"];

impl FunctionPlugin for DotpFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "dotp",
            description: "Dot product of two vectors",
            usage: "dotp(a, b)",
            args: &PAIR_ARGS,
            returns: "Number",
            examples: &DOTP_EXAMPLES,
            category: "vector",
            related: &DOTP_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match extract_pair(args, "dotp") {
            Ok((a, b)) => dotp(&a, &b).into(),
            Err(e) => Value::Error(e),
        }
    }
}

// ============================================================================
// VADD / VSUBTRACT - Elementwise arithmetic
// ============================================================================

pub struct VAddFn;

static VADD_EXAMPLES: [&str; 1] = ["vAdd([1, 2], [3, 4]) → [4, 6]"];
static VADD_RELATED: [&str; 1] = ["vsubtract"];

impl FunctionPlugin for VAddFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "vAdd",
            description: "Elementwise vector sum",
            usage: "vAdd(a, b)",
            args: &PAIR_ARGS,
            returns: "Vector",
            examples: &VADD_EXAMPLES,
            category: "vector",
            related: &VADD_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match extract_pair(args, "vAdd") {
            Ok((a, b)) => v_add(&a, &b).into(),
            Err(e) => Value::Error(e),
        }
    }
}

pub struct VSubtractFn;

static VSUBTRACT_EXAMPLES: [&str; 1] = ["vSubtract([5, 5], [1, 2]) → [4, 3]"];
static VSUBTRACT_RELATED: [&str; 2] = ["vadd", "distance"];

impl FunctionPlugin for VSubtractFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "vSubtract",
            description: "Elementwise vector difference a - b",
            usage: "vSubtract(a, b)",
            args: &PAIR_ARGS,
            returns: "Vector",
            examples: &VSUBTRACT_EXAMPLES,
            category: "vector",
            related: &VSUBTRACT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match extract_pair(args, "vSubtract") {
            Ok((a, b)) => v_subtract(&a, &b).into(),
            Err(e) => Value::Error(e),
        }
    }
}
