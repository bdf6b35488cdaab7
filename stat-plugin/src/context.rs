//! Evaluation Context

use stat_core::Value;
use crate::PluginRegistry;
use std::sync::Arc;

/// Relative residual below which a vector counts as linearly dependent
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Absolute norm at or below which `normalize` treats a vector as zero
pub const DEFAULT_ZERO_TOLERANCE: f64 = 0.0;

/// Evaluation context passed to plugins
pub struct EvalContext {
    pub tolerance: f64,
    pub zero_tolerance: f64,
    pub registry: Arc<PluginRegistry>,
    pub tracing: bool,
    pub trace: Vec<TraceStep>,
}

/// Single step in evaluation trace
#[derive(Debug, Clone)]
pub struct TraceStep {
    pub function: String,
    pub args: Vec<Value>,
    pub result: Value,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            registry,
            tracing: false,
            trace: Vec::new(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_zero_tolerance(mut self, zero_tolerance: f64) -> Self {
        self.zero_tolerance = zero_tolerance;
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.tracing = enabled;
        self
    }

    pub fn record_trace(&mut self, function: String, args: Vec<Value>, result: Value) {
        if self.tracing {
            self.trace.push(TraceStep { function, args, result });
        }
    }

    /// Errors recorded in the trace, in call order
    pub fn errors(&self) -> Vec<&stat_core::StatError> {
        self.trace.iter().filter_map(|s| s.result.as_error()).collect()
    }
}
