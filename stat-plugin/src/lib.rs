//! stat plugin system
//!
//! Provides the `FunctionPlugin` trait and the registry that dispatches
//! dynamic `Value` calls to typed implementations.

mod traits;
mod registry;
mod context;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;
pub use context::{EvalContext, TraceStep, DEFAULT_TOLERANCE, DEFAULT_ZERO_TOLERANCE};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        FunctionPlugin, FunctionMeta, ArgMeta,
        PluginRegistry, EvalContext, TraceStep,
    };
    pub use stat_core::prelude::*;
}
