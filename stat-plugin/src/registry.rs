//! Plugin Registry

use crate::{EvalContext, FunctionMeta, FunctionPlugin};
use stat_core::{StatError, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Registry of callable functions, keyed by lowercase name
pub struct PluginRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_lowercase();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn call_function(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Value {
        match self.get_function(name) {
            Some(f) => {
                tracing::debug!(function = name, args = args.len(), "dispatch");
                f.call(args, ctx)
            }
            None => {
                tracing::warn!(function = name, "unknown function");
                let similar = self.find_similar_functions(name).into_iter().take(5).collect();
                Value::Error(StatError::undefined_func(name, similar))
            }
        }
    }

    /// Call a function and record the step on the context when tracing is on
    pub fn call_traced(&self, name: &str, args: &[Value], ctx: &mut EvalContext) -> Value {
        let result = self.call_function(name, args, ctx);
        ctx.record_trace(name.to_string(), args.to_vec(), result.clone());
        result
    }

    /// Find function names similar to the given name (for error suggestions)
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self
            .functions
            .keys()
            .filter_map(|func_name| {
                let score = Self::similarity_score(&name_lower, func_name);
                if score > 0 {
                    Some((func_name.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        // Higher score first, then alphabetical for a stable order
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        // A single shared letter is noise
        if common >= 2 {
            score += common * 2;
        }

        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }

    /// Human-readable help for one function
    pub fn help(&self, name: &str) -> Value {
        match self.get_function(name) {
            Some(f) => Value::Text(Self::format_help(&f.meta())),
            None => {
                let similar = self.find_similar_functions(name).into_iter().take(5).collect();
                Value::Error(StatError::undefined_func(name, similar))
            }
        }
    }

    fn format_help(meta: &FunctionMeta) -> String {
        let mut out = format!("{}: {}\nusage: {}\nreturns: {}\n", meta.name, meta.description, meta.usage, meta.returns);
        for arg in meta.args {
            out.push_str(&format!("  {} ({}): {}\n", arg.name, arg.typ, arg.description));
        }
        for example in meta.examples {
            out.push_str(&format!("  e.g. {}\n", example));
        }
        if !meta.related.is_empty() {
            out.push_str(&format!("see also: {}\n", meta.related.join(", ")));
        }
        out
    }

    /// Metadata of registered functions, sorted by name
    pub fn list_functions(&self, category: Option<&str>) -> Vec<FunctionMeta> {
        let mut funcs: Vec<FunctionMeta> = self
            .functions
            .values()
            .map(|f| f.meta())
            .filter(|meta| category.map_or(true, |c| meta.category == c))
            .collect();
        funcs.sort_by(|a, b| a.name.cmp(b.name));
        funcs
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
