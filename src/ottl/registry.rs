// SPDX-License-Identifier: MIT

//! Registry of functions callable from conditions
//!
//! The evaluator does not invoke functions; the registry is carried by the
//! [`Parser`](super::Parser) so that callers can hand one set of functions
//! to every condition they build.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::value::Scalar;

/// A callable function taking resolved arguments
pub type ExprFunc = Arc<dyn Fn(&[Scalar]) -> Scalar + Send + Sync>;

#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, ExprFunc>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, replacing any previous one with the same name
    pub fn register(&mut self, name: impl Into<String>, func: ExprFunc) {
        self.functions.insert(name.into(), func);
    }

    pub fn get(&self, name: &str) -> Option<ExprFunc> {
        self.functions.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}
