// SPDX-License-Identifier: MIT

//! Condition builder
//!
//! [`Parser`] owns the resolvers a condition is bound against and turns
//! comparisons, expressions or condition text into compiled predicates.
//! Build once per rule, then call the predicate for every record.

use std::fmt;
use std::sync::Arc;

use super::ast::{BooleanExpression, Comparison};
use super::evaluator::{BoolExprFunc, Compiler};
use super::grammar;
use super::registry::FunctionRegistry;
use super::resolver::{EnumResolver, PathResolver};
use crate::error::OttlError;

/// Identity of the component building conditions, used to tag log lines
#[derive(Debug, Clone, Default)]
pub struct TelemetrySettings {
    pub component: String,
}

impl TelemetrySettings {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }
}

/// Builds conditions over records of type `C`
pub struct Parser<C> {
    functions: FunctionRegistry,
    paths: Arc<dyn PathResolver<C>>,
    enums: Arc<dyn EnumResolver>,
    settings: TelemetrySettings,
}

impl<C: 'static> Parser<C> {
    pub fn new<P, E>(
        functions: FunctionRegistry,
        paths: P,
        enums: E,
        settings: TelemetrySettings,
    ) -> Self
    where
        P: PathResolver<C> + 'static,
        E: EnumResolver + 'static,
    {
        Self {
            functions,
            paths: Arc::new(paths),
            enums: Arc::new(enums),
            settings,
        }
    }

    /// Compile a single comparison
    pub fn compile_comparison(&self, comparison: &Comparison) -> Result<BoolExprFunc<C>, OttlError> {
        let result = self.compiler().comparison(comparison);
        self.report(comparison, result)
    }

    /// Compile a full boolean expression
    pub fn compile_boolean_expression(
        &self,
        expr: &BooleanExpression,
    ) -> Result<BoolExprFunc<C>, OttlError> {
        let result = self.compiler().boolean_expression(expr);
        self.report(expr, result)
    }

    /// Read condition text and compile it
    pub fn parse_condition(&self, condition: &str) -> Result<BoolExprFunc<C>, OttlError> {
        match grammar::parse_condition(condition) {
            Ok(expr) => self.compile_boolean_expression(&expr),
            Err(e) => {
                log::warn!(
                    "[{}] failed to parse condition '{}': {}",
                    self.settings.component,
                    condition,
                    e
                );
                Err(e)
            }
        }
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn settings(&self) -> &TelemetrySettings {
        &self.settings
    }

    fn compiler(&self) -> Compiler<'_, C> {
        Compiler::new(&self.paths, self.enums.as_ref())
    }

    fn report(
        &self,
        source: &dyn fmt::Display,
        result: Result<BoolExprFunc<C>, OttlError>,
    ) -> Result<BoolExprFunc<C>, OttlError> {
        match &result {
            Ok(_) => log::debug!("[{}] compiled condition: {}", self.settings.component, source),
            Err(e) => log::warn!(
                "[{}] failed to compile condition '{}': {}",
                self.settings.component,
                source,
                e
            ),
        }
        result
    }
}

impl<C> fmt::Debug for Parser<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("functions", &self.functions)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
