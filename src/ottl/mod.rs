// SPDX-License-Identifier: MIT

//! Condition language for filtering telemetry records
//!
//! This module provides the typed value model, the cross-type comparator
//! and the compiler that turns boolean expressions into reusable predicates:
//! - `name == "bear"`
//! - `severity_number >= SEVERITY_NUMBER_WARN`
//! - `attributes["http.route"] == "/healthz" and not (status_code == STATUS_CODE_ERROR)`

mod ast;
mod compare;
mod evaluator;
mod grammar;
mod parser;
mod registry;
mod resolver;
mod value;

pub use ast::{BooleanExpression, BooleanOperand, BooleanValue, Comparison, Term, MAX_NESTING};
pub use compare::{category, compare, Category, CompareOp};
pub use evaluator::BoolExprFunc;
pub use grammar::{parse_comparison, parse_condition};
pub use parser::{Parser, TelemetrySettings};
pub use registry::{ExprFunc, FunctionRegistry};
pub use resolver::{EnumResolver, EnumTable, PathResolver};
pub use value::{EnumSymbol, Field, Path, Scalar, Value};
