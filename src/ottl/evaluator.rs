// SPDX-License-Identifier: MIT

//! Condition compiler
//!
//! Walks a [`BooleanExpression`] once and produces a tree of closures.
//! Enum symbols are bound here, so an unknown symbol fails the build and a
//! compiled condition never fails while evaluating. Paths are left for the
//! [`PathResolver`] to read from each record.
//!
//! Sub-expressions deeper than [`MAX_NESTING`] are rejected so that neither
//! compiling nor evaluating can exhaust the stack.

use std::borrow::Cow;
use std::sync::Arc;

use super::ast::{
    BooleanExpression, BooleanOperand, BooleanValue, Comparison, Term, MAX_NESTING,
};
use super::compare::compare;
use super::resolver::{EnumResolver, PathResolver};
use super::value::{Path, Scalar, Value};
use crate::error::OttlError;

/// A compiled condition, callable with the record it should be checked against
pub type BoolExprFunc<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

/// Comparison operand with its enum symbol already bound
#[derive(Debug, Clone)]
enum Operand {
    Literal(Scalar),
    Path(Path),
}

impl Operand {
    fn bind(value: &Value, enums: &dyn EnumResolver) -> Result<Self, OttlError> {
        let operand = match value {
            Value::Nil => Operand::Literal(Scalar::Nil),
            Value::Bytes(b) => Operand::Literal(Scalar::Bytes(b.clone())),
            Value::String(s) => Operand::Literal(Scalar::String(s.clone())),
            Value::Float(n) => Operand::Literal(Scalar::Float(*n)),
            Value::Int(n) => Operand::Literal(Scalar::Int(*n)),
            Value::Bool(b) => Operand::Literal(Scalar::Bool(*b)),
            Value::Enum(symbol) => Operand::Literal(Scalar::Int(enums.resolve(symbol)?)),
            Value::Path(path) => Operand::Path(path.clone()),
        };
        Ok(operand)
    }

    fn resolve<'a, C>(&'a self, paths: &dyn PathResolver<C>, ctx: &C) -> Cow<'a, Scalar> {
        match self {
            Operand::Literal(scalar) => Cow::Borrowed(scalar),
            Operand::Path(path) => Cow::Owned(paths.resolve(path, ctx)),
        }
    }
}

/// Builds closures for one condition against a fixed pair of resolvers
pub(crate) struct Compiler<'a, C> {
    paths: &'a Arc<dyn PathResolver<C>>,
    enums: &'a dyn EnumResolver,
}

impl<'a, C: 'static> Compiler<'a, C> {
    pub(crate) fn new(paths: &'a Arc<dyn PathResolver<C>>, enums: &'a dyn EnumResolver) -> Self {
        Self { paths, enums }
    }

    pub(crate) fn comparison(&self, comparison: &Comparison) -> Result<BoolExprFunc<C>, OttlError> {
        let left = Operand::bind(&comparison.left, self.enums)?;
        let right = Operand::bind(&comparison.right, self.enums)?;
        let op = comparison.op;

        if let (Operand::Literal(l), Operand::Literal(r)) = (&left, &right) {
            let result = compare(l, r, op);
            return Ok(Arc::new(move |_: &C| result));
        }

        let paths = Arc::clone(self.paths);
        Ok(Arc::new(move |ctx: &C| {
            let l = left.resolve(paths.as_ref(), ctx);
            let r = right.resolve(paths.as_ref(), ctx);
            compare(&l, &r, op)
        }))
    }

    fn boolean_value(
        &self,
        value: &BooleanValue,
        depth: usize,
    ) -> Result<BoolExprFunc<C>, OttlError> {
        let eval = match &value.operand {
            BooleanOperand::ConstExpr(b) => {
                let result = *b != value.negation;
                return Ok(Arc::new(move |_: &C| result));
            }
            BooleanOperand::Comparison(comparison) => self.comparison(comparison)?,
            BooleanOperand::SubExpr(_) if depth == MAX_NESTING => {
                return Err(OttlError::NestingTooDeep(MAX_NESTING));
            }
            BooleanOperand::SubExpr(expr) => self.expression_at(expr, depth + 1)?,
        };

        if value.negation {
            Ok(Arc::new(move |ctx: &C| !eval(ctx)))
        } else {
            Ok(eval)
        }
    }

    fn term(&self, term: &Term, depth: usize) -> Result<BoolExprFunc<C>, OttlError> {
        let mut operands = term
            .values()
            .map(|v| self.boolean_value(v, depth))
            .collect::<Result<Vec<_>, _>>()?;

        if operands.len() == 1 {
            return Ok(operands.remove(0));
        }
        Ok(Arc::new(move |ctx: &C| operands.iter().all(|eval| eval(ctx))))
    }

    pub(crate) fn boolean_expression(
        &self,
        expr: &BooleanExpression,
    ) -> Result<BoolExprFunc<C>, OttlError> {
        self.expression_at(expr, 0)
    }

    fn expression_at(
        &self,
        expr: &BooleanExpression,
        depth: usize,
    ) -> Result<BoolExprFunc<C>, OttlError> {
        let mut terms = expr
            .terms()
            .map(|t| self.term(t, depth))
            .collect::<Result<Vec<_>, _>>()?;

        if terms.len() == 1 {
            return Ok(terms.remove(0));
        }
        Ok(Arc::new(move |ctx: &C| terms.iter().any(|eval| eval(ctx))))
    }
}
