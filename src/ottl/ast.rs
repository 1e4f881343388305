// SPDX-License-Identifier: MIT

//! Abstract Syntax Tree for conditions
//!
//! Conditions are kept in sum-of-products form: an expression is a list of
//! terms joined by `or`, a term is a list of values joined by `and`. This
//! fixes `and` binding tighter than `or` without any precedence handling.

use std::fmt;

use super::compare::CompareOp;
use super::value::Value;

/// Deepest parenthesised sub-expression accepted when reading or compiling
pub const MAX_NESTING: usize = 64;

/// Comparison expression: left op right
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub left: Value,
    pub op: CompareOp,
    pub right: Value,
}

impl Comparison {
    pub fn new(left: Value, op: CompareOp, right: Value) -> Self {
        Self { left, op, right }
    }
}

/// The operand of a [`BooleanValue`]
#[derive(Debug, Clone, PartialEq)]
pub enum BooleanOperand {
    /// Literal true or false
    ConstExpr(bool),
    Comparison(Comparison),
    /// Parenthesized expression
    SubExpr(Box<BooleanExpression>),
}

/// A single operand of an `and` chain, optionally negated
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanValue {
    pub negation: bool,
    pub operand: BooleanOperand,
}

impl BooleanValue {
    pub fn constant(value: bool) -> Self {
        BooleanOperand::ConstExpr(value).into()
    }

    pub fn comparison(comparison: Comparison) -> Self {
        BooleanOperand::Comparison(comparison).into()
    }

    pub fn sub_expr(expr: BooleanExpression) -> Self {
        BooleanOperand::SubExpr(Box::new(expr)).into()
    }

    /// Toggle negation of this value only
    pub fn negate(mut self) -> Self {
        self.negation = !self.negation;
        self
    }
}

impl From<BooleanOperand> for BooleanValue {
    fn from(operand: BooleanOperand) -> Self {
        Self {
            negation: false,
            operand,
        }
    }
}

/// Values joined by `and`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub left: BooleanValue,
    pub right: Vec<BooleanValue>,
}

impl Term {
    pub fn new(left: BooleanValue) -> Self {
        Self {
            left,
            right: Vec::new(),
        }
    }

    pub fn and(mut self, value: BooleanValue) -> Self {
        self.right.push(value);
        self
    }

    /// All operands in evaluation order
    pub fn values(&self) -> impl Iterator<Item = &BooleanValue> {
        std::iter::once(&self.left).chain(self.right.iter())
    }
}

/// Terms joined by `or`
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpression {
    pub left: Term,
    pub right: Vec<Term>,
}

impl BooleanExpression {
    pub fn new(left: Term) -> Self {
        Self {
            left,
            right: Vec::new(),
        }
    }

    pub fn or(mut self, term: Term) -> Self {
        self.right.push(term);
        self
    }

    /// All terms in evaluation order
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        std::iter::once(&self.left).chain(self.right.iter())
    }
}

impl From<Term> for BooleanExpression {
    fn from(term: Term) -> Self {
        Self::new(term)
    }
}

impl From<BooleanValue> for BooleanExpression {
    fn from(value: BooleanValue) -> Self {
        Self::new(Term::new(value))
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

impl fmt::Display for BooleanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negation {
            f.write_str("not ")?;
        }
        match &self.operand {
            BooleanOperand::ConstExpr(b) => write!(f, "{}", b),
            BooleanOperand::Comparison(c) => write!(f, "{}", c),
            BooleanOperand::SubExpr(e) => write!(f, "({})", e),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl fmt::Display for BooleanExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}
