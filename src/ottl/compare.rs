// SPDX-License-Identifier: MIT

//! Comparison of resolved scalars
//!
//! Each scalar is assigned a [`Category`]. Values of the same category are
//! ordered natively; values of different categories are never equal and
//! never ordered. Comparing never fails.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::value::Scalar;
use crate::error::OttlError;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// ==
    Eq,
    /// !=
    Ne,
    /// <
    Lt,
    /// <=
    Lte,
    /// >
    Gt,
    /// >=
    Gte,
}

impl CompareOp {
    /// Apply the operator to the ordering of two values, `None` meaning the
    /// values are not comparable.
    fn holds(self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (CompareOp::Ne, None) => true,
            (_, None) => false,
            (CompareOp::Eq, Some(o)) => o == Ordering::Equal,
            (CompareOp::Ne, Some(o)) => o != Ordering::Equal,
            (CompareOp::Lt, Some(o)) => o == Ordering::Less,
            (CompareOp::Lte, Some(o)) => o != Ordering::Greater,
            (CompareOp::Gt, Some(o)) => o == Ordering::Greater,
            (CompareOp::Gte, Some(o)) => o != Ordering::Less,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Ne => write!(f, "!="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
        }
    }
}

impl FromStr for CompareOp {
    type Err = OttlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(CompareOp::Eq),
            "!=" => Ok(CompareOp::Ne),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Lte),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Gte),
            other => Err(OttlError::UnknownOperator(other.to_string())),
        }
    }
}

/// Coercion bucket deciding whether two scalars are comparable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Numeric,
    String,
    Bytes,
    Bool,
    Nil,
}

/// Borrowed view of a scalar, already sorted into its category
enum Classified<'a> {
    Numeric(Number),
    String(&'a str),
    Bytes(&'a [u8]),
    Bool(bool),
    Nil,
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(n) => n,
        }
    }

    fn partial_cmp(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            // Large integers may lose precision here
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

fn classify(scalar: &Scalar) -> Classified<'_> {
    match scalar {
        Scalar::Nil => Classified::Nil,
        Scalar::Bytes(b) if b.is_empty() => Classified::Nil,
        Scalar::Bytes(b) => Classified::Bytes(b),
        Scalar::String(s) => Classified::String(s),
        Scalar::Float(n) => Classified::Numeric(Number::Float(*n)),
        Scalar::Int(n) => Classified::Numeric(Number::Int(*n)),
        Scalar::Bool(b) => Classified::Bool(*b),
    }
}

/// Category of a resolved scalar
pub fn category(scalar: &Scalar) -> Category {
    match classify(scalar) {
        Classified::Numeric(_) => Category::Numeric,
        Classified::String(_) => Category::String,
        Classified::Bytes(_) => Category::Bytes,
        Classified::Bool(_) => Category::Bool,
        Classified::Nil => Category::Nil,
    }
}

fn order(left: &Scalar, right: &Scalar) -> Option<Ordering> {
    match (classify(left), classify(right)) {
        (Classified::Nil, Classified::Nil) => Some(Ordering::Equal),
        (Classified::Numeric(a), Classified::Numeric(b)) => a.partial_cmp(b),
        (Classified::String(a), Classified::String(b)) => Some(a.cmp(b)),
        (Classified::Bytes(a), Classified::Bytes(b)) => Some(a.cmp(b)),
        (Classified::Bool(a), Classified::Bool(b)) => Some(a.cmp(&b)),
        _ => None,
    }
}

/// Compare two resolved scalars with `op`
pub fn compare(left: &Scalar, right: &Scalar, op: CompareOp) -> bool {
    op.holds(order(left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OPS: [CompareOp; 6] = [
        CompareOp::Eq,
        CompareOp::Ne,
        CompareOp::Lt,
        CompareOp::Lte,
        CompareOp::Gt,
        CompareOp::Gte,
    ];

    #[test]
    fn test_compare_op_display() {
        assert_eq!(format!("{}", CompareOp::Eq), "==");
        assert_eq!(format!("{}", CompareOp::Ne), "!=");
        assert_eq!(format!("{}", CompareOp::Lt), "<");
        assert_eq!(format!("{}", CompareOp::Lte), "<=");
        assert_eq!(format!("{}", CompareOp::Gt), ">");
        assert_eq!(format!("{}", CompareOp::Gte), ">=");
    }

    #[test]
    fn test_compare_op_from_str() {
        for op in ALL_OPS {
            assert_eq!(op.to_string().parse::<CompareOp>().unwrap(), op);
        }
        assert_eq!(
            "=~".parse::<CompareOp>(),
            Err(OttlError::UnknownOperator("=~".to_string()))
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(category(&Scalar::Int(1)), Category::Numeric);
        assert_eq!(category(&Scalar::Float(1.5)), Category::Numeric);
        assert_eq!(category(&Scalar::from("x")), Category::String);
        assert_eq!(category(&Scalar::Bytes(vec![1])), Category::Bytes);
        assert_eq!(category(&Scalar::Bytes(vec![])), Category::Nil);
        assert_eq!(category(&Scalar::Bool(false)), Category::Bool);
        assert_eq!(category(&Scalar::Nil), Category::Nil);
    }

    #[test]
    fn test_nil_reflexive() {
        assert!(compare(&Scalar::Nil, &Scalar::Nil, CompareOp::Eq));
        assert!(compare(&Scalar::Nil, &Scalar::Bytes(vec![]), CompareOp::Eq));
        assert!(compare(&Scalar::Bytes(vec![]), &Scalar::Nil, CompareOp::Eq));
        assert!(!compare(&Scalar::Nil, &Scalar::Nil, CompareOp::Ne));
        assert!(compare(&Scalar::Nil, &Scalar::Nil, CompareOp::Lte));
        assert!(compare(&Scalar::Nil, &Scalar::Nil, CompareOp::Gte));
        assert!(!compare(&Scalar::Nil, &Scalar::Nil, CompareOp::Lt));
    }

    #[test]
    fn test_nil_against_values() {
        for other in [Scalar::Int(0), Scalar::from(""), Scalar::Bool(false)] {
            assert!(!compare(&Scalar::Nil, &other, CompareOp::Eq));
            assert!(compare(&Scalar::Nil, &other, CompareOp::Ne));
        }
    }

    #[test]
    fn test_numeric_cross_coercion() {
        let ints = [-7_i64, 0, 3, 6, 1 << 40];
        let floats = [-7.0, -0.5, 0.0, 3.14, 6.0, 1e12];
        for i in ints {
            for f in floats {
                let (a, b) = (i as f64, f);
                let l = Scalar::Int(i);
                let r = Scalar::Float(f);
                assert_eq!(compare(&l, &r, CompareOp::Eq), a == b, "{} == {}", i, f);
                assert_eq!(compare(&l, &r, CompareOp::Ne), a != b, "{} != {}", i, f);
                assert_eq!(compare(&l, &r, CompareOp::Lt), a < b, "{} < {}", i, f);
                assert_eq!(compare(&l, &r, CompareOp::Lte), a <= b, "{} <= {}", i, f);
                assert_eq!(compare(&l, &r, CompareOp::Gt), a > b, "{} > {}", i, f);
                assert_eq!(compare(&l, &r, CompareOp::Gte), a >= b, "{} >= {}", i, f);
            }
        }
    }

    #[test]
    fn test_int_comparison_is_exact() {
        let a = Scalar::Int(i64::MAX);
        let b = Scalar::Int(i64::MAX - 1);
        assert!(compare(&a, &b, CompareOp::Gt));
        assert!(compare(&a, &b, CompareOp::Ne));
    }

    #[test]
    fn test_nan_is_not_comparable() {
        let nan = Scalar::Float(f64::NAN);
        assert!(!compare(&nan, &nan, CompareOp::Eq));
        assert!(compare(&nan, &nan, CompareOp::Ne));
        assert!(!compare(&nan, &Scalar::Int(1), CompareOp::Lt));
        assert!(!compare(&nan, &Scalar::Int(1), CompareOp::Gte));
    }

    #[test]
    fn test_category_mismatch_totality() {
        let pairs = [
            (Scalar::Bool(true), Scalar::Int(0)),
            (Scalar::from("true"), Scalar::Bool(true)),
            (Scalar::from("1"), Scalar::Int(1)),
            (Scalar::Bytes(b"a".to_vec()), Scalar::from("a")),
            (Scalar::Float(1.0), Scalar::Bool(true)),
            (Scalar::Nil, Scalar::Bytes(b"a".to_vec())),
        ];
        for (a, b) in pairs {
            for (l, r) in [(&a, &b), (&b, &a)] {
                assert!(!compare(l, r, CompareOp::Eq), "{:?} == {:?}", l, r);
                assert!(compare(l, r, CompareOp::Ne), "{:?} != {:?}", l, r);
                for op in [CompareOp::Lt, CompareOp::Lte, CompareOp::Gt, CompareOp::Gte] {
                    assert!(!compare(l, r, op), "{:?} {} {:?}", l, op, r);
                }
            }
        }
    }

    #[test]
    fn test_literal_scenarios() {
        assert!(compare(&Scalar::Int(6), &Scalar::Float(3.14), CompareOp::Gt));
        assert!(!compare(&Scalar::Int(6), &Scalar::Float(3.14), CompareOp::Eq));
        assert!(compare(&Scalar::from("foo"), &Scalar::from("bar"), CompareOp::Gt));
        assert!(!compare(&Scalar::Bool(true), &Scalar::Int(0), CompareOp::Gt));
        assert!(compare(
            &Scalar::Bytes(b"a".to_vec()),
            &Scalar::Bytes(b"b".to_vec()),
            CompareOp::Lt
        ));
    }

    #[test]
    fn test_bool_ordering() {
        assert!(compare(&Scalar::Bool(true), &Scalar::Bool(false), CompareOp::Gt));
        assert!(compare(&Scalar::Bool(false), &Scalar::Bool(true), CompareOp::Lt));
        assert!(compare(&Scalar::Bool(true), &Scalar::Bool(true), CompareOp::Gte));
    }

    #[test]
    fn test_string_orders_by_code_point() {
        assert!(compare(&Scalar::from("Z"), &Scalar::from("a"), CompareOp::Lt));
        assert!(compare(&Scalar::from("é"), &Scalar::from("z"), CompareOp::Gt));
        assert!(compare(&Scalar::from("ab"), &Scalar::from("abc"), CompareOp::Lt));
    }

    #[test]
    fn test_bytes_order_unsigned() {
        assert!(compare(
            &Scalar::Bytes(vec![0x80]),
            &Scalar::Bytes(vec![0x7f]),
            CompareOp::Gt
        ));
        assert!(compare(
            &Scalar::Bytes(vec![1, 2]),
            &Scalar::Bytes(vec![1, 2]),
            CompareOp::Eq
        ));
    }
}
