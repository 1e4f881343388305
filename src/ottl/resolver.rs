// SPDX-License-Identifier: MIT

//! Resolvers supplied when building a condition
//!
//! - [`PathResolver`] reads a field from the record under evaluation
//! - [`EnumResolver`] maps enum symbols to integers while compiling

use std::collections::HashMap;

use super::value::{EnumSymbol, Path, Scalar};
use crate::error::OttlError;

/// Reads a path from a record of type `C`.
///
/// Called on every evaluation, so implementations must be pure reads.
/// A missing field is up to the implementation; returning [`Scalar::Nil`]
/// is the usual choice.
pub trait PathResolver<C>: Send + Sync {
    fn resolve(&self, path: &Path, ctx: &C) -> Scalar;
}

impl<C, F> PathResolver<C> for F
where
    F: Fn(&Path, &C) -> Scalar + Send + Sync,
{
    fn resolve(&self, path: &Path, ctx: &C) -> Scalar {
        self(path, ctx)
    }
}

/// Maps enum symbols to their integer constants.
///
/// Only called while compiling; the result is captured in the compiled
/// condition.
pub trait EnumResolver: Send + Sync {
    fn resolve(&self, symbol: &EnumSymbol) -> Result<i64, OttlError>;
}

impl<F> EnumResolver for F
where
    F: Fn(&EnumSymbol) -> Result<i64, OttlError> + Send + Sync,
{
    fn resolve(&self, symbol: &EnumSymbol) -> Result<i64, OttlError> {
        self(symbol)
    }
}

/// Map-backed [`EnumResolver`]
#[derive(Debug, Clone, Default)]
pub struct EnumTable {
    symbols: HashMap<String, i64>,
}

impl EnumTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a symbol
    pub fn insert(&mut self, name: impl Into<String>, value: i64) {
        self.symbols.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: i64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl EnumResolver for EnumTable {
    fn resolve(&self, symbol: &EnumSymbol) -> Result<i64, OttlError> {
        self.get(symbol.as_str())
            .ok_or_else(|| OttlError::EnumNotFound(symbol.to_string()))
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for EnumTable {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<S: Into<String>> Extend<(S, i64)> for EnumTable {
    fn extend<I: IntoIterator<Item = (S, i64)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_table_resolve() {
        let table: EnumTable = [("TEST_ENUM", 0), ("TEST_ENUM_TWO", 2)].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(&EnumSymbol::new("TEST_ENUM_TWO")), Ok(2));
        assert_eq!(
            table.resolve(&EnumSymbol::new("MISSING")),
            Err(OttlError::EnumNotFound("MISSING".to_string()))
        );
    }

    #[test]
    fn test_enum_table_extend_overrides() {
        let mut table = EnumTable::new().with("A", 1);
        table.extend([("A", 10), ("B", 2)]);
        assert_eq!(table.get("A"), Some(10));
        assert_eq!(table.get("B"), Some(2));
    }

    #[test]
    fn test_closure_resolvers() {
        let paths = |path: &Path, ctx: &String| {
            if path.to_string() == "name" {
                Scalar::String(ctx.clone())
            } else {
                Scalar::Nil
            }
        };
        let ctx = "bear".to_string();
        assert_eq!(
            PathResolver::resolve(&paths, &Path::dotted("name"), &ctx),
            Scalar::from("bear")
        );
        assert_eq!(PathResolver::resolve(&paths, &Path::dotted("other"), &ctx), Scalar::Nil);

        let enums = |_: &EnumSymbol| -> Result<i64, OttlError> { Ok(7) };
        assert_eq!(EnumResolver::resolve(&enums, &EnumSymbol::new("X")), Ok(7));
    }
}
