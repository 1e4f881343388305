// SPDX-License-Identifier: MIT

//! Operand values and the scalars they resolve to
//!
//! A [`Value`] is what appears on either side of a comparison. Literals are
//! already concrete; enum symbols are bound when the condition is compiled;
//! paths are only looked up against a record while evaluating. Every value
//! ends up as a [`Scalar`] before it reaches the comparator.

use std::fmt;

/// Name of an enum constant, e.g. `SEVERITY_NUMBER_INFO`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumSymbol(pub String);

impl EnumSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnumSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One segment of a path, optionally indexed by a map key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub map_key: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map_key: None,
        }
    }

    pub fn keyed(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map_key: Some(key.into()),
        }
    }
}

/// Reference to a field of the record being evaluated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub fields: Vec<Field>,
}

impl Path {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Build a path from dot-separated field names (no map keys)
    pub fn dotted(path: &str) -> Self {
        Self {
            fields: path.split('.').map(Field::new).collect(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&field.name)?;
            if let Some(key) = &field.map_key {
                write!(f, "[{:?}]", key)?;
            }
        }
        Ok(())
    }
}

/// An operand as written in a condition
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Bytes(Vec<u8>),
    String(String),
    Float(f64),
    Int(i64),
    Bool(bool),
    Enum(EnumSymbol),
    Path(Path),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bytes(b) => write_hex(f, b),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Float(n) => write!(f, "{:?}", n),
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Enum(sym) => write!(f, "{}", sym),
            Value::Path(path) => write!(f, "{}", path),
        }
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    f.write_str("0x")?;
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

/// A concrete value handed to the comparator
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    #[default]
    Nil,
    Bytes(Vec<u8>),
    String(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl Scalar {
    /// Nil, or an empty byte sequence
    pub fn is_nil(&self) -> bool {
        match self {
            Scalar::Nil => true,
            Scalar::Bytes(b) => b.is_empty(),
            _ => false,
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Float(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(b: Vec<u8>) -> Self {
        Scalar::Bytes(b)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Scalar::Nil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_value_is_nil() {
        assert_eq!(Value::default(), Value::Nil);
        assert_eq!(Scalar::default(), Scalar::Nil);
    }

    #[test]
    fn test_empty_bytes_is_nil() {
        assert!(Scalar::Nil.is_nil());
        assert!(Scalar::Bytes(vec![]).is_nil());
        assert!(!Scalar::Bytes(vec![0]).is_nil());
        assert!(!Scalar::String(String::new()).is_nil());
        assert!(!Scalar::Int(0).is_nil());
    }

    #[test]
    fn test_path_display() {
        let path = Path::new(vec![
            Field::new("resource"),
            Field::keyed("attributes", "service.name"),
        ]);
        assert_eq!(path.to_string(), r#"resource.attributes["service.name"]"#);
        assert_eq!(Path::dotted("a.b.c").to_string(), "a.b.c");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Bytes(vec![0x0a, 0xff]).to_string(), "0x0aff");
        assert_eq!(Value::String("say \"hi\"".into()).to_string(), r#""say \"hi\"""#);
        assert_eq!(Value::Float(6.0).to_string(), "6.0");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Enum(EnumSymbol::new("SPAN_KIND_SERVER")).to_string(), "SPAN_KIND_SERVER");
    }

    #[test]
    fn test_scalar_from_option() {
        assert_eq!(Scalar::from(None::<i64>), Scalar::Nil);
        assert_eq!(Scalar::from(Some("x")), Scalar::String("x".into()));
    }
}
