// SPDX-License-Identifier: MIT

//! Condition text reader
//!
//! Reads conditions like:
//! - `name == "bear"`
//! - `severity_number < SEVERITY_NUMBER_WARN`
//! - `attributes["http.route"] == "/healthz" and not (duration > 1.5)`
//!
//! into a [`BooleanExpression`]. Identifiers written in `UPPER_SNAKE_CASE`
//! are enum symbols, any other identifier starts a path.

use super::ast::{BooleanExpression, BooleanValue, Comparison, Term, MAX_NESTING};
use super::compare::CompareOp;
use super::value::{EnumSymbol, Field, Path, Value};
use crate::error::OttlError;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    Op(CompareOp),
    And,
    Or,
    Not,
    True,
    False,
    Nil,
    Str(String),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Ident(String),
}

#[derive(Debug)]
struct Spanned {
    offset: usize,
    token: Token,
}

/// Parse a full condition
pub fn parse_condition(input: &str) -> Result<BooleanExpression, OttlError> {
    let mut reader = Reader::new(input)?;
    let expr = reader.expression()?;
    reader.finish()?;
    Ok(expr)
}

/// Parse a single comparison such as `name != "cat"`
pub fn parse_comparison(input: &str) -> Result<Comparison, OttlError> {
    let mut reader = Reader::new(input)?;
    let comparison = reader.comparison()?;
    reader.finish()?;
    Ok(comparison)
}

fn tokenize(input: &str) -> Result<Vec<Spanned>, OttlError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let token = match bytes[i] {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'(' => {
                i += 1;
                Token::LParen
            }
            b')' => {
                i += 1;
                Token::RParen
            }
            b'[' => {
                i += 1;
                Token::LBracket
            }
            b']' => {
                i += 1;
                Token::RBracket
            }
            b'.' => {
                i += 1;
                Token::Dot
            }
            b'=' | b'!' | b'<' | b'>' => {
                let len = if bytes.get(i + 1) == Some(&b'=') { 2 } else { 1 };
                let text = &input[i..i + len];
                i += len;
                let op = text.parse::<CompareOp>().map_err(|_| {
                    OttlError::syntax(start, format!("unknown operator '{}'", text))
                })?;
                Token::Op(op)
            }
            quote @ (b'"' | b'\'') => {
                let (s, end) = read_string(input, i, quote as char)?;
                i = end;
                Token::Str(s)
            }
            b'0' if matches!(bytes.get(i + 1), Some(b'x' | b'X')) => {
                let (b, end) = read_bytes(input, i)?;
                i = end;
                Token::Bytes(b)
            }
            b'-' | b'0'..=b'9' => {
                let (token, end) = read_number(input, i)?;
                i = end;
                token
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let end = scan(bytes, i, |c| c.is_ascii_alphanumeric() || c == b'_');
                let word = &input[i..end];
                i = end;
                match word {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    "true" => Token::True,
                    "false" => Token::False,
                    "nil" => Token::Nil,
                    _ => Token::Ident(word.to_string()),
                }
            }
            _ => {
                let c = input[i..].chars().next().unwrap_or_default();
                return Err(OttlError::syntax(
                    start,
                    format!("unexpected character '{}'", c),
                ));
            }
        };
        tokens.push(Spanned {
            offset: start,
            token,
        });
    }

    Ok(tokens)
}

fn scan(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    let mut end = from;
    while end < bytes.len() && pred(bytes[end]) {
        end += 1;
    }
    end
}

fn read_string(input: &str, start: usize, quote: char) -> Result<(String, usize), OttlError> {
    let mut out = String::new();
    let mut chars = input[start + 1..].char_indices();

    while let Some((i, c)) = chars.next() {
        let offset = start + 1 + i;
        match c {
            c if c == quote => return Ok((out, offset + 1)),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, c @ ('\\' | '"' | '\''))) => out.push(c),
                Some((_, c)) => {
                    return Err(OttlError::syntax(offset, format!("unknown escape '\\{}'", c)))
                }
                None => break,
            },
            c => out.push(c),
        }
    }

    Err(OttlError::syntax(start, "unterminated string"))
}

fn read_bytes(input: &str, start: usize) -> Result<(Vec<u8>, usize), OttlError> {
    let bytes = input.as_bytes();
    let end = scan(bytes, start + 2, |c| c.is_ascii_hexdigit());
    let digits = &input[start + 2..end];

    if digits.is_empty() || digits.len() % 2 != 0 {
        return Err(OttlError::syntax(
            start,
            "byte literal needs an even number of hex digits",
        ));
    }

    let decoded = (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| OttlError::syntax(start, e.to_string()))?;
    Ok((decoded, end))
}

fn read_number(input: &str, start: usize) -> Result<(Token, usize), OttlError> {
    let bytes = input.as_bytes();
    let mut end = start;
    if bytes[end] == b'-' {
        end += 1;
    }
    let digits_start = end;
    end = scan(bytes, end, |c| c.is_ascii_digit());
    if end == digits_start {
        return Err(OttlError::syntax(start, "expected digits after '-'"));
    }

    let mut is_float = false;
    if bytes.get(end) == Some(&b'.') {
        is_float = true;
        end = scan(bytes, end + 1, |c| c.is_ascii_digit());
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        is_float = true;
        end += 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        end = scan(bytes, end, |c| c.is_ascii_digit());
    }

    let text = &input[start..end];
    let token = if is_float {
        text.parse::<f64>()
            .map(Token::Float)
            .map_err(|e| OttlError::syntax(start, format!("invalid float '{}': {}", text, e)))?
    } else {
        text.parse::<i64>()
            .map(Token::Int)
            .map_err(|e| OttlError::syntax(start, format!("invalid int '{}': {}", text, e)))?
    };
    Ok((token, end))
}

fn is_enum_symbol(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

struct Reader {
    tokens: Vec<Spanned>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl Reader {
    fn new(input: &str) -> Result<Self, OttlError> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
            end: input.len(),
            depth: 0,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|s| &s.token)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |s| s.offset)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|s| s.token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> OttlError {
        let message = message.into();
        if self.pos >= self.tokens.len() {
            OttlError::syntax(self.end, format!("{} but the condition ended", message))
        } else {
            OttlError::syntax(self.offset(), message)
        }
    }

    fn finish(&self) -> Result<(), OttlError> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(OttlError::syntax(
                self.offset(),
                format!("unexpected {:?}", token),
            )),
        }
    }

    fn expression(&mut self) -> Result<BooleanExpression, OttlError> {
        let mut expr = BooleanExpression::new(self.term()?);
        while self.eat(&Token::Or) {
            expr = expr.or(self.term()?);
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Term, OttlError> {
        let mut term = Term::new(self.boolean_value()?);
        while self.eat(&Token::And) {
            term = term.and(self.boolean_value()?);
        }
        Ok(term)
    }

    fn boolean_value(&mut self) -> Result<BooleanValue, OttlError> {
        let negation = self.eat(&Token::Not);

        let value = match self.peek() {
            Some(Token::LParen) => {
                if self.depth == MAX_NESTING {
                    return Err(self.error(format!(
                        "parentheses nest deeper than {} levels",
                        MAX_NESTING
                    )));
                }
                self.pos += 1;
                self.depth += 1;
                let expr = self.expression()?;
                self.depth -= 1;
                if !self.eat(&Token::RParen) {
                    return Err(self.error("expected ')'"));
                }
                BooleanValue::sub_expr(expr)
            }
            Some(Token::True | Token::False) if !matches!(self.peek_at(1), Some(Token::Op(_))) => {
                BooleanValue::constant(self.next() == Some(Token::True))
            }
            _ => BooleanValue::comparison(self.comparison()?),
        };

        Ok(if negation { value.negate() } else { value })
    }

    fn comparison(&mut self) -> Result<Comparison, OttlError> {
        let left = self.value()?;
        let op = match self.peek() {
            Some(Token::Op(op)) => *op,
            _ => return Err(self.error("expected comparison operator")),
        };
        self.pos += 1;
        let right = self.value()?;
        Ok(Comparison::new(left, op, right))
    }

    fn value(&mut self) -> Result<Value, OttlError> {
        let err = self.error("expected a value");
        let Some(token) = self.next() else {
            return Err(err);
        };
        let value = match token {
            Token::Str(s) => Value::String(s),
            Token::Int(n) => Value::Int(n),
            Token::Float(n) => Value::Float(n),
            Token::Bytes(b) => Value::Bytes(b),
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::Nil => Value::Nil,
            Token::Ident(name) if is_enum_symbol(&name) => Value::Enum(EnumSymbol(name)),
            Token::Ident(name) => Value::Path(self.path(name)?),
            _ => return Err(err),
        };
        Ok(value)
    }

    fn path(&mut self, first: String) -> Result<Path, OttlError> {
        let mut fields = vec![self.field(first)?];
        while self.eat(&Token::Dot) {
            let name = match self.peek() {
                Some(Token::Ident(name)) => name.clone(),
                _ => return Err(self.error("expected field name after '.'")),
            };
            self.pos += 1;
            fields.push(self.field(name)?);
        }
        Ok(Path::new(fields))
    }

    fn field(&mut self, name: String) -> Result<Field, OttlError> {
        if !self.eat(&Token::LBracket) {
            return Ok(Field::new(name));
        }
        let key = match self.peek() {
            Some(Token::Str(key)) => key.clone(),
            _ => return Err(self.error("expected string map key")),
        };
        self.pos += 1;
        if !self.eat(&Token::RBracket) {
            return Err(self.error("expected ']'"));
        }
        Ok(Field::keyed(name, key))
    }
}
