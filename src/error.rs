// SPDX-License-Identifier: MIT

//! Typed error handling for ottl-rs
//!
//! Compiling a condition can only fail while binding enum symbols or while
//! reading condition text. Evaluating a compiled condition never fails.

use thiserror::Error;

/// Errors produced while building a condition
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OttlError {
    /// An enum symbol has no known integer constant
    #[error("enum symbol not found: {0}")]
    EnumNotFound(String),

    /// Condition text could not be read
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// Comparison operator not recognised
    #[error("unknown comparison operator: {0}")]
    UnknownOperator(String),

    /// Sub-expressions nest deeper than the compiler accepts
    #[error("sub-expressions nest deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// Top-level error type for the filter component
#[derive(Debug, Error)]
pub enum FilterError {
    /// A configured rule failed to compile
    #[error("rule '{rule}' is invalid: {source}")]
    Rule {
        rule: String,
        #[source]
        source: OttlError,
    },

    /// Two rules share a name
    #[error("duplicate rule name: {0}")]
    DuplicateRule(String),

    /// Configuration errors (empty rule set, bad values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input record is not a JSON object
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Condition errors outside of a configured rule
    #[error(transparent)]
    Ottl(#[from] OttlError),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl OttlError {
    /// Create a syntax error at a byte offset
    pub fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            offset,
            message: message.into(),
        }
    }
}

impl FilterError {
    /// Wrap a compile error with the name of the rule it belongs to
    pub fn rule(rule: impl Into<String>, source: OttlError) -> Self {
        Self::Rule {
            rule: rule.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid record error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }
}
