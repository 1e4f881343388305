// SPDX-License-Identifier: MIT

//! Record filtering driven by conditions
//!
//! This module provides:
//! - `FilterConfig` - YAML rule definitions
//! - `Record` - JSON-backed telemetry records and their path resolver
//! - `FilterProcessor` - compiled rules applied to batches or a channel

mod config;
mod enums;
mod processor;
mod record;

pub use config::{FilterConfig, FilterConfigLoader, RuleDefinition};
pub use enums::standard_enums;
pub use processor::{CompiledRule, FilterProcessor, FilterStats};
pub use record::{to_scalar, Record, RecordPaths};
