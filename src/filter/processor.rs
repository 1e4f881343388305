// SPDX-License-Identifier: MIT

//! Filter processor
//!
//! Compiles every configured rule once and drops records matched by any of
//! them. Rules are checked in config order and the first match wins.

use std::collections::BTreeMap;
use tokio::sync::mpsc;

use super::config::FilterConfig;
use super::enums::standard_enums;
use super::record::{Record, RecordPaths};
use crate::error::FilterError;
use crate::ottl::{BoolExprFunc, FunctionRegistry, Parser, TelemetrySettings};

const DEFAULT_NAME: &str = "filter";

/// A rule ready for evaluation
pub struct CompiledRule {
    pub name: String,
    condition: BoolExprFunc<Record>,
}

impl CompiledRule {
    pub fn matches(&self, record: &Record) -> bool {
        (self.condition)(record)
    }
}

/// Counters for one filtering pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStats {
    pub received: usize,
    pub kept: usize,
    /// Dropped records per rule name
    pub dropped: BTreeMap<String, usize>,
}

impl FilterStats {
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }

    fn record_drop(&mut self, rule: &str) {
        *self.dropped.entry(rule.to_string()).or_default() += 1;
    }
}

pub struct FilterProcessor {
    name: String,
    rules: Vec<CompiledRule>,
}

impl FilterProcessor {
    /// Validate the config and compile all of its rules
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;

        let name = config
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        let mut enums = standard_enums();
        enums.extend(config.enums.iter().map(|(k, v)| (k.clone(), *v)));

        let parser = Parser::<Record>::new(
            FunctionRegistry::new(),
            RecordPaths,
            enums,
            TelemetrySettings::new(name.clone()),
        );

        let rules = config
            .rules
            .iter()
            .map(|rule| {
                parser
                    .parse_condition(&rule.condition)
                    .map(|condition| CompiledRule {
                        name: rule.name.clone(),
                        condition,
                    })
                    .map_err(|e| FilterError::rule(&rule.name, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Compiled {} rules for filter '{}'", rules.len(), name);
        Ok(Self { name, rules })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Name of the first rule matching the record
    pub fn matching_rule(&self, record: &Record) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(record))
            .map(|rule| rule.name.as_str())
    }

    /// Filter a batch, returning the kept records in input order
    pub fn process(&self, records: Vec<Record>) -> (Vec<Record>, FilterStats) {
        let mut stats = FilterStats {
            received: records.len(),
            ..Default::default()
        };

        let kept: Vec<Record> = records
            .into_iter()
            .filter(|record| match self.matching_rule(record) {
                Some(rule) => {
                    stats.record_drop(rule);
                    false
                }
                None => true,
            })
            .collect();

        stats.kept = kept.len();
        (kept, stats)
    }

    /// Run as a pipeline stage until the input closes or the output is dropped
    pub async fn run(
        &self,
        mut input: mpsc::Receiver<Record>,
        output: mpsc::Sender<Record>,
    ) -> FilterStats {
        let mut stats = FilterStats::default();

        while let Some(record) = input.recv().await {
            stats.received += 1;
            if let Some(rule) = self.matching_rule(&record) {
                log::debug!("[{}] dropped record matching '{}'", self.name, rule);
                stats.record_drop(rule);
                continue;
            }
            if output.send(record).await.is_err() {
                log::warn!("[{}] downstream closed, stopping", self.name);
                break;
            }
            stats.kept += 1;
        }

        log::info!(
            "[{}] received {} records, kept {}, dropped {}",
            self.name,
            stats.received,
            stats.kept,
            stats.dropped_total()
        );
        stats
    }
}
