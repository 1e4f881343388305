// SPDX-License-Identifier: MIT

//! Filter configuration - YAML file loading and validation

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::FilterError;

/// Top-level filter definition
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilterConfig {
    /// Name used to tag log lines
    #[serde(default)]
    pub name: Option<String>,
    /// Drop rules, checked in order
    pub rules: Vec<RuleDefinition>,
    /// Extra enum symbols on top of the standard ones
    #[serde(default)]
    pub enums: BTreeMap<String, i64>,
}

/// A named condition; matching records are dropped
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RuleDefinition {
    pub name: String,
    pub condition: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl FilterConfig {
    /// Check the config before any condition is compiled
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.rules.is_empty() {
            return Err(FilterError::config("filter has no rules"));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                return Err(FilterError::config("rule name must not be empty"));
            }
            if rule.condition.trim().is_empty() {
                return Err(FilterError::config(format!(
                    "rule '{}' has an empty condition",
                    rule.name
                )));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(FilterError::DuplicateRule(rule.name.clone()));
            }
        }
        Ok(())
    }
}

/// Loads filter configurations from YAML files
pub struct FilterConfigLoader;

impl FilterConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a filter configuration from a YAML file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<FilterConfig, FilterError> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a filter configuration from a YAML string
    pub fn parse_yaml(content: &str) -> Result<FilterConfig, FilterError> {
        let config: FilterConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }
}

impl Default for FilterConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_filter_config() {
        let yaml = r#"
name: drop-noise
rules:
  - name: debug-logs
    description: "Anything below INFO"
    condition: 'severity_number < SEVERITY_NUMBER_INFO'
  - name: health-checks
    condition: 'attributes["http.route"] == "/healthz"'
enums:
  CUSTOM_LEVEL: 42
"#;
        let config = FilterConfigLoader::parse_yaml(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("drop-noise"));
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].name, "debug-logs");
        assert_eq!(
            config.rules[0].description.as_deref(),
            Some("Anything below INFO")
        );
        assert_eq!(
            config.rules[1].condition,
            r#"attributes["http.route"] == "/healthz""#
        );
        assert_eq!(config.enums.get("CUSTOM_LEVEL"), Some(&42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let yaml = r#"
rules:
  - name: all
    condition: "true"
"#;
        let config = FilterConfigLoader::parse_yaml(yaml).unwrap();
        assert!(config.name.is_none());
        assert!(config.enums.is_empty());
        assert!(config.rules[0].description.is_none());
    }

    #[test]
    fn test_missing_rules_is_yaml_error() {
        let result = FilterConfigLoader::parse_yaml("name: nothing\n");
        assert!(matches!(result, Err(FilterError::Yaml(_))));
    }

    #[test]
    fn test_validate_rejects_empty_and_duplicates() {
        let rule = |name: &str, condition: &str| RuleDefinition {
            name: name.to_string(),
            condition: condition.to_string(),
            description: None,
        };
        let config = |rules: Vec<RuleDefinition>| FilterConfig {
            name: None,
            rules,
            enums: BTreeMap::new(),
        };

        assert!(matches!(
            config(vec![]).validate(),
            Err(FilterError::Config(_))
        ));
        assert!(matches!(
            config(vec![rule("a", "  ")]).validate(),
            Err(FilterError::Config(_))
        ));
        assert!(matches!(
            config(vec![rule("", "true")]).validate(),
            Err(FilterError::Config(_))
        ));
        match config(vec![rule("a", "true"), rule("a", "false")]).validate() {
            Err(FilterError::DuplicateRule(name)) => assert_eq!(name, "a"),
            other => panic!("expected duplicate rule error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("ottl-rs-config-{}.yaml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "rules:\n  - name: r\n    condition: 'name == \"x\"'").unwrap();

        let config = FilterConfigLoader::new().load(&path).unwrap();
        assert_eq!(config.rules[0].condition, r#"name == "x""#);
        fs::remove_file(&path).unwrap();

        let missing = FilterConfigLoader::new().load(&path);
        assert!(matches!(missing, Err(FilterError::Io(_))));
    }
}
