use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::contract::{ContractError, InterfaceContract};
use crate::diagnostic::Diagnostic;

/// Project-level configuration loaded from `.override-guard.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub global: GlobalConfig,
    #[serde(default)]
    pub checks: HashMap<String, CheckConfig>,
    /// Extra contracts, checked alongside the built-in ones
    #[serde(default)]
    pub contracts: Vec<InterfaceContract>,
    #[serde(default)]
    pub suppressions: SuppressionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub output_format: String,
    pub builtin_contracts: bool,
    pub trace: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_format: "text".to_string(),
            builtin_contracts: true,
            trace: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuppressionConfig {
    /// Glob patterns matched against diagnostic file paths
    pub files: Vec<String>,
    /// Glob patterns matched against type names
    pub types: Vec<String>,
}

impl Config {
    /// Load config from a TOML file path. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Validate every configured contract.
    pub fn validate(&self) -> Result<(), ContractError> {
        self.contracts.iter().try_for_each(|c| c.validate())
    }

    /// Check if a check is enabled according to config.
    pub fn is_check_enabled(&self, name: &str) -> bool {
        self.checks
            .get(name)
            .and_then(|c| c.enabled)
            .unwrap_or(true)
    }

    /// Check if a file path should be excluded based on suppression glob patterns.
    pub fn is_file_excluded(&self, file_path: &Path) -> bool {
        let path_str = file_path.to_string_lossy();
        matches_any(&self.suppressions.files, &path_str)
    }

    /// Check if diagnostics on a type are suppressed.
    pub fn is_type_suppressed(&self, type_name: &str) -> bool {
        matches_any(&self.suppressions.types, type_name)
    }

    /// Generate default config file content.
    pub fn default_toml() -> &'static str {
        r#"# override-guard configuration
# See: https://github.com/safestackai/override-guard

[global]
# Output format: "text", "json", "sarif"
output_format = "text"
# Include the built-in contracts (slog-handler, ...)
builtin_contracts = true
# Collect debug events in each unit's run trace
trace = false

# Per-check overrides
# [checks.slog-handler]
# enabled = false

# Additional contracts
# [[contracts]]
# id = "sink"
# interface_module = "example.com/sink"
# interface_name = "Sink"
# detection = ["embedding", "conformance"]
#
# [[contracts.required_methods]]
# name = "Flush"
# returns = [{ kind = "named", package = "", name = "error" }]

[suppressions]
# Glob patterns for files to skip entirely
files = ["testdata/**"]
# Glob patterns for type names to skip
types = []
"#
    }
}

fn matches_any(patterns: &[String], value: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| glob::Pattern::new(pattern).is_ok_and(|p| p.matches(value)))
}

/// Filter diagnostics based on config.
pub fn apply_suppressions(diagnostics: Vec<Diagnostic>, config: &Config) -> Vec<Diagnostic> {
    diagnostics
        .into_iter()
        .filter(|d| {
            config.is_check_enabled(&d.check)
                && !config.is_file_excluded(&d.location.file)
                && !config.is_type_suppressed(&d.type_name)
        })
        .collect()
}
