use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::BasicKind;

/// Expected shape of one parameter or result of a required method
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Basic { name: BasicKind },
    Named { package: String, name: String },
    SliceOf { package: String, name: String },
}

impl TypeDescriptor {
    pub fn basic(kind: BasicKind) -> Self {
        TypeDescriptor::Basic { name: kind }
    }

    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDescriptor::Named {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn slice_of(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDescriptor::SliceOf {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Basic { name } => write!(f, "{name}"),
            TypeDescriptor::Named { package, name } if package.is_empty() => write!(f, "{name}"),
            TypeDescriptor::Named { package, name } => write!(f, "{package}.{name}"),
            TypeDescriptor::SliceOf { package, name } if package.is_empty() => write!(f, "[]{name}"),
            TypeDescriptor::SliceOf { package, name } => write!(f, "[]{package}.{name}"),
        }
    }
}

/// A method the adopting type must declare itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredMethod {
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeDescriptor>,
    #[serde(default, alias = "results")]
    pub returns: Vec<TypeDescriptor>,
}

impl RequiredMethod {
    pub fn new(
        name: impl Into<String>,
        params: Vec<TypeDescriptor>,
        returns: Vec<TypeDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
        }
    }
}

impl fmt::Display for RequiredMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |ds: &[TypeDescriptor]| {
            ds.iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "{}({})", self.name, join(&self.params))?;
        match self.returns.len() {
            0 => Ok(()),
            1 => write!(f, " {}", self.returns[0]),
            _ => write!(f, " ({})", join(&self.returns)),
        }
    }
}

/// How a declared type is recognised as adopting the contract interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// Has an embedded field whose type is exactly the interface
    Embedding,
    /// Value or pointer form already satisfies the interface
    Conformance,
}

fn default_detection() -> Vec<DetectionMode> {
    vec![DetectionMode::Embedding, DetectionMode::Conformance]
}

/// An interface plus the methods an adopting type has to override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceContract {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "interfaceModule")]
    pub interface_module: String,
    #[serde(alias = "interfaceName")]
    pub interface_name: String,
    #[serde(default = "default_detection")]
    pub detection: Vec<DetectionMode>,
    #[serde(alias = "requiredMethods")]
    pub required_methods: Vec<RequiredMethod>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("contract is missing its interface module or name")]
    MissingInterface,
    #[error("contract `{0}` requires no methods")]
    NoRequiredMethods(String),
    #[error("contract `{contract}` lists method `{method}` more than once")]
    DuplicateMethod { contract: String, method: String },
    #[error("contract `{0}` has no detection mode")]
    NoDetectionMode(String),
}

impl InterfaceContract {
    pub fn new(
        interface_module: impl Into<String>,
        interface_name: impl Into<String>,
        required_methods: Vec<RequiredMethod>,
    ) -> Self {
        Self {
            id: None,
            interface_module: interface_module.into(),
            interface_name: interface_name.into(),
            detection: default_detection(),
            required_methods,
            description: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_detection(mut self, detection: Vec<DetectionMode>) -> Self {
        self.detection = detection;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Last segment of the interface module path (`log/slog` -> `slog`)
    fn module_short_name(&self) -> &str {
        self.interface_module
            .rsplit('/')
            .next()
            .unwrap_or(&self.interface_module)
    }

    /// Configured id, or `<module>-<name>` in lowercase
    pub fn id(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}-{}", self.module_short_name(), self.interface_name).to_lowercase(),
        }
    }

    /// Interface name as printed in diagnostics, e.g. `slog.Handler`
    pub fn display_name(&self) -> String {
        let module = self.module_short_name();
        if module.is_empty() {
            self.interface_name.clone()
        } else {
            format!("{}.{}", module, self.interface_name)
        }
    }

    pub fn detects(&self, mode: DetectionMode) -> bool {
        self.detection.contains(&mode)
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        if self.interface_module.trim().is_empty() || self.interface_name.trim().is_empty() {
            return Err(ContractError::MissingInterface);
        }
        if self.required_methods.is_empty() {
            return Err(ContractError::NoRequiredMethods(self.id()));
        }
        if self.detection.is_empty() {
            return Err(ContractError::NoDetectionMode(self.id()));
        }
        let mut seen = HashSet::new();
        for m in &self.required_methods {
            if !seen.insert(m.name.as_str()) {
                return Err(ContractError::DuplicateMethod {
                    contract: self.id(),
                    method: m.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::full_contract;

    #[test]
    fn test_id_and_display_name() {
        let contract = InterfaceContract::new("log/slog", "Handler", vec![]);
        assert_eq!(contract.id(), "slog-handler");
        assert_eq!(contract.display_name(), "slog.Handler");
        assert_eq!(contract.clone().with_id("custom").id(), "custom");
    }

    #[test]
    fn test_default_detection_is_both() {
        let contract = InterfaceContract::new("log/slog", "Handler", vec![]);
        assert!(contract.detects(DetectionMode::Embedding));
        assert!(contract.detects(DetectionMode::Conformance));
    }

    #[test]
    fn test_validate() {
        assert!(full_contract().validate().is_ok());

        let empty = InterfaceContract::new("log/slog", "Handler", vec![]);
        assert_eq!(
            empty.validate(),
            Err(ContractError::NoRequiredMethods("slog-handler".to_string()))
        );

        let mut dup = full_contract();
        dup.required_methods.push(dup.required_methods[0].clone());
        assert!(matches!(dup.validate(), Err(ContractError::DuplicateMethod { .. })));

        let no_mode = full_contract().with_detection(vec![]);
        assert!(matches!(no_mode.validate(), Err(ContractError::NoDetectionMode(_))));

        let nameless = InterfaceContract::new("", "Handler", full_contract().required_methods);
        assert_eq!(nameless.validate(), Err(ContractError::MissingInterface));
    }

    #[test]
    fn test_deserialize_camel_case_contract() {
        let toml_str = r#"
interfaceModule = "log/slog"
interfaceName = "Handler"

[[requiredMethods]]
name = "WithGroup"
params = [{ kind = "basic", name = "string" }]
returns = [{ kind = "named", package = "log/slog", name = "Handler" }]
"#;
        let contract: InterfaceContract = toml::from_str(toml_str).unwrap();
        assert_eq!(contract.id(), "slog-handler");
        assert_eq!(contract.detection.len(), 2);
        assert_eq!(
            contract.required_methods[0].to_string(),
            "WithGroup(string) log/slog.Handler"
        );
    }
}
