use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::Position;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl From<&Position> for SourceLocation {
    fn from(pos: &Position) -> Self {
        Self {
            file: pos.file.clone(),
            line: pos.line,
            column: pos.column,
        }
    }
}

/// One reported finding: a type adopting an interface without declaring one
/// of the methods its contract requires. Always anchored at the type
/// declaration, since the missing method has no position of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Id of the contract check that produced it
    pub check: String,
    /// Package the type belongs to
    pub unit: String,
    pub type_name: String,
    pub interface: String,
    pub method: String,
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn new(
        check: impl Into<String>,
        unit: impl Into<String>,
        type_name: impl Into<String>,
        interface: impl Into<String>,
        method: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        let type_name = type_name.into();
        let interface = interface.into();
        let method = method.into();
        Self {
            message: message(&type_name, &interface, &method),
            check: check.into(),
            unit: unit.into(),
            type_name,
            interface,
            method,
            location,
        }
    }
}

pub fn message(type_name: &str, interface: &str, method: &str) -> String {
    format!("{type_name} implements {interface} but does not implement {method} method")
}
