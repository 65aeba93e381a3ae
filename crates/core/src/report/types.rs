use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::diagnostic::Diagnostic;

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub units_analyzed: Vec<PathBuf>,
    pub total_diagnostics: usize,
    pub diagnostics_by_check: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    pub fn from_diagnostics(
        units: Vec<PathBuf>,
        diagnostics: Vec<Diagnostic>,
        advisories: Vec<String>,
    ) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for d in &diagnostics {
            *counts.entry(d.check.clone()).or_default() += 1;
        }
        Self {
            units_analyzed: units,
            total_diagnostics: diagnostics.len(),
            diagnostics_by_check: counts,
            advisories,
            diagnostics,
        }
    }
}
