use super::context::AnalysisContext;
use crate::diagnostic::Diagnostic;

/// Core trait for all checks.
/// Implementors inspect one unit and return diagnostics.
pub trait Checker: Send + Sync {
    /// Unique identifier for this check (e.g., "slog-handler")
    fn name(&self) -> &str;

    /// Human-readable description of what this check enforces
    fn description(&self) -> &str;

    /// Interface this check is about, as printed in diagnostics
    fn interface(&self) -> &str;

    /// Stable digest input for caching; changes whenever results could change
    fn fingerprint(&self) -> String {
        self.name().to_string()
    }

    /// Run the check on the given analysis context, return diagnostics
    fn check(&self, context: &AnalysisContext) -> Vec<Diagnostic>;
}
