use crate::model::{CompilationUnit, InterfaceResolver, ProgramFacts};
use crate::trace::RunTrace;

/// Gives checks read-only access to one unit's type facts, the interface
/// resolver, and the trace of the current run.
pub struct AnalysisContext<'a> {
    pub facts: &'a dyn ProgramFacts,
    pub resolver: &'a dyn InterfaceResolver,
    pub trace: &'a RunTrace,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        facts: &'a dyn ProgramFacts,
        resolver: &'a dyn InterfaceResolver,
        trace: &'a RunTrace,
    ) -> Self {
        Self {
            facts,
            resolver,
            trace,
        }
    }

    /// Context over a unit that resolves interfaces from its own imports
    pub fn for_unit(unit: &'a CompilationUnit, trace: &'a RunTrace) -> Self {
        Self::new(unit, unit, trace)
    }

    /// Package path of the analyzed unit
    pub fn unit_name(&self) -> &str {
        self.facts.package()
    }
}
