use super::context::AnalysisContext;
use super::contract_checker::ContractChecker;
use super::traits::Checker;
use crate::contract::InterfaceContract;
use crate::diagnostic::Diagnostic;
use crate::report::reporter::normalize;

/// Registry that holds all checks and runs them against a unit.
pub struct CheckerRegistry {
    checkers: Vec<Box<dyn Checker>>,
}

impl CheckerRegistry {
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }

    /// Register a checker
    pub fn register(&mut self, checker: Box<dyn Checker>) {
        self.checkers.push(checker);
    }

    /// Register one `ContractChecker` per contract, in order
    pub fn register_contracts(&mut self, contracts: Vec<InterfaceContract>) {
        for contract in contracts {
            self.register(Box::new(ContractChecker::new(contract)));
        }
    }

    /// Run all registered checkers, return diagnostics in reported order
    pub fn run_all(&self, context: &AnalysisContext) -> Vec<Diagnostic> {
        normalize(
            self.checkers
                .iter()
                .flat_map(|c| c.check(context))
                .collect(),
        )
    }

    /// List all registered checker names
    pub fn list_checkers(&self) -> Vec<&str> {
        self.checkers.iter().map(|c| c.name()).collect()
    }

    pub fn checkers(&self) -> &[Box<dyn Checker>] {
        &self.checkers
    }

    /// Combined fingerprint of every registered checker, in order
    pub fn fingerprint(&self) -> String {
        self.checkers
            .iter()
            .map(|c| c.fingerprint())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
