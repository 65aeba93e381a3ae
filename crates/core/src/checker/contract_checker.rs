use super::context::AnalysisContext;
use super::discovery::discover;
use super::traits::Checker;
use super::validator::validate;
use crate::contract::InterfaceContract;
use crate::diagnostic::Diagnostic;
use crate::report::reporter::diagnostics_for;

/// Runs one interface contract: discovery, validation, then reporting.
pub struct ContractChecker {
    id: String,
    interface: String,
    description: String,
    contract: InterfaceContract,
}

impl ContractChecker {
    pub fn new(contract: InterfaceContract) -> Self {
        let interface = contract.display_name();
        let description = contract.description.clone().unwrap_or_else(|| {
            let names: Vec<&str> = contract
                .required_methods
                .iter()
                .map(|m| m.name.as_str())
                .collect();
            format!(
                "Types adopting {} must declare {} themselves",
                interface,
                names.join(", ")
            )
        });
        Self {
            id: contract.id(),
            interface,
            description,
            contract,
        }
    }
}

impl Checker for ContractChecker {
    fn name(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn interface(&self) -> &str {
        &self.interface
    }

    fn fingerprint(&self) -> String {
        serde_json::to_string(&self.contract).unwrap_or_else(|_| self.id.clone())
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let unit = ctx.unit_name();
        discover(ctx, &self.contract)
            .into_iter()
            .map(|candidate| validate(ctx, candidate))
            .filter(|outcome| !outcome.is_compliant())
            .flat_map(|outcome| diagnostics_for(&self.id, unit, &outcome))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::test_support::*;
    use crate::trace::RunTrace;

    fn run(unit: &CompilationUnit) -> Vec<Diagnostic> {
        let trace = RunTrace::new(false);
        let ctx = AnalysisContext::for_unit(unit, &trace);
        ContractChecker::new(full_contract()).check(&ctx)
    }

    #[test]
    fn test_reports_missing_methods_at_declaration() {
        let mut unit = slog_unit("handlers");
        unit.types
            .push(embedding_handler("TraceHandler", 10, vec![handle(Receiver::Pointer)]));

        let diags = run(&unit);
        let messages: Vec<&str> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "TraceHandler implements slog.Handler but does not implement WithAttrs method",
                "TraceHandler implements slog.Handler but does not implement WithGroup method",
            ]
        );
        assert!(diags.iter().all(|d| d.location.line == 10 && d.check == "slog-handler"));
    }

    #[test]
    fn test_compliant_type_has_no_diagnostics() {
        let mut unit = slog_unit("handlers");
        unit.types.push(embedding_handler(
            "TraceHandler",
            10,
            vec![with_attrs(Receiver::Pointer), with_group(Receiver::Pointer)],
        ));
        assert!(run(&unit).is_empty());
    }

    #[test]
    fn test_inherited_conformance_is_flagged() {
        let mut unit = slog_unit("handlers");
        unit.types.push(plain_struct(
            "Base",
            5,
            vec![
                enabled(Receiver::Pointer),
                handle(Receiver::Pointer),
                with_attrs(Receiver::Pointer),
                with_group(Receiver::Pointer),
            ],
        ));
        unit.types.push(embedding(
            "Derived",
            20,
            TypeRef::pointer(TypeRef::named("handlers", "Base")),
        ));

        let diags = run(&unit);
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.type_name == "Derived"));
    }

    #[test]
    fn test_ambiguous_diamond_is_not_a_candidate() {
        let mut unit = slog_unit("handlers");
        unit.types.push(plain_struct(
            "Base",
            1,
            vec![
                enabled(Receiver::Pointer),
                handle(Receiver::Pointer),
                with_attrs(Receiver::Pointer),
                with_group(Receiver::Pointer),
            ],
        ));
        let base = || TypeRef::pointer(TypeRef::named("handlers", "Base"));
        unit.types.push(embedding("A", 2, base()));
        unit.types.push(embedding("B", 3, base()));
        unit.types.push(TypeDecl {
            name: "T".to_string(),
            position: pos(4),
            underlying: Underlying::Struct {
                fields: vec![
                    embedded_field(TypeRef::named("handlers", "A")),
                    embedded_field(TypeRef::named("handlers", "B")),
                ],
            },
            methods: vec![],
        });

        // A and B conform through *Base but declare nothing themselves
        let flagged: Vec<String> = run(&unit).into_iter().map(|d| d.type_name).collect();
        assert_eq!(flagged, vec!["A", "A", "B", "B"]);
    }

    #[test]
    fn test_default_description() {
        let checker = ContractChecker::new(full_contract());
        assert_eq!(
            checker.description(),
            "Types adopting slog.Handler must declare WithAttrs, WithGroup themselves"
        );
        assert_eq!(checker.interface(), "slog.Handler");
    }
}
