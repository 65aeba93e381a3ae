use std::collections::HashSet;
use std::fmt;

use super::context::AnalysisContext;
use crate::contract::{DetectionMode, InterfaceContract};
use crate::model::{interface_method_set, satisfies_interface, Position, TypeView};

/// A declared type found to adopt a contract's interface
#[derive(Clone, Copy)]
pub struct CandidateRecord<'a> {
    pub ty: &'a dyn TypeView,
    pub contract: &'a InterfaceContract,
    /// Has an embedded field of exactly the interface type
    pub embeds: bool,
    /// Value or pointer form satisfies the interface
    pub conforms: bool,
}

impl CandidateRecord<'_> {
    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    pub fn position(&self) -> &Position {
        self.ty.position()
    }
}

impl fmt::Debug for CandidateRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateRecord")
            .field("type", &self.ty.name())
            .field("position", self.ty.position())
            .field("contract", &self.contract.id())
            .field("embeds", &self.embeds)
            .field("conforms", &self.conforms)
            .finish()
    }
}

/// Find every declared type adopting the contract interface, by embedding or
/// by conformance as the contract allows. Candidates come back in declaration
/// order, at most one per type.
///
/// If the interface cannot be resolved the run gets an advisory and no
/// candidates.
pub fn discover<'a>(
    ctx: &AnalysisContext<'a>,
    contract: &'a InterfaceContract,
) -> Vec<CandidateRecord<'a>> {
    let module = contract.interface_module.as_str();
    let name = contract.interface_name.as_str();

    let interface = match ctx.resolver.resolve_interface(module, name) {
        Ok(def) => def,
        Err(err) => {
            ctx.trace.advisory(format!(
                "{}: {err}; skipping {} checks in {}",
                contract.id(),
                contract.display_name(),
                ctx.unit_name()
            ));
            return Vec::new();
        }
    };
    let required = interface_method_set(ctx.resolver, &interface);

    let facts = ctx.facts;
    let mut decls = facts.type_decls();
    decls.sort_by(|a, b| a.position().cmp(b.position()));

    let mut seen: HashSet<(&str, &Position)> = HashSet::new();
    let mut candidates = Vec::new();

    for ty in decls {
        if ty.is_interface() {
            continue;
        }
        if !seen.insert((ty.name(), ty.position())) {
            ctx.trace.debug(format!("{}: duplicate declaration ignored", ty.name()));
            continue;
        }

        let embeds = contract.detects(DetectionMode::Embedding)
            && ty.embedded_fields().any(|f| f.ty.is_named(module, name));
        let conforms = contract.detects(DetectionMode::Conformance)
            && satisfies_interface(facts, ctx.resolver, ty, &required);

        if embeds || conforms {
            ctx.trace.debug(format!(
                "{} adopts {} (embeds: {embeds}, conforms: {conforms})",
                ty.name(),
                contract.display_name()
            ));
            candidates.push(CandidateRecord {
                ty,
                contract,
                embeds,
                conforms,
            });
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::test_support::*;
    use crate::trace::RunTrace;

    fn names(candidates: &[CandidateRecord]) -> Vec<String> {
        candidates.iter().map(|c| c.type_name().to_string()).collect()
    }

    #[test]
    fn test_embedding_candidate() {
        let mut unit = slog_unit("handlers");
        unit.types.push(embedding_handler("TraceHandler", 10, vec![]));
        let trace = RunTrace::new(false);
        let ctx = AnalysisContext::for_unit(&unit, &trace);
        let contract = full_contract();

        let found = discover(&ctx, &contract);
        assert_eq!(names(&found), vec!["TraceHandler"]);
        assert!(found[0].embeds);
        // Promotion makes it conform as well, still recorded once
        assert!(found[0].conforms);
    }

    #[test]
    fn test_declaration_order() {
        let mut unit = slog_unit("handlers");
        unit.types.push(embedding_handler("Late", 40, vec![]));
        unit.types.push(embedding_handler("Early", 4, vec![]));
        let trace = RunTrace::new(false);
        let ctx = AnalysisContext::for_unit(&unit, &trace);
        let contract = full_contract();

        assert_eq!(names(&discover(&ctx, &contract)), vec!["Early", "Late"]);
    }

    #[test]
    fn test_duplicate_declaration_recorded_once() {
        let mut unit = slog_unit("handlers");
        unit.types.push(embedding_handler("TraceHandler", 10, vec![]));
        unit.types.push(embedding_handler("TraceHandler", 10, vec![]));
        let trace = RunTrace::new(false);
        let ctx = AnalysisContext::for_unit(&unit, &trace);
        let contract = full_contract();

        assert_eq!(discover(&ctx, &contract).len(), 1);
    }

    #[test]
    fn test_non_candidate_with_same_method_names() {
        let mut unit = slog_unit("handlers");
        unit.types.push(plain_struct(
            "Grouper",
            3,
            vec![with_group(Receiver::Pointer)],
        ));
        let trace = RunTrace::new(false);
        let ctx = AnalysisContext::for_unit(&unit, &trace);
        let contract = full_contract();

        assert!(discover(&ctx, &contract).is_empty());
    }

    #[test]
    fn test_conformance_without_embedding() {
        let mut unit = slog_unit("handlers");
        unit.types.push(plain_struct(
            "Direct",
            5,
            vec![
                enabled(Receiver::Pointer),
                handle(Receiver::Pointer),
                with_attrs(Receiver::Pointer),
                with_group(Receiver::Pointer),
            ],
        ));
        let trace = RunTrace::new(false);
        let ctx = AnalysisContext::for_unit(&unit, &trace);

        let both = full_contract();
        let found = discover(&ctx, &both);
        assert_eq!(names(&found), vec!["Direct"]);
        assert!(!found[0].embeds);

        let embedding_only = full_contract().with_detection(vec![DetectionMode::Embedding]);
        assert!(discover(&ctx, &embedding_only).is_empty());
    }

    #[test]
    fn test_embedding_only_mode_ignores_conformance() {
        let mut unit = slog_unit("handlers");
        unit.types.push(embedding_handler("TraceHandler", 10, vec![]));
        let trace = RunTrace::new(false);
        let ctx = AnalysisContext::for_unit(&unit, &trace);
        let contract = full_contract().with_detection(vec![DetectionMode::Embedding]);

        let found = discover(&ctx, &contract);
        assert!(found[0].embeds);
        assert!(!found[0].conforms);
    }

    #[test]
    fn test_unresolved_interface_yields_advisory() {
        let mut unit = CompilationUnit::new("handlers");
        unit.types.push(embedding_handler("TraceHandler", 10, vec![]));
        let trace = RunTrace::new(false);
        let ctx = AnalysisContext::for_unit(&unit, &trace);
        let contract = full_contract();

        assert!(discover(&ctx, &contract).is_empty());
        let advisories = trace.advisories();
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].contains("log/slog"));
    }
}
