use std::collections::HashSet;

use crate::checker::ValidationOutcome;
use crate::diagnostic::{Diagnostic, SourceLocation};

/// One diagnostic per missing method, in required-method order, all anchored
/// at the candidate's declaration.
pub fn diagnostics_for(check: &str, unit: &str, outcome: &ValidationOutcome) -> Vec<Diagnostic> {
    let candidate = &outcome.candidate;
    let interface = candidate.contract.display_name();
    let location = SourceLocation::from(candidate.position());

    outcome
        .missing
        .iter()
        .map(|required| {
            Diagnostic::new(
                check,
                unit,
                candidate.type_name(),
                interface.as_str(),
                required.name.as_str(),
                location.clone(),
            )
        })
        .collect()
}

/// Put merged diagnostics in their reported order: by unit, then position.
/// The sort is stable, so diagnostics at the same position keep their
/// check order, and required-method order within a check. A (type, method) pair is
/// reported once per unit; the first check to flag it wins.
pub fn normalize(mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics.sort_by(|a, b| {
        a.unit
            .cmp(&b.unit)
            .then_with(|| a.location.cmp(&b.location))
    });

    let mut seen: HashSet<(String, SourceLocation, String, String)> = HashSet::new();
    diagnostics.retain(|d| {
        seen.insert((
            d.unit.clone(),
            d.location.clone(),
            d.type_name.clone(),
            d.method.clone(),
        ))
    });
    diagnostics
}
