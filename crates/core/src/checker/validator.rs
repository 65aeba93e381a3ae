use super::context::AnalysisContext;
use super::discovery::CandidateRecord;
use crate::contract::{match_signature, RequiredMethod};

/// Required methods a candidate does not declare with a matching signature
#[derive(Debug)]
pub struct ValidationOutcome<'a> {
    pub candidate: CandidateRecord<'a>,
    /// In the contract's required-method order
    pub missing: Vec<&'a RequiredMethod>,
}

impl ValidationOutcome<'_> {
    pub fn is_compliant(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check each required method against the methods the candidate declares
/// itself. Promoted methods never count: falling back to them is what the
/// check exists to catch. A method with the right name and the wrong
/// signature counts as missing.
pub fn validate<'a>(
    ctx: &AnalysisContext<'_>,
    candidate: CandidateRecord<'a>,
) -> ValidationOutcome<'a> {
    let contract = candidate.contract;
    let mut missing = Vec::new();

    for required in &contract.required_methods {
        let mut present = false;
        for method in candidate.ty.methods().iter().filter(|m| m.name == required.name) {
            match match_signature(required, &method.signature) {
                Ok(()) => {
                    present = true;
                    break;
                }
                Err(mismatch) => ctx.trace.debug(format!(
                    "{}.{} does not match `{}`: {}",
                    candidate.type_name(),
                    method.name,
                    required,
                    mismatch
                )),
            }
        }
        if !present {
            missing.push(required);
        }
    }

    ValidationOutcome { candidate, missing }
}
