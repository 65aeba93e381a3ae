use std::fmt;

use super::types::{RequiredMethod, TypeDescriptor};
use crate::model::{Signature, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Param,
    Result,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Param => write!(f, "parameter"),
            Slot::Result => write!(f, "result"),
        }
    }
}

/// Why a declared method does not meet a requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    Arity {
        expected_params: usize,
        found_params: usize,
        expected_results: usize,
        found_results: usize,
    },
    Shape {
        slot: Slot,
        index: usize,
        expected: String,
        found: String,
    },
    /// Declared with a `...T` final parameter
    Variadic,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Arity {
                expected_params,
                found_params,
                expected_results,
                found_results,
            } => write!(
                f,
                "expected {expected_params} parameter(s) and {expected_results} result(s), \
                 found {found_params} and {found_results}"
            ),
            Mismatch::Shape {
                slot,
                index,
                expected,
                found,
            } => write!(f, "{slot} {index}: expected {expected}, found {found}"),
            Mismatch::Variadic => write!(f, "variadic parameter list"),
        }
    }
}

/// Compare a declared signature against a requirement, exactly.
/// Unknown or compound shapes and variadic declarations fail to match.
pub fn match_signature(required: &RequiredMethod, signature: &Signature) -> Result<(), Mismatch> {
    if signature.variadic {
        return Err(Mismatch::Variadic);
    }
    if required.params.len() != signature.params.len()
        || required.returns.len() != signature.results.len()
    {
        return Err(Mismatch::Arity {
            expected_params: required.params.len(),
            found_params: signature.params.len(),
            expected_results: required.returns.len(),
            found_results: signature.results.len(),
        });
    }

    let params = required
        .params
        .iter()
        .zip(&signature.params)
        .enumerate()
        .map(|(i, (e, f))| (Slot::Param, i, e, f));
    let results = required
        .returns
        .iter()
        .zip(&signature.results)
        .enumerate()
        .map(|(i, (e, f))| (Slot::Result, i, e, f));

    for (slot, index, expected, found) in params.chain(results) {
        if !descriptor_matches(expected, found) {
            return Err(Mismatch::Shape {
                slot,
                index,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

pub fn descriptor_matches(expected: &TypeDescriptor, found: &TypeRef) -> bool {
    match (expected, found) {
        (TypeDescriptor::Basic { name }, TypeRef::Basic { name: kind }) => name == kind,
        (TypeDescriptor::Named { package, name }, found) => found.is_named(package, name),
        (TypeDescriptor::SliceOf { package, name }, TypeRef::Slice { elem }) => {
            elem.is_named(package, name)
        }
        _ => false,
    }
}
