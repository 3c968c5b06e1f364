use crate::models::{UsState, normalization_key};
use crate::stages::PipelineError;

/// Separator placed between clauses sent to the rewrite stage
pub const CLAUSE_SEPARATOR: &str = "\n\n";

/// Perform Stage 0 state validation
///
/// Maps free-text input onto one of the 50 canonical states. Unknown input
/// is a validation error carrying the raw input and its derived key.
pub fn normalize_state(input: &str) -> Result<UsState, PipelineError> {
    UsState::from_input(input).ok_or_else(|| PipelineError::InvalidState {
        input: input.to_string(),
        normalized: normalization_key(input),
    })
}

/// Drop empty and whitespace-only clauses, keeping order
pub fn filter_clauses(clauses: &[String]) -> Vec<&str> {
    clauses
        .iter()
        .map(String::as_str)
        .filter(|c| !c.trim().is_empty())
        .collect()
}

/// Join filtered clauses for the rewrite stage
///
/// Fails when no clause survived filtering, so the rewrite stage is never
/// invoked with nothing to rewrite.
pub fn join_clauses(clauses: &[&str]) -> Result<String, PipelineError> {
    if clauses.is_empty() {
        return Err(PipelineError::NoValidClauses);
    }
    Ok(clauses.join(CLAUSE_SEPARATOR))
}
