use serde::{Deserialize, Serialize};

/// Inbound request for the clause pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseRequest {
    /// Free-text state name, normalized before use
    pub state: String,
    /// Raw clause text, in the order the landlord entered it
    pub clauses: Vec<String>,
}

impl ClauseRequest {
    pub fn new(state: impl Into<String>, clauses: Vec<String>) -> Self {
        Self {
            state: state.into(),
            clauses,
        }
    }
}

/// Output of a successful pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// Clauses parsed out of the rewrite stage's numbered list
    pub rewritten_clauses: Vec<String>,
    /// Free-text legal analysis, returned verbatim
    pub legal_analysis: String,
}
