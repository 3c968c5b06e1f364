use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ClauseRequest;

/// Parse a clause request from a JSON file
pub fn parse_clause_request_file(path: &Path) -> Result<ClauseRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read clause file {:?}", path))?;
    parse_clause_request_json(&content)
}

/// Parse a clause request from a JSON string
///
/// Expected format:
/// ```json
/// {"state": "New York", "clauses": ["No pets.", "Rent is due on the 1st."]}
/// ```
pub fn parse_clause_request_json(json: &str) -> Result<ClauseRequest> {
    serde_json::from_str(json).context("Failed to parse clause request JSON")
}
