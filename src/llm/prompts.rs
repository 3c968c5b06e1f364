use crate::models::UsState;

/// System prompt for the clause rewrite stage
pub const REWRITE_SYSTEM_PROMPT: &str = r#"You are a legal assistant that rewrites residential lease clauses for landlords.

Rewrite each clause you are given into clear, professional, enforceable lease language.

OUTPUT RULES:
1. Return ONLY a numbered list, one clause per list item.
2. Each list item MUST fit on a single line and start with its number followed by a period, e.g. "1. ".
3. Do not add headings, introductions, explanations, or closing remarks.
4. Keep the clauses in the order they were given.
5. Do not merge or split clauses."#;

/// System prompt for the legal review stage
pub const REVIEW_SYSTEM_PROMPT: &str = r#"You are a legal assistant specializing in US residential landlord-tenant law.

Review lease clauses for compliance with the law of the given state. For each clause:
- State whether it is likely enforceable in that state.
- Cite the relevant statute or doctrine where you can.
- Flag anything that conflicts with tenant protections and suggest a compliant alternative.

Finish with a short overall summary. This is general information, not legal advice."#;

/// System prompt for the support chat
pub const SUPPORT_SYSTEM_PROMPT: &str = r#"You are the support assistant for a property-management app used by landlords.

Help with managing properties, tenants, and leases, and with using the app's lease clause generator.
Be concise and friendly. You are not a lawyer: for legal questions give general information and suggest consulting a local attorney."#;

/// Build the user prompt for the rewrite stage
pub fn build_rewrite_prompt(joined_clauses: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("Rewrite the following lease clauses. ");
    prompt.push_str("Clauses are separated by blank lines.\n\n");
    prompt.push_str(joined_clauses);
    prompt.push('\n');

    prompt
}

/// Build the user prompt for the legal review stage
///
/// Every clause is embedded verbatim and in order.
pub fn build_review_prompt(state: UsState, clauses: &[String]) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "# State: {} ({})\n\n",
        state.name(),
        state.key()
    ));

    prompt.push_str("## Lease Clauses\n");
    if clauses.is_empty() {
        prompt.push_str("(no clauses)\n");
    }
    for (i, clause) in clauses.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, clause));
    }
    prompt.push('\n');

    prompt.push_str("## Instructions\n");
    prompt.push_str(&format!(
        "Analyze whether each clause above is legal and enforceable under {} landlord-tenant law.\n",
        state.name()
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_prompt_contains_clauses() {
        let prompt = build_rewrite_prompt("No pets.\n\nRent due on the 1st.");
        assert!(prompt.contains("No pets.\n\nRent due on the 1st."));
    }

    #[test]
    fn test_review_prompt_embeds_every_clause_in_order() {
        let clauses = vec![
            "Tenant shall pay rent on the 1st.".to_string(),
            "No pets allowed, including \"emotional support\" animals.".to_string(),
            "Security deposit: $1,500.00 (refundable).".to_string(),
        ];

        let prompt = build_review_prompt(UsState::NewYork, &clauses);

        assert!(prompt.contains("New York"));
        assert!(prompt.contains("new-york"));

        let mut last = 0;
        for clause in &clauses {
            let pos = prompt[last..]
                .find(clause.as_str())
                .map(|p| p + last)
                .expect("clause missing from prompt");
            last = pos + clause.len();
        }
    }

    #[test]
    fn test_review_prompt_with_no_clauses() {
        let prompt = build_review_prompt(UsState::Texas, &[]);
        assert!(prompt.contains("(no clauses)"));
    }
}
