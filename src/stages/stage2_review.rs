use tracing::info;

use crate::llm::{
    GenerationError, GenerationOptions, REVIEW_SYSTEM_PROMPT, TextGenerator, build_review_prompt,
};
use crate::models::UsState;

/// Configuration for Stage 2
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    /// Temperature for the review call
    pub temperature: f64,
    /// Maximum tokens in the analysis
    pub max_tokens: u32,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 1500,
        }
    }
}

/// Execute Stage 2: legal review
///
/// The analysis is returned verbatim; only a blank response is rejected.
pub async fn execute_review(
    generator: &dyn TextGenerator,
    state: UsState,
    clauses: &[String],
    config: &ReviewConfig,
) -> Result<String, GenerationError> {
    let prompt = build_review_prompt(state, clauses);
    let options = GenerationOptions {
        system: Some(REVIEW_SYSTEM_PROMPT.to_string()),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };

    let analysis = generator.generate(&prompt, &options).await?;
    if analysis.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    info!(
        "Stage 2: {} analysis for {} clauses ({} chars)",
        state,
        clauses.len(),
        analysis.len()
    );

    Ok(analysis)
}
