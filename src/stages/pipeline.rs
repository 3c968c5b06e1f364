use thiserror::Error;
use tracing::{Instrument, info, info_span};

use crate::llm::{GenerationError, TextGenerator};
use crate::models::{ClauseRequest, PipelineResult, UsState};
use crate::stages::{
    ReviewConfig, RewriteConfig, execute_review, execute_rewrite, filter_clauses, join_clauses,
    normalize_state,
};

/// Error returned by the clause pipeline
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error("Invalid state: {}. Valid states are: {}", .input, UsState::name_list())]
    InvalidState { input: String, normalized: String },
    #[error("At least one valid clause is required")]
    NoValidClauses,
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl PipelineError {
    /// Validation errors are the caller's fault and are never retried
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidState { .. } | Self::NoValidClauses)
    }
}

/// Configuration for the whole pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub rewrite: RewriteConfig,
    pub review: ReviewConfig,
}

/// Run the clause pipeline for one request
///
/// Stages run strictly in sequence and the first error aborts the rest:
/// 1. Normalize the state
/// 2. Filter out blank clauses
/// 3. Rewrite clauses into a numbered list and parse it
/// 4. Review the rewritten clauses for the state
pub async fn process(
    generator: &dyn TextGenerator,
    request: &ClauseRequest,
    config: &PipelineConfig,
) -> Result<PipelineResult, PipelineError> {
    let request_id = uuid::Uuid::new_v4();
    let span = info_span!("clause_pipeline", %request_id);

    run_stages(generator, request, config).instrument(span).await
}

async fn run_stages(
    generator: &dyn TextGenerator,
    request: &ClauseRequest,
    config: &PipelineConfig,
) -> Result<PipelineResult, PipelineError> {
    let state = normalize_state(&request.state)?;
    let clauses = filter_clauses(&request.clauses);
    let joined = join_clauses(&clauses)?;

    info!(
        "Processing {} clauses for {} ({} dropped as blank)",
        clauses.len(),
        state,
        request.clauses.len() - clauses.len()
    );

    let rewritten_clauses = execute_rewrite(generator, &joined, &config.rewrite).await?;
    let legal_analysis =
        execute_review(generator, state, &rewritten_clauses, &config.review).await?;

    Ok(PipelineResult {
        rewritten_clauses,
        legal_analysis,
    })
}
