pub mod io;
pub mod llm;
pub mod models;
pub mod server;
pub mod stages;
pub mod support;

pub use io::{HumanReport, parse_clause_request_file, parse_clause_request_json, write_result_json};
pub use llm::{GenerationError, GenerationOptions, OpenAiClient, OpenAiConfig, TextGenerator};
pub use models::{ChatMessage, ChatReply, ChatSource, ClauseRequest, PipelineResult, UsState};
pub use server::{AppState, router, serve};
pub use stages::{
    PipelineConfig, PipelineError, ReviewConfig, RewriteConfig, execute_review, execute_rewrite,
    normalize_state, parse_numbered_list, process,
};
