use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::llm::{
    GenerationError, GenerationOptions, REWRITE_SYSTEM_PROMPT, TextGenerator, build_rewrite_prompt,
};

/// Line-initial list numbering: digits, a period, optional whitespace
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("numbered item pattern is valid"));

/// Configuration for Stage 1
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    /// Temperature for the rewrite call
    pub temperature: f64,
    /// Maximum tokens in the rewrite response
    pub max_tokens: u32,
    /// Fail when a non-empty response yields no numbered clauses
    pub strict_parse: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            strict_parse: false,
        }
    }
}

impl RewriteConfig {
    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            system: Some(REWRITE_SYSTEM_PROMPT.to_string()),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Execute Stage 1: clause rewrite
///
/// 1. Send the joined clause text with the numbered-list system prompt
/// 2. Parse the numbered list out of the response
pub async fn execute_rewrite(
    generator: &dyn TextGenerator,
    joined_clauses: &str,
    config: &RewriteConfig,
) -> Result<Vec<String>, GenerationError> {
    let prompt = build_rewrite_prompt(joined_clauses);
    let raw = generator.generate(&prompt, &config.options()).await?;

    if raw.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let clauses = parse_numbered_list(&raw);

    if clauses.is_empty() {
        // Anything not formatted as "N." is dropped by the parser, so a model
        // that switches to bullets or "N)" loses every clause here.
        warn!(
            "Rewrite response had {} lines but no numbered clauses",
            raw.lines().count()
        );
        if config.strict_parse {
            return Err(GenerationError::UnparseableResponse);
        }
    } else {
        info!("Stage 1: parsed {} rewritten clauses", clauses.len());
    }

    Ok(clauses)
}

/// Parse a numbered list into clause strings
///
/// Keeps lines whose trimmed content starts with `N.`, strips the number and
/// the whitespace after it, and drops everything else.
pub fn parse_numbered_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter_map(|line| {
            NUMBERED_ITEM
                .find(line)
                .map(|prefix| line[prefix.end()..].trim().to_string())
        })
        .filter(|clause| !clause.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedGenerator;

    #[test]
    fn test_parse_drops_preamble_and_commentary() {
        let raw = "Here are the clauses:\n1. Tenant shall pay rent on the 1st.\n2. No pets allowed.\n\nLet me know if you need more.";

        assert_eq!(
            parse_numbered_list(raw),
            vec!["Tenant shall pay rent on the 1st.", "No pets allowed."]
        );
    }

    #[test]
    fn test_parse_handles_indent_and_missing_space() {
        let raw = "   1.First clause.\n  12.   Twelfth clause.  \r\n3.";
        assert_eq!(
            parse_numbered_list(raw),
            vec!["First clause.", "Twelfth clause."]
        );
    }

    #[test]
    fn test_parse_ignores_other_list_styles() {
        let raw = "1) Parenthesized\n- Bulleted\n* Starred\nA. Lettered\n2. Kept";
        assert_eq!(parse_numbered_list(raw), vec!["Kept"]);
    }

    #[test]
    fn test_parse_preserves_response_order() {
        let raw = "3. Third\n1. First\n2. Second";
        assert_eq!(parse_numbered_list(raw), vec!["Third", "First", "Second"]);
    }

    #[test]
    fn test_parse_keeps_inner_numbers() {
        let raw = "1. Rent of $1,200.50 is due by 5 p.m.";
        assert_eq!(
            parse_numbered_list(raw),
            vec!["Rent of $1,200.50 is due by 5 p.m."]
        );
    }

    #[tokio::test]
    async fn test_execute_rewrite_sends_clauses() {
        let generator = ScriptedGenerator::new(vec![Ok("1. No pets allowed.".to_string())]);

        let clauses = execute_rewrite(&generator, "no pets", &RewriteConfig::default())
            .await
            .unwrap();

        assert_eq!(clauses, vec!["No pets allowed."]);
        let calls = generator.calls();
        assert_eq!(calls[0][0].content, REWRITE_SYSTEM_PROMPT);
        assert!(generator.prompt(0).contains("no pets"));
    }

    #[tokio::test]
    async fn test_execute_rewrite_blank_response_is_error() {
        let generator = ScriptedGenerator::new(vec![Ok("  \n ".to_string())]);

        let result = execute_rewrite(&generator, "no pets", &RewriteConfig::default()).await;
        assert!(matches!(result, Err(GenerationError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_execute_rewrite_unparsed_passes_through() {
        let generator = ScriptedGenerator::new(vec![Ok("- No pets allowed.".to_string())]);

        let clauses = execute_rewrite(&generator, "no pets", &RewriteConfig::default())
            .await
            .unwrap();
        assert!(clauses.is_empty());
    }

    #[tokio::test]
    async fn test_execute_rewrite_strict_parse() {
        let generator = ScriptedGenerator::new(vec![Ok("- No pets allowed.".to_string())]);
        let config = RewriteConfig {
            strict_parse: true,
            ..Default::default()
        };

        let result = execute_rewrite(&generator, "no pets", &config).await;
        assert!(matches!(result, Err(GenerationError::UnparseableResponse)));
    }

    #[tokio::test]
    async fn test_execute_rewrite_propagates_failure() {
        let generator = ScriptedGenerator::new(vec![Err(GenerationError::RateLimited)]);

        let result = execute_rewrite(&generator, "no pets", &RewriteConfig::default()).await;
        assert!(matches!(result, Err(GenerationError::RateLimited)));
    }
}
