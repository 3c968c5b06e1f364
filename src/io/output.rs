use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::PipelineResult;

/// Write a pipeline result as pretty JSON
pub fn write_result_json(result: &PipelineResult, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, result).context("Failed to write JSON")?;
    Ok(())
}

/// Human-readable rendering of a pipeline result
pub struct HumanReport<'a> {
    result: &'a PipelineResult,
}

impl<'a> HumanReport<'a> {
    pub fn new(result: &'a PipelineResult) -> Self {
        Self { result }
    }

    /// Format the result as text: numbered clauses, then the analysis
    pub fn format(&self) -> String {
        let mut output = String::new();

        output.push_str("Rewritten Clauses\n");
        output.push_str("=================\n");
        if self.result.rewritten_clauses.is_empty() {
            output.push_str("(none parsed)\n");
        }
        for (i, clause) in self.result.rewritten_clauses.iter().enumerate() {
            let prefix = format!("{}. ", i + 1);
            let wrapped = wrap_text(clause, 80 - prefix.len());
            let indent = " ".repeat(prefix.len());
            for (n, line) in wrapped.lines().enumerate() {
                output.push_str(if n == 0 { &prefix } else { &indent });
                output.push_str(line);
                output.push('\n');
            }
        }
        output.push('\n');

        output.push_str("Legal Analysis\n");
        output.push_str("==============\n");
        output.push_str(self.result.legal_analysis.trim_end());
        output.push('\n');

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        if line_len + word.len() + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word.len();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PipelineResult {
        PipelineResult {
            rewritten_clauses: vec![
                "Tenant shall pay rent on the first day of each calendar month without demand or deduction of any kind.".to_string(),
                "No pets allowed.".to_string(),
            ],
            legal_analysis: "Both clauses are enforceable.\n".to_string(),
        }
    }

    #[test]
    fn test_format_numbers_and_wraps_clauses() {
        let text = HumanReport::new(&sample()).format();

        assert!(text.contains("1. Tenant shall pay rent"));
        assert!(text.contains("\n2. No pets allowed.\n"));
        assert!(text.ends_with("Both clauses are enforceable.\n"));
        for line in text.lines() {
            assert!(line.len() <= 85);
        }
    }

    #[test]
    fn test_format_empty_clause_list() {
        let result = PipelineResult {
            rewritten_clauses: vec![],
            legal_analysis: "Nothing to review.".to_string(),
        };
        assert!(HumanReport::new(&result).format().contains("(none parsed)"));
    }

    #[test]
    fn test_write_json_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("result.json");
        let text_path = dir.path().join("result.txt");

        write_result_json(&sample(), &json_path).unwrap();
        HumanReport::new(&sample()).write_file(&text_path).unwrap();

        let parsed: PipelineResult =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed, sample());
        assert!(std::fs::read_to_string(&text_path).unwrap().contains("Legal Analysis"));
    }

    #[test]
    fn test_wrap_text() {
        let text = "This is a test of the text wrapping function that should wrap at 20 chars";
        let wrapped = wrap_text(text, 20);
        for line in wrapped.lines() {
            assert!(line.len() <= 25);
        }
    }
}
