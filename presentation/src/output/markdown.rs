//! Markdown reports for consensus results
//!
//! Reports are written as `consensus_response_<timestamp>.md` (and
//! `<model>_<stance>_<timestamp>.md` for single responses) so a run can be
//! reviewed or shared after the terminal output is gone.

use chrono::Local;
use conclave_domain::{ConsensusResultDocument, ModelStanceResult};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize result document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes markdown reports into one directory
#[derive(Debug, Clone)]
pub struct MarkdownReportWriter {
    output_dir: PathBuf,
}

impl MarkdownReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the whole consultation. Returns the path written.
    pub fn write_consensus(
        &self,
        proposal: &str,
        document: &ConsensusResultDocument,
    ) -> Result<PathBuf, ReportError> {
        let content = Self::render_consensus(proposal, document)?;
        self.write("consensus_response", &content)
    }

    /// Write one model's response on its own
    pub fn write_model_response(&self, result: &ModelStanceResult) -> Result<PathBuf, ReportError> {
        let content = Self::render_model_response(result)?;
        let stem = format!(
            "{}_{}",
            sanitize(&result.model),
            sanitize(result.stance.as_str())
        );
        self.write(&stem, &content)
    }

    pub fn render_consensus(
        proposal: &str,
        document: &ConsensusResultDocument,
    ) -> Result<String, ReportError> {
        let mut md = String::new();
        let _ = writeln!(md, "# Consensus Tool Response\n");
        let _ = writeln!(md, "**Generated:** {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(md, "## Initial Prompt");
        let _ = writeln!(md, "{}\n", quote(proposal));

        let _ = writeln!(md, "## Consulted Models");
        for pair in &document.summary.consulted_pairs {
            let _ = writeln!(md, "- {pair}");
        }
        let _ = writeln!(md, "\n**Total Responses:** {}\n", document.results.len());

        let _ = writeln!(md, "## Individual Model Responses\n");
        for (i, result) in document.results.iter().enumerate() {
            let _ = writeln!(md, "### Response {}: {} ({})", i + 1, result.model, result.stance);
            let _ = writeln!(md, "**Status:** {}\n", status_label(result));
            let _ = writeln!(md, "{}\n", response_body(result, true));
            let _ = writeln!(md, "---\n");
        }

        let _ = writeln!(md, "## Raw Response Data");
        let _ = writeln!(md, "```json\n{}\n```", document.to_json()?);
        Ok(md)
    }

    pub fn render_model_response(result: &ModelStanceResult) -> Result<String, ReportError> {
        let mut md = String::new();
        let _ = writeln!(md, "# {} Response ({})\n", result.model, result.stance);
        let _ = writeln!(md, "**Generated:** {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(md, "**Status:** {}\n", status_label(result));
        if result.is_success() {
            let _ = writeln!(md, "## Response Content\n");
        } else {
            let _ = writeln!(md, "## Error");
        }
        let _ = writeln!(md, "{}\n", response_body(result, false));
        let _ = writeln!(md, "**Latency:** {} ms\n", result.latency);
        let _ = writeln!(md, "## Raw Data");
        let _ = writeln!(md, "```json\n{}\n```", serde_json::to_string_pretty(result)?);
        Ok(md)
    }

    /// Write `content` to `<stem>_<timestamp>.md`, never overwriting
    fn write(&self, stem: &str, content: &str) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let mut path = self.output_dir.join(format!("{stem}_{timestamp}.md"));
        let mut suffix = 1;
        while path.exists() {
            path = self
                .output_dir
                .join(format!("{stem}_{timestamp}_{suffix}.md"));
            suffix += 1;
        }

        std::fs::write(&path, content).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn status_label(result: &ModelStanceResult) -> &'static str {
    if result.is_success() { "success" } else { "error" }
}

/// Markdown content is kept as is; anything else is block-quoted
fn response_body(result: &ModelStanceResult, quote_plain: bool) -> String {
    if !result.is_success() {
        let error = result.error_message.as_deref().unwrap_or("Unknown error");
        return format!("**Error:** {error}");
    }
    let content = result.content.as_deref().unwrap_or_default();
    if content.trim_start().starts_with("##") || !quote_plain {
        content.to_string()
    } else {
        quote(content)
    }
}

fn quote(text: &str) -> String {
    format!("> {}", text.replace('\n', "\n> "))
}

fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect()
}
