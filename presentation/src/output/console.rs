//! Console output formatter for consensus results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use conclave_domain::{ConsensusResultDocument, ModelStanceResult};

/// Formats consensus results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn off ANSI colors for everything formatted afterwards
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Format the complete result document
    pub fn format(proposal: &str, document: &ConsensusResultDocument) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Consensus Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Proposal:".cyan().bold(), proposal));
        output.push_str(&format!(
            "{} {}\n",
            "Consulted:".cyan().bold(),
            document.summary.consulted_pairs.join(", ")
        ));
        output.push_str(&Self::counts(document));

        output.push_str(&Self::section_header("Perspectives"));
        for result in &document.results {
            output.push_str(&Self::result_block(result));
        }

        if !document.next_steps.is_empty() {
            output.push_str(&Self::section_header("Next Steps"));
            output.push_str(&format!("\n{}\n", document.next_steps));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(document: &ConsensusResultDocument) -> String {
        document.to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Format counts and one line per consultation
    pub fn format_summary(proposal: &str, document: &ConsensusResultDocument) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Consensus Summary ===".cyan().bold()));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), proposal));
        output.push_str(&Self::counts(document));
        output.push('\n');

        for result in &document.results {
            let label = result.pair_label();
            let line = if result.is_success() {
                format!(
                    "  {} {} {}",
                    "v".green(),
                    label,
                    format!("({} ms)", result.latency).dimmed()
                )
            } else {
                format!(
                    "  {} {} {}",
                    "x".red(),
                    label,
                    result.error_message.as_deref().unwrap_or("Unknown").dimmed()
                )
            };
            output.push_str(&line);
            output.push('\n');
        }

        output
    }

    fn counts(document: &ConsensusResultDocument) -> String {
        let summary = &document.summary;
        let errored = if summary.errored_count > 0 {
            format!("{} failed", summary.errored_count).red().to_string()
        } else {
            "0 failed".dimmed().to_string()
        };
        format!(
            "{} {} of {} succeeded, {}\n",
            "Responses:".cyan().bold(),
            summary.succeeded_count,
            summary.requested_count,
            errored
        )
    }

    fn result_block(result: &ModelStanceResult) -> String {
        let title = format!("── {} ({} ms) ──", result.pair_label(), result.latency);
        match (&result.content, result.is_success()) {
            (Some(content), true) => format!("\n{}\n{}\n", title.yellow().bold(), content),
            _ => format!(
                "\n{}\nError: {}\n",
                title.red().bold(),
                result.error_message.as_deref().unwrap_or("Unknown")
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, proposal: &str, document: &ConsensusResultDocument) -> String {
        Self::format(proposal, document)
    }

    fn format_json(&self, document: &ConsensusResultDocument) -> String {
        Self::format_json(document)
    }

    fn format_summary(&self, proposal: &str, document: &ConsensusResultDocument) -> String {
        Self::format_summary(proposal, document)
    }
}
