//! Presentation layer for conclave
//!
//! This crate contains CLI definitions, output formatters, markdown
//! reports and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, ConsultArgs, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::markdown::{MarkdownReportWriter, ReportError};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
