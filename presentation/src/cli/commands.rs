//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use conclave_domain::{ModelCategory, ModelStanceRequest, ProviderFamily, Stance};
use std::path::PathBuf;

/// Output format for consensus results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every consultation in full
    Full,
    /// Counts and one line per consultation
    Summary,
    /// The raw result document
    Json,
}

/// CLI arguments for conclave
#[derive(Parser, Debug)]
#[command(name = "conclave")]
#[command(author, version, about = "Ask several models the same question, each from a stance")]
#[command(long_about = r#"
Conclave puts one proposal to several models at once. Each model answers
from an assigned stance (for, against, neutral, or a free-text role) and
the answers are collected side by side for you to weigh.

Models are routed to the first configured backend that serves them:
native APIs, then a unified gateway or custom endpoint, then local CLI
tools, then OpenRouter.

Configuration files are loaded from (in priority order):
1. CONCLAVE_* environment variables
2. --config <path>     Explicit config file
3. ./conclave.toml     Project-level config
4. ~/.config/conclave/config.toml   Global config

Example:
  conclave consult "Should we migrate to OAuth2?" -m o3:for -m flash:against
  conclave consult "Adopt Rust for the ingest path?" -m pro:neutral -m "grok:for=Focus on hiring"
  conclave consult "Ship the new cache?" -m llama3.2:latest:against -m "pro:@security-reviewer"
  conclave models --family openai
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a daily-rotated file at this path
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Consult several models on a proposal
    Consult(ConsultArgs),

    /// List the models available with the current configuration
    Models {
        /// Only list models served by this family
        #[arg(long, value_parser = parse_family)]
        family: Option<ProviderFamily>,

        /// Ignore model restrictions
        #[arg(long)]
        all: bool,
    },

    /// Show the model picked when none is specified
    Fallback {
        /// Kind of work the model is picked for
        #[arg(long, value_parser = parse_category, default_value = "extended_reasoning")]
        category: ModelCategory,
    },
}

#[derive(Args, Debug)]
pub struct ConsultArgs {
    /// The proposal or question to put to the models
    pub proposal: String,

    /// Model and stance as MODEL[:STANCE][=PROMPT] (repeatable).
    ///
    /// STANCE is for, against or neutral, or a free-text role written as
    /// @role. Model names may contain colons (llama3.2:latest:for).
    #[arg(short, long = "model", value_name = "MODEL:STANCE", value_parser = parse_model_stance, required = true)]
    pub models: Vec<ModelStanceRequest>,

    /// Your own analysis so far, recorded with the request
    #[arg(long)]
    pub findings: Option<String>,

    /// Identifier threading this step to an earlier conversation
    #[arg(long, value_name = "ID")]
    pub continuation_id: Option<String>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write a markdown report into this directory
    #[arg(long, value_name = "DIR")]
    pub save_markdown: Option<PathBuf>,
}

/// Parse `model[:stance][=prompt]`.
///
/// The stance is the last colon-separated segment, and only when it names a
/// built-in stance or starts with `@` (a free-text role). Any other suffix
/// belongs to the model name, so tagged names such as `llama3.2:latest` and
/// `deepseek-r1:free` keep their colons. Without a stance the pair is
/// neutral. Everything after the first `=` is the custom stance prompt.
pub fn parse_model_stance(value: &str) -> Result<ModelStanceRequest, String> {
    let (head, prompt) = match value.split_once('=') {
        Some((head, prompt)) => (head, Some(prompt.trim())),
        None => (value, None),
    };

    let (model, stance) = match head.rsplit_once(':') {
        Some((model, segment)) => match stance_segment(segment) {
            Some(stance) => (model, stance),
            None => (head, Stance::Neutral),
        },
        None => (head, Stance::Neutral),
    };

    let model = model.trim();
    if model.is_empty() {
        return Err(format!("missing model name in '{value}'"));
    }
    if let Stance::Custom(role) = &stance
        && role.is_empty()
    {
        return Err(format!("empty role after '@' in '{value}'"));
    }

    let request = ModelStanceRequest::new(model, stance);
    Ok(match prompt {
        Some(prompt) if !prompt.is_empty() => request.with_stance_prompt(prompt),
        _ => request,
    })
}

/// Stance named by the last segment, if it names one
fn stance_segment(segment: &str) -> Option<Stance> {
    let segment = segment.trim();
    if let Some(role) = segment.strip_prefix('@') {
        return Some(Stance::Custom(role.trim().to_string()));
    }
    match Stance::from(segment) {
        Stance::Custom(_) => None,
        stance => Some(stance),
    }
}

fn parse_family(value: &str) -> Result<ProviderFamily, String> {
    value.parse()
}

fn parse_category(value: &str) -> Result<ModelCategory, String> {
    value.parse()
}
