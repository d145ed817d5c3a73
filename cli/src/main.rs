//! CLI entrypoint for conclave
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser};
use conclave_application::{
    ConfigLookup, NoProgress, ProgressNotifier, ProviderRegistry, RunConsensusUseCase,
};
use conclave_domain::{ConsensusRequest, ModelCategory, ProviderFamily};
use conclave_infrastructure::{
    ConfigLoader, EnvRestrictionPolicy, FileConfig, FileOutputFormat, LayeredConfig,
    configure_providers,
};
use conclave_presentation::{
    Cli, Command, ConsoleFormatter, ConsultArgs, MarkdownReportWriter, OutputFormat,
    ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{line}");
        }
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        ConsoleFormatter::disable_color();
    }

    info!("Starting conclave");

    // === Dependency Injection ===
    let lookup: Arc<dyn ConfigLookup> =
        Arc::new(LayeredConfig::over_env(config.credentials.clone()));
    let restrictions = Arc::new(EnvRestrictionPolicy::from_config(lookup.as_ref()));
    let registry = Arc::new(ProviderRegistry::new(Arc::clone(&lookup), restrictions));
    configure_providers(&registry, lookup.as_ref());

    match cli.command {
        Some(Command::Consult(args)) => consult(args, &config, registry, cli.quiet).await,
        Some(Command::Models { family, all }) => {
            list_models(&registry, family, all);
            Ok(())
        }
        Some(Command::Fallback { category }) => {
            show_fallback(&registry, category);
            Ok(())
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Console logging filtered by `-v`, with `RUST_LOG` taking precedence
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .context("--log-file must name a file")?;
            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn consult(
    args: ConsultArgs,
    config: &FileConfig,
    registry: Arc<ProviderRegistry>,
    quiet: bool,
) -> Result<()> {
    let proposal = args.proposal.clone();

    let mut request = ConsensusRequest::initial(proposal.clone(), args.models);
    if let Some(findings) = args.findings {
        request = request.with_findings(findings);
    }
    if let Some(id) = args.continuation_id {
        request = request.with_continuation(id);
    }
    if let Some(model) = &config.consensus.default_model {
        request = request.with_model(model);
    }

    let use_case =
        RunConsensusUseCase::new(registry).with_settings(config.consensus.to_settings());

    if !quiet {
        eprintln!();
        eprintln!("Proposal: {}", proposal);
        eprintln!(
            "Consulting: {}",
            request
                .pairs()
                .iter()
                .map(|p| p.pair_label())
                .collect::<Vec<_>>()
                .join(", ")
        );
        eprintln!();
    }

    let progress: Box<dyn ProgressNotifier> = if quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };
    let document = use_case
        .execute_with_progress(request, progress.as_ref())
        .await?;

    let format = args
        .output
        .or_else(|| config.output.format.map(output_format))
        .unwrap_or(OutputFormat::Full);
    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&proposal, &document),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&proposal, &document),
        OutputFormat::Json => ConsoleFormatter::format_json(&document),
    };
    println!("{}", output);

    if let Some(dir) = args.save_markdown.or_else(|| config.output.markdown_dir.clone()) {
        match MarkdownReportWriter::new(dir).write_consensus(&proposal, &document) {
            Ok(path) => eprintln!("Report saved to {}", path.display()),
            Err(e) => warn!("Could not save markdown report: {}", e),
        }
    }

    Ok(())
}

fn output_format(format: FileOutputFormat) -> OutputFormat {
    match format {
        FileOutputFormat::Full => OutputFormat::Full,
        FileOutputFormat::Summary => OutputFormat::Summary,
        FileOutputFormat::Json => OutputFormat::Json,
    }
}

fn list_models(registry: &ProviderRegistry, family: Option<ProviderFamily>, all: bool) {
    let models = registry.get_available_models(!all);
    let mut shown = 0;
    for (model, served_by) in models
        .iter()
        .filter(|(_, f)| family.is_none_or(|wanted| wanted == **f))
    {
        println!("{:<40} {}", model, served_by.display_name());
        shown += 1;
    }

    if shown == 0 {
        let configured = registry.get_families_with_credentials();
        if configured.is_empty() {
            eprintln!("No providers configured. Set an API key such as GEMINI_API_KEY or OPENAI_API_KEY.");
        } else {
            eprintln!("No models available from the selected providers.");
        }
    }
}

fn show_fallback(registry: &ProviderRegistry, category: ModelCategory) {
    println!("{}", registry.get_preferred_fallback_model(category));
}
