//! Local CLI bridges
//!
//! Wraps locally installed coding-assistant CLIs (`codex`, `gemini`) as
//! single-model providers. Each tool exposes exactly one logical model name
//! and is only registered when its binary can be found.

use async_trait::async_trait;
use conclave_application::{
    AllowAll, ConfigLookup, Construction, GenerateRequest, ModelProvider, ModelResponse,
    ProviderContext, ProviderError, ProviderFactory, RestrictionPolicy,
};
use conclave_domain::{CapabilityDescriptor, ProviderFamily};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Supported CLI tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliTool {
    Codex,
    Gemini,
}

impl CliTool {
    pub const ALL: [CliTool; 2] = [CliTool::Codex, CliTool::Gemini];

    /// Logical model name callers use
    pub fn model_name(&self) -> &'static str {
        match self {
            CliTool::Codex => "codex-cli",
            CliTool::Gemini => "gemini-cli",
        }
    }

    pub fn friendly_name(&self) -> &'static str {
        match self {
            CliTool::Codex => "Codex CLI",
            CliTool::Gemini => "Gemini CLI",
        }
    }

    pub fn default_binary(&self) -> &'static str {
        match self {
            CliTool::Codex => "codex",
            CliTool::Gemini => "gemini",
        }
    }

    pub fn binary_key(&self) -> &'static str {
        match self {
            CliTool::Codex => "CODEX_CLI_BINARY",
            CliTool::Gemini => "GEMINI_CLI_BINARY",
        }
    }

    pub fn timeout_key(&self) -> &'static str {
        match self {
            CliTool::Codex => "CODEX_CLI_TIMEOUT",
            CliTool::Gemini => "GEMINI_CLI_TIMEOUT",
        }
    }

    /// Binary configured for this tool, or its default name
    pub fn binary(&self, config: &dyn ConfigLookup) -> String {
        config
            .get_config(self.binary_key())
            .unwrap_or_else(|| self.default_binary().to_string())
    }

    pub fn timeout(&self, config: &dyn ConfigLookup) -> Duration {
        let seconds = config
            .get_config(self.timeout_key())
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(seconds)
    }

    fn descriptor(&self) -> CapabilityDescriptor {
        let descriptor =
            CapabilityDescriptor::new(self.model_name(), self.friendly_name(), ProviderFamily::Cli)
                .with_streaming(false);
        match self {
            CliTool::Codex => descriptor.with_limits(400_000, 128_000),
            CliTool::Gemini => descriptor.with_limits(1_048_576, 65_536),
        }
    }
}

/// Provider that shells out to a local CLI tool
pub struct CliBridgeProvider {
    tool: CliTool,
    binary: PathBuf,
    timeout: Duration,
    model_override: Option<String>,
    descriptor: CapabilityDescriptor,
    restrictions: Arc<dyn RestrictionPolicy>,
}

impl CliBridgeProvider {
    pub fn new(tool: CliTool, binary: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            binary: binary.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            model_override: None,
            descriptor: tool.descriptor(),
            restrictions: Arc::new(AllowAll),
        }
    }

    pub fn with_restrictions(mut self, restrictions: Arc<dyn RestrictionPolicy>) -> Self {
        self.restrictions = restrictions;
        self
    }

    fn is_permitted(&self) -> bool {
        self.restrictions
            .is_allowed(ProviderFamily::Cli, self.tool.model_name())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Model passed to `gemini --model`
    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        self.model_override = model;
        self
    }

    fn full_prompt(request: &GenerateRequest) -> String {
        match request.system_prompt.as_deref() {
            Some(system) if !system.is_empty() => format!("{system}\n\n{}", request.prompt),
            _ => request.prompt.clone(),
        }
    }

    /// Command line for `prompt`; codex reads the prompt from stdin
    fn command(&self, prompt: &str) -> (Command, Option<String>) {
        let mut cmd = Command::new(&self.binary);
        let stdin = match self.tool {
            CliTool::Codex => {
                cmd.args(["exec", "--color", "never", "--skip-git-repo-check"]);
                Some(prompt.to_string())
            }
            CliTool::Gemini => {
                cmd.arg("--yolo");
                if let Some(model) = &self.model_override {
                    cmd.arg("--model").arg(model);
                }
                cmd.arg("-p").arg(prompt);
                None
            }
        };
        cmd.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
        (cmd, stdin)
    }

    async fn run(&self, prompt: &str) -> Result<String, ProviderError> {
        let (mut cmd, stdin) = self.command(prompt);
        let binary = self.binary.display().to_string();

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ProviderError::BinaryNotFound(binary.clone()),
            _ => ProviderError::Transport(format!("Failed to execute {binary}: {e}")),
        })?;

        if let Some(input) = stdin
            && let Some(mut pipe) = child.stdin.take()
        {
            pipe.write_all(input.as_bytes())
                .await
                .map_err(|e| ProviderError::Transport(format!("Failed to write prompt: {e}")))?;
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))?
            .map_err(|e| ProviderError::Transport(format!("Failed to wait for {binary}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ProviderError::CommandFailed {
                exit_code: output.status.code(),
                stderr: if stderr.is_empty() {
                    "Unknown error".to_string()
                } else {
                    stderr
                },
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(ProviderError::InvalidResponse(format!(
                "{} produced no output",
                self.tool.friendly_name()
            )));
        }
        Ok(stdout)
    }
}

#[async_trait]
impl ModelProvider for CliBridgeProvider {
    fn family(&self) -> ProviderFamily {
        ProviderFamily::Cli
    }

    fn list_models(&self, respect_restrictions: bool) -> Vec<String> {
        if respect_restrictions && !self.is_permitted() {
            return Vec::new();
        }
        vec![self.tool.model_name().to_string()]
    }

    fn applies_restrictions(&self) -> bool {
        true
    }

    fn validate(&self, model_name: &str) -> bool {
        model_name.trim() == self.tool.model_name() && self.is_permitted()
    }

    fn capabilities(&self, model_name: &str) -> Result<CapabilityDescriptor, ProviderError> {
        if model_name.trim() == self.tool.model_name() {
            Ok(self.descriptor.clone())
        } else {
            Err(ProviderError::UnsupportedModel(model_name.to_string()))
        }
    }

    async fn invoke(&self, request: &GenerateRequest) -> Result<ModelResponse, ProviderError> {
        if !self.validate(&request.model_name) {
            return Err(ProviderError::UnsupportedModel(request.model_name.clone()));
        }

        let start = Instant::now();
        debug!(
            tool = self.tool.model_name(),
            binary = %self.binary.display(),
            timeout_secs = self.timeout.as_secs(),
            "Running CLI tool"
        );

        let result = self.run(&Self::full_prompt(request)).await;
        let elapsed = start.elapsed();
        match result {
            Ok(content) => Ok(ModelResponse::new(content, &self.descriptor)
                .with_metadata("execution_time_ms", elapsed.as_millis().to_string())),
            Err(e) => {
                warn!(tool = self.tool.model_name(), "CLI tool failed: {}", e);
                Err(e)
            }
        }
    }
}

/// Factory registering one CLI tool under the CLI family
#[derive(Debug, Clone, Copy)]
pub struct CliBridgeFactory {
    tool: CliTool,
}

impl CliBridgeFactory {
    pub fn new(tool: CliTool) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> CliTool {
        self.tool
    }

    /// Whether the configured binary can be found
    pub fn is_installed(&self, config: &dyn ConfigLookup) -> bool {
        which::which(self.tool.binary(config)).is_ok()
    }
}

impl ProviderFactory for CliBridgeFactory {
    fn name(&self) -> &str {
        self.tool.model_name()
    }

    fn requires_credential(&self) -> bool {
        false
    }

    fn construct(&self, context: &ProviderContext<'_>) -> Construction {
        let binary = self.tool.binary(context.config);
        let path = match which::which(&binary) {
            Ok(path) => path,
            Err(_) => return Construction::unavailable(format!("'{binary}' not found in PATH")),
        };

        let model_override = match self.tool {
            CliTool::Gemini => context.config.get_config("GEMINI_CLI_MODEL"),
            CliTool::Codex => None,
        };

        Construction::Constructed(Arc::new(
            CliBridgeProvider::new(self.tool, path)
                .with_timeout(self.tool.timeout(context.config))
                .with_model_override(model_override)
                .with_restrictions(Arc::clone(&context.restrictions)),
        ))
    }
}
