//! Run Consensus use case
//!
//! Consults several (model, stance) pairs concurrently and assembles the
//! ordered result document.

use crate::config::ConsensusSettings;
use crate::ports::model_provider::{GenerateRequest, ModelProvider, ProviderError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::registry::ProviderRegistry;
use conclave_domain::{
    ConsensusMetadata, ConsensusPromptTemplate, ConsensusRequest, ConsensusResultDocument,
    ConsensusStatus, ConsensusSummary, DomainError, ModelStanceRequest, ModelStanceResult,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout};
use tracing::{debug, info, warn};

/// Errors that can occur before any model is consulted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunConsensusError {
    #[error("Invalid consensus request: {0}")]
    Validation(#[from] DomainError),
}

/// Status report for older sequential callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyContinuation {
    pub status: ConsensusStatus,
    pub step_number: u32,
}

/// Use case for running a consensus consultation
pub struct RunConsensusUseCase {
    registry: Arc<ProviderRegistry>,
    settings: ConsensusSettings,
}

impl RunConsensusUseCase {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            settings: ConsensusSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ConsensusSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ConsensusSettings {
        &self.settings
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        request: ConsensusRequest,
    ) -> Result<ConsensusResultDocument, RunConsensusError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// Validation failures return before any backend is contacted. Backend
    /// failures never fail the call; they become error entries in the
    /// document.
    pub async fn execute_with_progress(
        &self,
        request: ConsensusRequest,
        progress: &dyn ProgressNotifier,
    ) -> Result<ConsensusResultDocument, RunConsensusError> {
        request.validate()?;

        if !request.is_initial_step() {
            debug!(step = request.step_number, "Legacy step, nothing to consult");
            return Ok(self.in_progress_document(request));
        }

        let pairs = request.pairs().to_vec();
        info!(
            pairs = pairs.len(),
            caller_total_steps = request.total_steps,
            "Starting consensus with {} consultations",
            pairs.len()
        );
        progress.on_consultation_start(pairs.len());

        let results = self.fan_out(&request.step_text, &pairs, progress).await;
        let summary = ConsensusSummary::from_results(&results);

        progress.on_consultation_complete(summary.succeeded_count, summary.errored_count);
        info!(
            succeeded = summary.succeeded_count,
            errored = summary.errored_count,
            "Consensus complete"
        );

        let consensus_complete = self.settings.complete_on_total_failure || !summary.all_failed();
        let metadata = ConsensusMetadata::new(
            Some(self.model_used(&request)),
            self.settings.category,
            summary.consulted_pairs.clone(),
        );
        let next_steps =
            ConsensusPromptTemplate::next_steps(summary.succeeded_count, summary.requested_count);

        Ok(ConsensusResultDocument {
            status: ConsensusStatus::Complete,
            step_number: 1,
            // Every pair runs in this one step, whatever the caller planned
            total_steps: 1,
            next_step_required: false,
            consensus_complete,
            results,
            summary,
            metadata,
            continuation_id: request.continuation_id,
            next_steps,
        })
    }

    /// Status-only answer for callers still driving the old step-by-step flow
    pub fn legacy_continuation(&self, step_number: u32) -> LegacyContinuation {
        let status = if step_number == 1 {
            ConsensusStatus::Complete
        } else {
            ConsensusStatus::InProgress
        };
        LegacyContinuation {
            status,
            step_number,
        }
    }

    fn in_progress_document(&self, request: ConsensusRequest) -> ConsensusResultDocument {
        ConsensusResultDocument {
            status: ConsensusStatus::InProgress,
            step_number: request.step_number,
            total_steps: request.total_steps,
            next_step_required: request.next_step_required,
            consensus_complete: false,
            results: Vec::new(),
            summary: ConsensusSummary::default(),
            metadata: ConsensusMetadata::new(request.model, self.settings.category, Vec::new()),
            continuation_id: request.continuation_id,
            next_steps: String::new(),
        }
    }

    /// Model recorded as running the surrounding step
    fn model_used(&self, request: &ConsensusRequest) -> String {
        match request.model.as_deref() {
            Some(model) if self.registry.resolve(model).is_some() => model.to_string(),
            _ => self
                .registry
                .get_preferred_fallback_model(self.settings.category),
        }
    }

    /// Spawn one task per pair and collect results at their request index
    async fn fan_out(
        &self,
        proposal: &str,
        pairs: &[ModelStanceRequest],
        progress: &dyn ProgressNotifier,
    ) -> Vec<ModelStanceResult> {
        let mut slots: Vec<Option<ModelStanceResult>> = vec![None; pairs.len()];
        let mut join_set = JoinSet::new();

        for (index, pair) in pairs.iter().enumerate() {
            let registry = Arc::clone(&self.registry);
            let settings = self.settings.clone();
            let proposal = proposal.to_string();
            let pair = pair.clone();

            join_set.spawn(async move {
                let result = Self::consult(&registry, &settings, &proposal, &pair).await;
                (index, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    if result.is_success() {
                        info!(
                            model = %result.model,
                            stance = %result.stance,
                            latency_ms = result.latency,
                            "Consultation succeeded"
                        );
                    } else {
                        warn!(
                            model = %result.model,
                            stance = %result.stance,
                            "Consultation failed: {}",
                            result.error_message.as_deref().unwrap_or_default()
                        );
                    }
                    progress.on_pair_complete(index, &result.model, &result.stance, result.is_success());
                    slots[index] = Some(result);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        slots
            .into_iter()
            .zip(pairs)
            .map(|(slot, pair)| {
                slot.unwrap_or_else(|| {
                    ModelStanceResult::error(pair, "Consultation task terminated unexpectedly", 0)
                })
            })
            .collect()
    }

    /// Consult a single pair; never fails, errors become data
    async fn consult(
        registry: &ProviderRegistry,
        settings: &ConsensusSettings,
        proposal: &str,
        pair: &ModelStanceRequest,
    ) -> ModelStanceResult {
        let started = Instant::now();

        let outcome = match registry.resolve(&pair.model) {
            Some(provider) => {
                let request = Self::build_request(provider.as_ref(), settings, proposal, pair);
                match timeout(settings.per_call_timeout, provider.invoke(&request)).await {
                    Ok(Ok(response)) if response.content.trim().is_empty() => Err(
                        ProviderError::InvalidResponse("empty response".to_string()).to_string(),
                    ),
                    Ok(Ok(response)) => Ok(response.content),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(_) => Err(ProviderError::Timeout(settings.per_call_timeout).to_string()),
                }
            }
            None => Err(format!(
                "Model '{}' is not available from any configured provider",
                pair.model
            )),
        };

        let latency = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match outcome {
            Ok(content) => ModelStanceResult::success(pair, content, latency),
            Err(message) => ModelStanceResult::error(pair, message, latency),
        }
    }

    /// Stance-framed request, shaped by the model's capabilities
    fn build_request(
        provider: &dyn ModelProvider,
        settings: &ConsensusSettings,
        proposal: &str,
        pair: &ModelStanceRequest,
    ) -> GenerateRequest {
        let system_prompt =
            ConsensusPromptTemplate::system_prompt(&pair.stance, pair.stance_prompt.as_deref());
        let user_prompt = ConsensusPromptTemplate::user_prompt(proposal);

        let descriptor = match provider.capabilities(&pair.model) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                debug!(model = %pair.model, "No capability descriptor: {}", e);
                return GenerateRequest::new(&pair.model, user_prompt)
                    .with_system_prompt(system_prompt)
                    .with_temperature(settings.temperature);
            }
        };

        let request = if descriptor.supports_system_prompts() {
            GenerateRequest::new(&pair.model, user_prompt).with_system_prompt(system_prompt)
        } else {
            GenerateRequest::new(&pair.model, format!("{system_prompt}\n\n{user_prompt}"))
        };

        request
            .with_temperature(descriptor.effective_temperature(settings.temperature))
            .with_max_output_tokens(descriptor.max_output_tokens())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::config_lookup::StaticConfig;
    use crate::ports::model_provider::{Construction, ModelResponse, ProviderContext, ProviderFactory};
    use async_trait::async_trait;
    use conclave_domain::prompt::{BALANCED_MARKER, CRITICAL_MARKER, SUPPORTIVE_MARKER};
    use conclave_domain::{
        CapabilityDescriptor, ModelCategory, PairStatus, ProviderFamily, Stance,
        TemperatureConstraint,
    };
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // -- Scripted provider -----------------------------------------------------

    #[derive(Clone)]
    enum Script {
        Reply { content: &'static str, delay_secs: u64 },
        Fail,
        Hang,
        Panic,
    }

    struct ScriptedProvider {
        family: ProviderFamily,
        scripts: HashMap<&'static str, Script>,
        fixed_temperature: Option<f32>,
        invocations: AtomicUsize,
        requests: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedProvider {
        fn new(scripts: &[(&'static str, Script)]) -> Arc<Self> {
            Arc::new(Self {
                family: ProviderFamily::OpenAi,
                scripts: scripts.iter().cloned().collect(),
                fixed_temperature: None,
                invocations: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn with_fixed_temperature(scripts: &[(&'static str, Script)], value: f32) -> Arc<Self> {
            Arc::new(Self {
                family: ProviderFamily::OpenAi,
                scripts: scripts.iter().cloned().collect(),
                fixed_temperature: Some(value),
                invocations: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn invocations(&self) -> usize {
            self.invocations.load(Ordering::SeqCst)
        }

        fn request_for(&self, system_marker: &str) -> Option<GenerateRequest> {
            self.requests
                .lock()
                .iter()
                .find(|r| r.system_prompt.as_deref().is_some_and(|s| s.contains(system_marker)))
                .cloned()
        }
    }

    #[async_trait]
    impl ModelProvider for ScriptedProvider {
        fn family(&self) -> ProviderFamily {
            self.family
        }

        fn list_models(&self, _respect_restrictions: bool) -> Vec<String> {
            let mut models: Vec<String> = self.scripts.keys().map(|m| m.to_string()).collect();
            models.sort();
            models
        }

        fn validate(&self, model_name: &str) -> bool {
            self.scripts.contains_key(model_name)
        }

        fn capabilities(&self, model_name: &str) -> Result<CapabilityDescriptor, ProviderError> {
            let descriptor = CapabilityDescriptor::new(model_name, model_name, self.family)
                .with_limits(200_000, 4_000);
            Ok(match self.fixed_temperature {
                Some(value) => descriptor.with_temperature(TemperatureConstraint::fixed(value)),
                None => descriptor.with_temperature(TemperatureConstraint::range(0.0, 2.0, 0.7)),
            })
        }

        fn preferred_model(&self, _category: ModelCategory, allowed: &[String]) -> Option<String> {
            allowed.first().cloned()
        }

        async fn invoke(&self, request: &GenerateRequest) -> Result<ModelResponse, ProviderError> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().push(request.clone());
            let descriptor = self.capabilities(&request.model_name)?;

            match self.scripts.get(request.model_name.as_str()).cloned() {
                Some(Script::Reply { content, delay_secs }) => {
                    tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                    Ok(ModelResponse::new(content, &descriptor))
                }
                Some(Script::Fail) => Err(ProviderError::Api {
                    status: 500,
                    message: "internal error".to_string(),
                }),
                Some(Script::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(ModelResponse::new("too late", &descriptor))
                }
                Some(Script::Panic) => panic!("backend exploded"),
                None => Err(ProviderError::UnsupportedModel(request.model_name.clone())),
            }
        }
    }

    struct Fixed(Arc<ScriptedProvider>);

    impl ProviderFactory for Fixed {
        fn name(&self) -> &str {
            "scripted"
        }

        fn requires_credential(&self) -> bool {
            false
        }

        fn construct(&self, _context: &ProviderContext<'_>) -> Construction {
            Construction::Constructed(self.0.clone())
        }
    }

    // -- Recording progress ----------------------------------------------------

    #[derive(Default)]
    struct RecordingProgress {
        started: Mutex<Option<usize>>,
        completed_pairs: Mutex<Vec<(usize, bool)>>,
        finished: Mutex<Option<(usize, usize)>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_consultation_start(&self, total_pairs: usize) {
            *self.started.lock() = Some(total_pairs);
        }

        fn on_pair_complete(&self, index: usize, _model: &str, _stance: &Stance, success: bool) {
            self.completed_pairs.lock().push((index, success));
        }

        fn on_consultation_complete(&self, succeeded: usize, errored: usize) {
            *self.finished.lock() = Some((succeeded, errored));
        }
    }

    // -- Helpers ---------------------------------------------------------------

    fn reply(content: &'static str, delay_secs: u64) -> Script {
        Script::Reply {
            content,
            delay_secs,
        }
    }

    fn use_case(provider: &Arc<ScriptedProvider>) -> RunConsensusUseCase {
        let registry = ProviderRegistry::unrestricted(Arc::new(StaticConfig::new()));
        registry.register(ProviderFamily::OpenAi, Arc::new(Fixed(provider.clone())), false);
        RunConsensusUseCase::new(Arc::new(registry))
            .with_settings(ConsensusSettings::default().with_timeout_seconds(30))
    }

    fn pairs(entries: &[(&str, &str)]) -> Vec<ModelStanceRequest> {
        entries
            .iter()
            .map(|(model, stance)| ModelStanceRequest::new(*model, *stance))
            .collect()
    }

    // -- Validation ------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn duplicate_pair_rejected_before_any_backend_call() {
        let provider = ScriptedProvider::new(&[("o3", reply("ok", 0))]);
        let use_case = use_case(&provider);

        let request = ConsensusRequest::initial("Proposal", pairs(&[("o3", "for"), ("o3", "for")]));
        let error = use_case.execute(request).await.unwrap_err();

        let message = error.to_string();
        assert!(message.contains("o3"));
        assert!(message.contains("for"));
        assert_eq!(provider.invocations(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_models_rejected() {
        let provider = ScriptedProvider::new(&[("o3", reply("ok", 0))]);
        let use_case = use_case(&provider);

        let error = use_case
            .execute(ConsensusRequest::initial("Proposal", vec![]))
            .await
            .unwrap_err();
        assert_eq!(error, RunConsensusError::Validation(DomainError::MissingModels));
        assert_eq!(provider.invocations(), 0);
    }

    // -- Fan-out ---------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn timeout_degrades_only_its_own_pair() {
        let provider = ScriptedProvider::new(&[("o3", Script::Hang), ("flash", reply("Flash analysis", 1))]);
        let use_case = use_case(&provider);

        let request =
            ConsensusRequest::initial("Proposal", pairs(&[("o3", "for"), ("flash", "against")]));
        let doc = use_case.execute(request).await.unwrap();

        assert_eq!(doc.status, ConsensusStatus::Complete);
        assert_eq!(doc.results.len(), 2);
        assert_eq!(doc.results[0].model, "o3");
        assert_eq!(doc.results[0].status, PairStatus::Error);
        assert!(doc.results[0].content.is_none());
        assert!(doc.results[0].error_message.as_deref().unwrap().contains("timed out"));
        assert!(doc.results[0].latency >= 30_000);
        assert_eq!(doc.results[1].model, "flash");
        assert_eq!(doc.results[1].status, PairStatus::Success);
        assert_eq!(doc.results[1].content.as_deref(), Some("Flash analysis"));
        assert!(doc.consensus_complete);
    }

    #[tokio::test(start_paused = true)]
    async fn results_keep_request_order_not_completion_order() {
        let provider = ScriptedProvider::new(&[
            ("slow", reply("slow answer", 10)),
            ("medium", reply("medium answer", 5)),
            ("fast", reply("fast answer", 0)),
        ]);
        let use_case = use_case(&provider);
        let progress = RecordingProgress::default();

        let request = ConsensusRequest::initial(
            "Proposal",
            pairs(&[("slow", "for"), ("medium", "against"), ("fast", "neutral")]),
        );
        let doc = use_case.execute_with_progress(request, &progress).await.unwrap();

        let models: Vec<&str> = doc.results.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["slow", "medium", "fast"]);
        assert_eq!(
            doc.summary.consulted_pairs,
            vec!["slow:for", "medium:against", "fast:neutral"]
        );

        // Completion order is the reverse of request order
        let completion: Vec<usize> = progress.completed_pairs.lock().iter().map(|(i, _)| *i).collect();
        assert_eq!(completion, vec![2, 1, 0]);
        assert_eq!(*progress.started.lock(), Some(3));
        assert_eq!(*progress.finished.lock(), Some((3, 0)));
    }

    #[tokio::test(start_paused = true)]
    async fn pairs_run_concurrently() {
        let provider = ScriptedProvider::new(&[("a", reply("a", 10)), ("b", reply("b", 10))]);
        let use_case = use_case(&provider);

        let started = Instant::now();
        let request = ConsensusRequest::initial("Proposal", pairs(&[("a", "for"), ("b", "for")]));
        use_case.execute(request).await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn backend_error_and_unknown_model_become_error_entries() {
        let provider = ScriptedProvider::new(&[("broken", Script::Fail), ("ok", reply("fine", 0))]);
        let use_case = use_case(&provider);

        let request = ConsensusRequest::initial(
            "Proposal",
            pairs(&[("broken", "for"), ("nowhere", "against"), ("ok", "neutral")]),
        );
        let doc = use_case.execute(request).await.unwrap();

        assert_eq!(doc.summary.requested_count, 3);
        assert_eq!(doc.summary.succeeded_count, 1);
        assert_eq!(doc.summary.errored_count, 2);
        assert!(doc.results[0].error_message.as_deref().unwrap().contains("500"));
        assert_eq!(
            doc.results[1].error_message.as_deref(),
            Some("Model 'nowhere' is not available from any configured provider")
        );
        assert!(doc.results[2].is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_backend_is_isolated() {
        let provider = ScriptedProvider::new(&[("boom", Script::Panic), ("ok", reply("fine", 0))]);
        let use_case = use_case(&provider);

        let request = ConsensusRequest::initial("Proposal", pairs(&[("boom", "for"), ("ok", "for")]));
        let doc = use_case.execute(request).await.unwrap();

        assert_eq!(doc.results.len(), 2);
        assert_eq!(doc.results[0].model, "boom");
        assert_eq!(doc.results[0].status, PairStatus::Error);
        assert!(doc.results[1].is_success());
    }

    // -- Completion policy -----------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn total_failure_completion_follows_settings() {
        let provider = ScriptedProvider::new(&[("broken", Script::Fail)]);

        let request = || ConsensusRequest::initial("Proposal", pairs(&[("broken", "for")]));

        let doc = use_case(&provider).execute(request()).await.unwrap();
        assert!(doc.consensus_complete);
        assert_eq!(doc.status, ConsensusStatus::Complete);

        let strict = use_case(&provider).with_settings(
            ConsensusSettings::default().with_complete_on_total_failure(false),
        );
        let doc = strict.execute(request()).await.unwrap();
        assert!(!doc.consensus_complete);
        assert_eq!(doc.status, ConsensusStatus::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn caller_total_steps_is_overridden() {
        let provider = ScriptedProvider::new(&[("o3", reply("ok", 0))]);
        let mut request = ConsensusRequest::initial("Proposal", pairs(&[("o3", "for")]));
        request.total_steps = 4;
        request.next_step_required = true;

        let doc = use_case(&provider).execute(request).await.unwrap();
        assert_eq!(doc.step_number, 1);
        assert_eq!(doc.total_steps, 1);
        assert!(!doc.next_step_required);
    }

    // -- Prompt shaping --------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn stance_prompts_are_applied_per_pair() {
        let provider = ScriptedProvider::new(&[("o3", reply("ok", 0)), ("flash", reply("ok", 0))]);
        let use_case = use_case(&provider);

        let mut models = pairs(&[("o3", "for"), ("o3", "against"), ("flash", "neutral")]);
        models.push(ModelStanceRequest::new("flash", "for").with_stance_prompt("Focus on X"));
        let request = ConsensusRequest::initial("Adopt GraphQL?", models);
        use_case.execute(request).await.unwrap();

        assert_eq!(provider.invocations(), 4);
        assert!(provider.request_for(SUPPORTIVE_MARKER).is_some());
        assert!(provider.request_for(CRITICAL_MARKER).is_some());
        assert!(provider.request_for(BALANCED_MARKER).is_some());

        let custom = provider.request_for("Focus on X").unwrap();
        assert_eq!(custom.model_name, "flash");
        assert!(!custom.system_prompt.unwrap().contains(SUPPORTIVE_MARKER));
        assert!(custom.prompt.contains("Adopt GraphQL?"));
    }

    #[tokio::test(start_paused = true)]
    async fn temperature_and_output_limit_follow_descriptor() {
        let provider = ScriptedProvider::with_fixed_temperature(&[("o3", reply("ok", 0))], 1.0);
        let use_case = use_case(&provider);

        let request = ConsensusRequest::initial("Proposal", pairs(&[("o3", "for")]));
        use_case.execute(request).await.unwrap();

        let sent = provider.request_for(SUPPORTIVE_MARKER).unwrap();
        assert_eq!(sent.temperature, Some(1.0));
        assert_eq!(sent.max_output_tokens, Some(4_000));
    }

    // -- Metadata --------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn metadata_records_model_used_and_continuation() {
        let provider = ScriptedProvider::new(&[("flash", reply("ok", 0)), ("o3", reply("ok", 0))]);
        let use_case = use_case(&provider);

        let request = ConsensusRequest::initial("Proposal", pairs(&[("o3", "for")]))
            .with_model("o3")
            .with_continuation("thread-42");
        let doc = use_case.execute(request).await.unwrap();
        assert_eq!(doc.metadata.model_used.as_deref(), Some("o3"));
        assert_eq!(doc.metadata.tool_name, "consensus");
        assert_eq!(doc.metadata.execution_mode, "concurrent");
        assert_eq!(doc.metadata.model_category, ModelCategory::ExtendedReasoning);
        assert_eq!(doc.metadata.models_consulted, vec!["o3:for"]);
        assert_eq!(doc.continuation_id.as_deref(), Some("thread-42"));

        // Unknown caller model falls back to the registry's preferred model
        let request = ConsensusRequest::initial("Proposal", pairs(&[("o3", "for")]))
            .with_model("not-configured");
        let doc = use_case.execute(request).await.unwrap();
        assert_eq!(doc.metadata.model_used.as_deref(), Some("flash"));
    }

    // -- Legacy steps ----------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn later_steps_report_in_progress_without_backend_calls() {
        let provider = ScriptedProvider::new(&[("o3", reply("ok", 0))]);
        let use_case = use_case(&provider);

        let mut request = ConsensusRequest::initial("Proposal", vec![]);
        request.step_number = 2;
        request.total_steps = 3;
        request.models = None;

        let doc = use_case.execute(request).await.unwrap();
        assert_eq!(doc.status, ConsensusStatus::InProgress);
        assert_eq!(doc.step_number, 2);
        assert!(!doc.consensus_complete);
        assert!(doc.results.is_empty());
        assert_eq!(provider.invocations(), 0);
    }

    #[test]
    fn legacy_continuation_status() {
        let provider = ScriptedProvider::new(&[]);
        let use_case = use_case(&provider);
        assert_eq!(use_case.legacy_continuation(1).status, ConsensusStatus::Complete);
        let later = use_case.legacy_continuation(3);
        assert_eq!(later.status, ConsensusStatus::InProgress);
        assert_eq!(later.step_number, 3);
        let json = serde_json::to_value(later).unwrap();
        assert_eq!(json["status"], "consensus_in_progress");
    }
}
