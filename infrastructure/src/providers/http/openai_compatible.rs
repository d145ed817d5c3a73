//! OpenAI-compatible chat completions client
//!
//! Used by every backend that speaks `POST {base}/chat/completions`:
//! OpenAI itself, X.AI, DIAL, Qwen, Moonshot, Z.ai, the unified gateway,
//! self-hosted endpoints and the aggregator.

use super::{ChatTransport, Completion, error_for_status, transport_error};
use async_trait::async_trait;
use conclave_application::{GenerateRequest, ProviderError, TokenUsage};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the credential is attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// Key in a named header (e.g. DIAL's `Api-Key`)
    Header(&'static str),
}

pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    auth: AuthScheme,
    extra_headers: Vec<(&'static str, String)>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

impl OpenAiCompatibleClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
            auth: AuthScheme::Bearer,
            extra_headers: Vec::new(),
        }
    }

    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.extra_headers.push((name, value.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_body<'a>(model: &'a str, request: &'a GenerateRequest) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        ChatRequest {
            model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        }
    }

    fn parse_body(response: ChatResponse) -> Result<Completion, ProviderError> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".to_string()))?;

        let usage = response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(Completion { content, usage })
    }
}

#[async_trait]
impl ChatTransport for OpenAiCompatibleClient {
    async fn complete(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<Completion, ProviderError> {
        let url = self.endpoint();
        debug!(model, url = %url, "Sending chat completion");

        let mut builder = self.client.post(&url).json(&Self::build_body(model, request));
        if let Some(key) = &self.api_key {
            builder = match self.auth {
                AuthScheme::Bearer => builder.bearer_auth(key),
                AuthScheme::Header(name) => builder.header(name, key),
            };
        }
        for (name, value) in &self.extra_headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status.as_u16(), &body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {e}")))?;
        Self::parse_body(parsed)
    }
}
