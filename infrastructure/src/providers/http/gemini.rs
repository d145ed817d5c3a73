//! Gemini `generateContent` client

use super::{ChatTransport, Completion, error_for_status, transport_error};
use async_trait::async_trait;
use conclave_application::{GenerateRequest, ProviderError, TokenUsage};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(GEMINI_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Endpoint for `model`, without the key
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    fn build_body<'a>(request: &'a GenerateRequest) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            system_instruction: request.system_prompt.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        }
    }

    fn parse_body(response: GenerateContentResponse) -> Result<Completion, ProviderError> {
        let content: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| ProviderError::InvalidResponse("No candidates in response".to_string()))?;

        let usage = response
            .usage_metadata
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(Completion { content, usage })
    }
}

#[async_trait]
impl ChatTransport for GeminiClient {
    async fn complete(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<Completion, ProviderError> {
        let url = self.endpoint(model);
        debug!(model, url = %url, "Sending generateContent");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::build_body(request))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {e}")))?;
        Self::parse_body(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new("key");
        assert_eq!(
            client.endpoint("gemini-2.5-pro"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_body_shape() {
        let request = GenerateRequest::new("gemini-2.5-flash", "Evaluate")
            .with_system_prompt("Be balanced")
            .with_temperature(0.2)
            .with_max_output_tokens(1024);
        let body = serde_json::to_value(GeminiClient::build_body(&request)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Evaluate");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be balanced");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn test_parse_body_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}],
                "usageMetadata": {"promptTokenCount": 7, "candidatesTokenCount": 2}
            }"#,
        )
        .unwrap();
        let completion = GeminiClient::parse_body(response).unwrap();
        assert_eq!(completion.content, "Hello world");
        assert_eq!(completion.usage.input_tokens, 7);
        assert_eq!(completion.usage.output_tokens, 2);
    }

    #[test]
    fn test_parse_body_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(GeminiClient::parse_body(response).is_err());
    }
}
