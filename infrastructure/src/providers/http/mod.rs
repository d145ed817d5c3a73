//! HTTP transports
//!
//! Anti-corruption layer between [`GenerateRequest`] and the wire formats of
//! the APIs we talk to. Providers own a [`ChatTransport`] and never see
//! vendor types.

mod gemini;
mod openai_compatible;

pub use gemini::GeminiClient;
pub use openai_compatible::{AuthScheme, OpenAiCompatibleClient};

use async_trait::async_trait;
use conclave_application::{GenerateRequest, ProviderError, TokenUsage};

/// Text produced by one completion call
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub usage: TokenUsage,
}

/// A wire protocol able to run one chat completion
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Run `request` against `model` (already canonicalised by the caller)
    async fn complete(&self, model: &str, request: &GenerateRequest)
    -> Result<Completion, ProviderError>;
}

/// Map a non-2xx status to a provider error
pub(crate) fn error_for_status(status: u16, body: &str) -> ProviderError {
    let detail = body.trim();
    let message = match status {
        401 | 403 => format!("Authentication failed: {detail}"),
        404 => format!("Model or endpoint not found: {detail}"),
        429 => format!("Rate limited: {detail}"),
        _ => detail.to_string(),
    };
    ProviderError::Api { status, message }
}

pub(crate) fn transport_error(error: reqwest::Error) -> ProviderError {
    ProviderError::Transport(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status() {
        assert_eq!(
            error_for_status(401, "bad key\n"),
            ProviderError::Api {
                status: 401,
                message: "Authentication failed: bad key".to_string()
            }
        );
        let rate_limited = error_for_status(429, "slow down");
        assert!(rate_limited.to_string().contains("Rate limited"));
        assert!(rate_limited.to_string().contains("429"));
        assert_eq!(
            error_for_status(500, "boom"),
            ProviderError::Api {
                status: 500,
                message: "boom".to_string()
            }
        );
    }
}
