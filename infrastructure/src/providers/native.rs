//! Factories for catalog-backed families
//!
//! Every native API family and the aggregator share one factory type; the
//! family decides the base URL, the auth scheme and the model table.

use super::catalog::CatalogProvider;
use super::catalogs::catalog_for;
use super::http::{AuthScheme, ChatTransport, GeminiClient, OpenAiCompatibleClient};
use conclave_application::{Construction, ProviderContext, ProviderFactory};
use conclave_domain::ProviderFamily;
use std::sync::Arc;

const DEFAULT_DIAL_HOST: &str = "https://core.dialx.ai";
const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";
const KILO_URL: &str = "https://api.kilocodex.com/v1";

/// Factory for a family with a built-in model catalog
#[derive(Debug, Clone, Copy)]
pub struct NativeFactory {
    family: ProviderFamily,
}

impl NativeFactory {
    pub fn new(family: ProviderFamily) -> Self {
        Self { family }
    }

    /// Base URL of the OpenAI-compatible API behind `family`
    fn base_url(context: &ProviderContext<'_>) -> Option<String> {
        let url = match context.family {
            ProviderFamily::OpenAi => "https://api.openai.com/v1".to_string(),
            ProviderFamily::Xai => "https://api.x.ai/v1".to_string(),
            ProviderFamily::Dial => {
                let host = context
                    .config
                    .get_config("DIAL_API_HOST")
                    .unwrap_or_else(|| DEFAULT_DIAL_HOST.to_string());
                format!("{}/openai", host.trim_end_matches('/'))
            }
            ProviderFamily::Qwen => "https://dashscope.aliyuncs.com/compatible-mode/v1".to_string(),
            ProviderFamily::Moonshot => "https://api.moonshot.cn/v1".to_string(),
            ProviderFamily::Zai => "https://api.z.ai/api/paas/v4".to_string(),
            ProviderFamily::OpenRouter if context.credential_key == Some("KILO_API_KEY") => {
                KILO_URL.to_string()
            }
            ProviderFamily::OpenRouter => OPENROUTER_URL.to_string(),
            _ => return None,
        };
        Some(url)
    }

    fn transport(context: &ProviderContext<'_>, credential: String) -> Option<Arc<dyn ChatTransport>> {
        if context.family == ProviderFamily::Google {
            return Some(Arc::new(GeminiClient::new(credential)));
        }

        let mut client = OpenAiCompatibleClient::new(Self::base_url(context)?, Some(credential));
        match context.family {
            ProviderFamily::Dial => client = client.with_auth(AuthScheme::Header("Api-Key")),
            ProviderFamily::OpenRouter => {
                client = client
                    .with_header("HTTP-Referer", "https://github.com/conclave-dev/conclave")
                    .with_header("X-Title", "conclave");
            }
            _ => {}
        }
        Some(Arc::new(client))
    }
}

impl ProviderFactory for NativeFactory {
    fn name(&self) -> &str {
        self.family.as_str()
    }

    fn construct(&self, context: &ProviderContext<'_>) -> Construction {
        let Some(catalog) = catalog_for(self.family) else {
            return Construction::unavailable(format!("no model catalog for {}", self.family));
        };
        let Some(credential) = context.credential.clone() else {
            return Construction::unavailable("missing credential");
        };
        let Some(transport) = Self::transport(context, credential) else {
            return Construction::unavailable(format!("no endpoint known for {}", self.family));
        };

        Construction::Constructed(Arc::new(CatalogProvider::new(
            catalog,
            transport,
            Arc::clone(&context.restrictions),
        )))
    }
}
