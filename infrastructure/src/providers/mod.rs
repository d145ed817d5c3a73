//! Backend providers
//!
//! Concrete [`ModelProvider`](conclave_application::ModelProvider)
//! implementations and the factories the registry builds them from:
//!
//! | Family | Factory | Transport |
//! |---|---|---|
//! | google | [`NativeFactory`] | Gemini `generateContent` |
//! | openai, xai, dial, qwen, moonshot, zai, openrouter | [`NativeFactory`] | OpenAI-compatible |
//! | gateway | [`GatewayFactory`] | OpenAI-compatible |
//! | custom | [`CustomFactory`] | OpenAI-compatible |
//! | cli | [`CliBridgeFactory`] | local subprocess |

pub mod catalog;
pub mod catalogs;
pub mod cli_bridge;
pub mod endpoint;
pub mod http;
pub mod native;

pub use catalog::{CatalogProvider, ModelCatalog};
pub use cli_bridge::{CliBridgeFactory, CliBridgeProvider, CliTool};
pub use endpoint::{CustomFactory, EndpointProvider, GatewayFactory, ModelScope};
pub use native::NativeFactory;

use conclave_application::{ConfigLookup, ProviderRegistry};
use conclave_domain::ProviderFamily;
use std::sync::Arc;
use tracing::{debug, info};

/// Register every backend family with `registry`.
///
/// Registration is cheap; whether a family is usable is decided lazily by
/// the registry from the configured credentials and endpoints. CLI tools
/// are the exception: each is registered only when its binary is found,
/// so several tools can share the CLI family.
pub fn configure_providers(registry: &ProviderRegistry, config: &dyn ConfigLookup) {
    for family in ProviderFamily::PRIORITY_ORDER {
        match family {
            ProviderFamily::Gateway => registry.register(family, Arc::new(GatewayFactory), false),
            ProviderFamily::Custom => registry.register(family, Arc::new(CustomFactory), false),
            ProviderFamily::Cli => register_cli_tools(registry, config),
            _ => registry.register(family, Arc::new(NativeFactory::new(family)), false),
        }
    }

    info!(
        families = registry.get_available_families().len(),
        "Configured providers"
    );
}

fn register_cli_tools(registry: &ProviderRegistry, config: &dyn ConfigLookup) {
    let mut registered = 0;
    for tool in CliTool::ALL {
        let factory = CliBridgeFactory::new(tool);
        if !factory.is_installed(config) {
            debug!(tool = tool.model_name(), binary = %tool.binary(config), "CLI tool not installed");
            continue;
        }
        registry.register(ProviderFamily::Cli, Arc::new(factory), registered > 0);
        registered += 1;
    }
    if registered == 0 {
        registry.unregister(ProviderFamily::Cli);
    }
}
