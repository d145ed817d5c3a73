//! Configuration for conclave
//!
//! Two concerns live here:
//!
//! - File configuration ([`ConfigLoader`], [`FileConfig`]) merged from
//!   several sources. The priority order (highest to lowest):
//!   1. `CONCLAVE_` prefixed environment variables
//!   2. `--config <path>` specified file
//!   3. Project root: `./conclave.toml` or `./.conclave.toml`
//!   4. XDG config: `$XDG_CONFIG_HOME/conclave/config.toml`
//!   5. Default values
//! - Credential lookup ([`EnvConfig`], [`LayeredConfig`]) implementing the
//!   application's `ConfigLookup` port.

mod file_config;
mod loader;
mod lookup;

pub use file_config::{
    ConfigValidationError, FileConfig, FileConsensusConfig, FileOutputConfig, FileOutputFormat,
};
pub use loader::ConfigLoader;
pub use lookup::{EnvConfig, LayeredConfig};
