//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "conclave";
const PROJECT_FILES: [&str; 2] = ["conclave.toml", ".conclave.toml"];
const ENV_PREFIX: &str = "CONCLAVE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CONCLAVE_` environment (`CONCLAVE_CONSENSUS__TIMEOUT_SECONDS=30`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./conclave.toml` or `./.conclave.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/conclave/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for debugging)
    pub fn describe_sources(config_path: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] {ENV_PREFIX}* environment variables"));

        if let Some(path) = config_path {
            let marker = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{marker}] Explicit: {}", path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./conclave.toml or ./.conclave.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{marker}] Global:  {}", path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}
