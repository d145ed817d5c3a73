//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a result document is rendered on the console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    /// Every response in full
    #[default]
    Full,
    /// Counts and per-pair status only
    Summary,
    /// The raw document
    Json,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: Option<FileOutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Write a markdown report of every consultation into this directory
    pub markdown_dir: Option<PathBuf>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            markdown_dir: None,
        }
    }
}
