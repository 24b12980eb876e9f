//! Configuration file parsing for .astgraph.toml

use crate::export::ExportFormat;
use crate::generate::{GenerateOptions, GrammarChoice};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up from the input's directory
pub const CONFIG_FILE_NAME: &str = ".astgraph.toml";

/// Main configuration structure for .astgraph.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AstGraphConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Importer and dispatch table: "ast" or "cst"
    #[serde(default)]
    pub grammar: GrammarChoice,

    /// Run the decoration pipeline before export
    #[serde(default = "default_true")]
    pub decorate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output representation: "dot", "json" or "image"
    #[serde(default)]
    pub format: ExportFormat,

    /// Graphviz output format for images
    #[serde(default = "default_image_format")]
    pub image_format: String,

    /// Graphviz program used to render images
    #[serde(default = "default_renderer")]
    pub renderer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Paths skipped by `batch`, in gitignore syntax
    #[serde(default = "default_ignore_paths")]
    pub ignore: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_image_format() -> String {
    "svg".to_string()
}

fn default_renderer() -> String {
    "dot".to_string()
}

fn default_ignore_paths() -> Vec<String> {
    vec![
        "vendor/".to_string(),
        "node_modules/".to_string(),
        ".git/".to_string(),
        "cache/".to_string(),
    ]
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            grammar: GrammarChoice::default(),
            decorate: true,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            image_format: default_image_format(),
            renderer: default_renderer(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore_paths(),
        }
    }
}

impl AstGraphConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AstGraphConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Find and load .astgraph.toml from `start_dir` or its ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "loading configuration");
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Generation settings before command-line overrides
    pub fn to_options(&self) -> GenerateOptions {
        GenerateOptions {
            grammar: self.general.grammar,
            decorate: self.general.decorate,
            format: self.export.format,
            image_format: self.export.image_format.clone(),
            renderer: PathBuf::from(&self.export.renderer),
        }
    }
}
