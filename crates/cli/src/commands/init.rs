//! Initialize .astgraph.toml configuration

use anyhow::Result;
use astgraph_core::config::CONFIG_FILE_NAME;
use astgraph_core::AstGraphConfig;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Write a default configuration, returning its path
pub fn run(path: Option<&Path>) -> Result<PathBuf> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!(
            "{} {} already exists at {}",
            "warning:".yellow().bold(),
            CONFIG_FILE_NAME,
            config_path.display()
        );
        return Ok(config_path);
    }

    let config = AstGraphConfig::default();
    config.save(&config_path)?;

    eprintln!(
        "{} {} at {}",
        "created".green().bold(),
        CONFIG_FILE_NAME,
        config_path.display()
    );
    eprintln!("\nYou can now customize the configuration and run:");
    eprintln!("  astgraph generate <file.php>");

    Ok(config_path)
}
