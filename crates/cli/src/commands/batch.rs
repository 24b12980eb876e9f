//! Generate diagrams for many files in parallel

use crate::commands::generate::resolve_options;
use crate::GenerateArgs;
use anyhow::{bail, Result};
use astgraph_core::generate::output_extension;
use astgraph_core::{discover_php_sources, generate_files_parallel, AstGraphConfig};
use colored::Colorize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome counts of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub generated: usize,
    pub failed: usize,
}

pub fn run(inputs: &[PathBuf], args: &GenerateArgs, out_dir: &Path) -> Result<BatchSummary> {
    let start = Instant::now();
    let config = AstGraphConfig::find_and_load(Path::new("."))?;
    let options = resolve_options(args, &config);

    let files = discover_php_sources(inputs, &config.discovery.ignore)?;
    if files.is_empty() {
        eprintln!("{} no PHP files found", "warning:".yellow().bold());
        return Ok(BatchSummary::default());
    }

    std::fs::create_dir_all(out_dir)?;
    let extension = output_extension(&options).to_string();
    let base = common_root(&files);

    let mut summary = BatchSummary::default();
    let mut targets = HashSet::new();
    for (path, result) in generate_files_parallel(&files, &options) {
        let written = result.map_err(anyhow::Error::from).and_then(|output| {
            let target = output_path(out_dir, &base, &path, &extension);
            if !targets.insert(target.clone()) {
                bail!("{} was already written for another input", target.display());
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, output.as_bytes())?;
            Ok(target)
        });

        match written {
            Ok(target) => {
                summary.generated += 1;
                tracing::debug!(
                    source = %path.display(),
                    target = %target.display(),
                    "wrote graph"
                );
            }
            Err(e) => {
                summary.failed += 1;
                eprintln!("{} {}: {}", "error:".red().bold(), path.display(), e);
            }
        }
    }

    eprintln!(
        "{} {} file(s), {} failed ({:.1}s)",
        "generated".green().bold(),
        summary.generated,
        summary.failed,
        start.elapsed().as_secs_f64()
    );

    if summary.generated == 0 {
        bail!("no graph could be generated");
    }

    Ok(summary)
}

/// `<out_dir>/<path below base>` with the extension replaced
///
/// Sources outside `base` keep only their file name.
pub fn output_path(out_dir: &Path, base: &Path, source: &Path, extension: &str) -> PathBuf {
    let mut relative = match source.strip_prefix(base) {
        Ok(rest) if !rest.as_os_str().is_empty() => rest.to_path_buf(),
        _ => source
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("graph")),
    };
    relative.set_extension(extension);
    out_dir.join(relative)
}

/// Deepest directory containing every file
pub fn common_root(files: &[PathBuf]) -> PathBuf {
    let mut root = match files.first().and_then(|f| f.parent()) {
        Some(parent) => parent.to_path_buf(),
        None => return PathBuf::new(),
    };
    for file in &files[1..] {
        while !file.starts_with(&root) {
            if !root.pop() {
                return PathBuf::new();
            }
        }
    }
    root
}
