//! Generate a diagram for a single file

use crate::{FormatArg, GenerateArgs, GrammarArg};
use anyhow::{bail, Context, Result};
use astgraph_core::{
    generate_file, AstGraphConfig, ExportFormat, GenerateOptions, GrammarChoice, Output,
};
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Destination meaning "print to stdout"
pub const INLINE: &str = "inline";

pub fn run(file: &Path, args: &GenerateArgs, destination: &str) -> Result<()> {
    let config_dir = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let config = AstGraphConfig::find_and_load(config_dir)?;
    let options = resolve_options(args, &config);

    if options.format == ExportFormat::Image && destination == INLINE {
        bail!("image output is binary; pass a file path with --destination");
    }

    let output = generate_file(file, &options)
        .with_context(|| format!("Failed to generate a graph for {}", file.display()))?;

    write_output(&output, destination)?;
    if destination != INLINE {
        eprintln!(
            "{} {} -> {}",
            "generated".green().bold(),
            file.display(),
            destination
        );
    }

    Ok(())
}

/// Configuration values with command-line flags applied on top
pub fn resolve_options(args: &GenerateArgs, config: &AstGraphConfig) -> GenerateOptions {
    let mut options = config.to_options();

    if let Some(grammar) = args.grammar {
        options.grammar = match grammar {
            GrammarArg::Ast => GrammarChoice::Ast,
            GrammarArg::Cst => GrammarChoice::Cst,
        };
    }
    if let Some(format) = args.format {
        options.format = match format {
            FormatArg::Dot => ExportFormat::Dot,
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Image => ExportFormat::Image,
        };
    }
    if let Some(image_format) = &args.image_format {
        options.image_format = image_format.clone();
    }
    if args.fancy {
        options.decorate = true;
    }
    if args.raw {
        options.decorate = false;
    }

    options
}

/// Print to stdout for [`INLINE`], otherwise write the file
///
/// Nothing is written unless generation already succeeded.
pub fn write_output(output: &Output, destination: &str) -> Result<()> {
    if destination == INLINE {
        if output.is_binary() {
            bail!("image output is binary; pass a file path with --destination");
        }
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    std::fs::write(destination, output.as_bytes())
        .with_context(|| format!("Failed to write {}", destination))?;
    Ok(())
}
