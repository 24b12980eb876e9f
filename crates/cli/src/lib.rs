//! AstGraph CLI library, exposed for integration tests

pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "astgraph")]
#[command(about = "Draw PHP syntax trees as Graphviz diagrams", long_about = None)]
#[command(version = astgraph_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log pipeline progress on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a diagram for one PHP file
    Generate {
        /// PHP source file
        file: PathBuf,

        #[command(flatten)]
        options: GenerateArgs,

        /// Where to write the result: "inline" (stdout) or a file path
        #[arg(short, long, default_value = "inline")]
        destination: String,
    },

    /// Generate diagrams for many files in parallel
    Batch {
        /// PHP files or directories to scan
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        options: GenerateArgs,

        /// Directory receiving one output file per input
        #[arg(short, long)]
        out_dir: PathBuf,
    },

    /// Initialize .astgraph.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },
}

/// Flags overriding `.astgraph.toml`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Grammar: abstract tree or concrete parser tree
    #[arg(short = 'p', long = "parser", value_enum)]
    pub grammar: Option<GrammarArg>,

    /// Output type
    #[arg(short = 't', long = "type", value_enum)]
    pub format: Option<FormatArg>,

    /// Image format passed to Graphviz (svg, png, ...)
    #[arg(short = 'f', long = "format")]
    pub image_format: Option<String>,

    /// Decorate the tree with labels and shapes, overriding `decorate = false`
    /// in the config (decoration is already on by default)
    #[arg(short = 'c', long, conflicts_with = "raw")]
    pub fancy: bool,

    /// Export the tree without decoration
    #[arg(long)]
    pub raw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GrammarArg {
    Ast,
    Cst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    Dot,
    Json,
    Image,
}
