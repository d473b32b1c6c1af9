//! CLI command definitions for rabital-config.
//!
//! Defines the inspection CLI using clap's derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rabital configuration inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workspace to resolve configuration for
    #[arg(short, long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Application directory containing shared/ (default: executable's directory)
    #[arg(short, long, global = true)]
    pub app_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective settings as YAML (default if no subcommand given)
    Show {
        /// Also print resolved tasks and debug documents
        #[arg(long)]
        all: bool,
    },

    /// List available themes
    Themes,

    /// Print a theme's content
    Theme {
        /// Theme name without extension
        name: String,
    },

    /// Print the composed shared/themes/config directories
    Paths,

    /// Watch the workspace and themes for changes, re-resolving on each
    Watch,
}
