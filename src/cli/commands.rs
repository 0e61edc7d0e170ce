//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - paths: show resolved directories
//! - list/show/delete: inspect named configurations
//! - init: write an agent configuration completed with defaults
//! - defaults: show the builtin default configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// WLBB - configuration tool for Well Light Berry Bush agents
#[derive(Parser, Debug)]
#[command(name = "wlbb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional settings file path
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the directories used by WLBB
    Paths,

    /// List the named configurations
    List,

    /// Print a named configuration
    Show {
        /// Configuration name
        name: String,
    },

    /// Create or complete the configuration of a simple agent
    Init {
        /// Agent name (3 to 20 characters of a-z, 0-9 and _)
        agent: String,
    },

    /// Delete a named configuration
    Delete {
        /// Configuration name
        name: String,
    },

    /// Print the builtin default configuration
    Defaults,
}
