//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Checkout and commit wiki pages stored on a Trac server.
///
/// First use the config command to configure the server; after that the
/// checkout and commit commands are available.
#[derive(Parser, Debug)]
#[command(name = "tracwiki")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Working directory (defaults to the current directory)
    #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Make a configuration file for a Trac server
    ///
    /// Existing page records are kept, so a working directory can be pointed
    /// at a new address without checking everything out again.
    ///
    /// Examples:
    ///   tracwiki config https://trac.example.org/project
    ///   tracwiki config https://trac.example.org/project alice secret
    Config {
        /// Base URL of the Trac installation
        url: String,

        /// User name (empty for anonymous access)
        #[arg(env = "TRACWIKI_USER", default_value = "", hide_default_value = true)]
        user: String,

        /// Password
        #[arg(
            env = "TRACWIKI_PASSWORD",
            default_value = "",
            hide_default_value = true,
            hide_env_values = true
        )]
        pass: String,
    },

    /// Retrieve wiki pages in plain text format
    ///
    /// Without a page name every page on the server is checked out.
    Checkout {
        /// Name of the page
        page: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Commit edited wiki pages
    ///
    /// Without a page name every tracked page is committed.
    Commit {
        /// Name of the page
        page: Option<String>,

        /// Change comment stored with the new version
        #[arg(short, long)]
        message: Option<String>,

        /// Mark the change as a minor edit
        #[arg(long)]
        minor: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show which tracked pages have local modifications (no network access)
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
