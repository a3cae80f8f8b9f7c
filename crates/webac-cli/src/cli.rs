//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use webac_acl::ModeSet;
use webac_core::AgentRef;

/// WebAC access checks over a resource tree.
#[derive(Parser, Debug)]
#[command(name = "webac")]
#[command(about = "WebAC authorization checks", long_about = None, version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log decisions at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decide whether an agent holds the requested modes on a resource
    Check(CheckArgs),
    /// Show the modes an agent holds on a resource
    Modes(QueryArgs),
    /// Configuration management
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Who is asking about what.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Dataset describing the resource tree (defaults to the configured one)
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Agent WebID, or "anonymous"
    #[arg(short, long, default_value = "anonymous")]
    pub agent: AgentRef,

    /// Target resource IRI (append `?ext=acl` to address its ACL)
    #[arg(short, long)]
    pub target: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `webac check`.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Agent and target
    #[command(flatten)]
    pub query: QueryArgs,

    /// Requested modes, comma-separated (read, write, append, control)
    #[arg(short, long, default_value = "read")]
    pub mode: ModeSet,
}

/// `webac config` actions.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Write a default config file
    Init {
        /// Where to write it (defaults to the standard location)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration, overrides applied
    Show,
    /// Print one value by dotted key (e.g., `authorizer.max_depth`)
    Get {
        /// Dotted key
        key: String,
    },
}
