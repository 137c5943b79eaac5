//! CLI definitions and entry point.

use crate::remote::EntityKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Command-line companion for GitLab-hosted repositories
#[derive(Parser, Debug)]
#[command(name = "lab", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Hosted service to match remotes against (default: gitlab.com)
    #[arg(long, global = true, env = "LAB_HOST")]
    pub host: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Append JSON-formatted logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the project, issue or merge request page in a browser
    Browse(BrowseArgs),

    /// Show the remote that belongs to the hosted service
    Remote(RemoteArgs),

    /// Write a title and description in your editor
    Compose(ComposeArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// What `lab browse` opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseTarget {
    Project,
    Entity(EntityKind),
}

impl BrowseTarget {
    #[must_use]
    pub const fn entity(self) -> Option<EntityKind> {
        match self {
            Self::Project => None,
            Self::Entity(kind) => Some(kind),
        }
    }
}

fn parse_browse_target(value: &str) -> Result<BrowseTarget, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "project" | "p" | "repo" => Ok(BrowseTarget::Project),
        other => other
            .parse::<EntityKind>()
            .map(BrowseTarget::Entity)
            .map_err(|_| {
                format!("unknown target '{value}' (expected project, issue or merge-request)")
            }),
    }
}

/// Arguments for the browse command.
#[derive(Args, Debug, Clone)]
pub struct BrowseArgs {
    /// project, issue or merge-request (aliases: i, mr)
    #[arg(value_parser = parse_browse_target, default_value = "project")]
    pub target: BrowseTarget,

    /// Issue or merge request number
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub id: Option<u64>,

    /// Print the URL instead of opening a browser
    #[arg(long, short = 'p')]
    pub print: bool,
}

/// Arguments for the remote command.
#[derive(Args, Debug, Clone, Default)]
pub struct RemoteArgs {
    /// List every configured remote and whether it matches
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Arguments for the compose command.
#[derive(Args, Debug, Clone)]
pub struct ComposeArgs {
    /// Topic of the message, e.g. issue or merge-request
    pub topic: String,

    /// Initial message instead of the default template
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Keep the scratch file after printing the result
    #[arg(long)]
    pub keep: bool,
}

/// Arguments for the config command.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// List all merged values (default)
    #[arg(long, short = 'l')]
    pub list: bool,

    /// Print one value
    #[arg(long, short = 'g', value_name = "KEY", conflicts_with = "list")]
    pub get: Option<String>,

    /// Show config file locations
    #[arg(long, conflicts_with_all = ["list", "get"])]
    pub path: bool,
}

/// Arguments for the completions command.
#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: ShellType,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellType {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    #[value(name = "powershell")]
    #[value(alias = "pwsh")]
    /// `PowerShell`
    PowerShell,
    /// Elvish
    Elvish,
}
