use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agent-catalog")]
#[command(about = "Validate agent definition files and render their catalog", long_about = None)]
#[command(version)]
#[command(after_help = "\
EXAMPLES:
  agent-catalog validate agents/            Validate and print the catalog
  agent-catalog validate --format markdown  Regenerate the README agent table
  agent-catalog list agents/                Print validated agents only
  agent-catalog config show                 Show the effective configuration")]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Additional config file, applied after the root and global configs
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

// Directory searched recursively for agent definitions, shared by every command.
#[derive(Args, Debug, Clone)]
pub struct RootArg {
    /// Root directory (defaults to $AGENT_CATALOG_ROOT, then the current directory)
    #[arg(env = "AGENT_CATALOG_ROOT", default_value = ".")]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate all agent definitions and print the catalog
    #[command(long_about = "Validate all agent definitions and print the catalog.\n\n\
        The catalog goes to stdout, warnings and errors to stderr. Exits with\n\
        status 1 when any error is recorded, or any warning with --deny-warnings.")]
    Validate {
        #[command(flatten)]
        root: RootArg,

        /// Catalog output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Treat warnings (unknown tools, missing sections) as failures
        #[arg(long)]
        deny_warnings: bool,
    },

    /// List successfully validated agents, sorted by name
    List {
        #[command(flatten)]
        root: RootArg,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration after merging all sources
    Show {
        #[command(flatten)]
        root: RootArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}
