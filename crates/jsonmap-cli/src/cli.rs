//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Jsonmap CLI - Declarative JSON-to-JSON mapping
///
/// Maps JSON or YAML documents through templates that bind output fields to
/// dotted paths in the source, with nested templates and defaults.
#[derive(Parser, Debug)]
#[command(
    name = "jsonmap",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "JSONMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Map a source document through a template
    Map(MapArgs),

    /// Load a template and check every field specification
    Validate(ValidateArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the map command
#[derive(Parser, Debug)]
pub struct MapArgs {
    /// Template file, or a template name looked up in `templates_dir`
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: String,

    /// Source document (JSON or YAML); `-` reads stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Write the mapped document to a file instead of stdout
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Output format (defaults to `output.format` from configuration)
    #[arg(short, long, value_enum)]
    pub format: Option<DocumentFormat>,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Template file, or a template name looked up in `templates_dir`
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: String,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file
    #[arg(long, default_value = ".jsonmap.yaml")]
    pub path: PathBuf,

    /// Force overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: DocumentFormat,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Document formats for input detection and output
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stderr().is_terminal()
    }
}

impl DocumentFormat {
    /// Parse a configuration value (`json`, `yaml`, `yml`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_map_defaults_to_stdin() {
        let cli = Cli::parse_from(["jsonmap", "map", "--template", "t.json"]);
        match cli.command {
            Commands::Map(args) => {
                assert_eq!(args.template, "t.json");
                assert_eq!(args.input, PathBuf::from("-"));
                assert!(args.format.is_none());
                assert!(!args.pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_map_all_options() {
        let cli = Cli::parse_from([
            "jsonmap", "-vv", "map", "-t", "orders", "in.yaml", "--save-to", "out.json",
            "--pretty", "--format", "yaml",
        ]);
        assert_eq!(cli.verbosity_level(), 2);
        match cli.command {
            Commands::Map(args) => {
                assert_eq!(args.input, PathBuf::from("in.yaml"));
                assert_eq!(args.save_to, Some(PathBuf::from("out.json")));
                assert_eq!(args.format, Some(DocumentFormat::Yaml));
                assert!(args.pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            no_color: false,
            command: Commands::Validate(ValidateArgs {
                template: "t.json".to_string(),
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_document_format_from_name() {
        assert_eq!(DocumentFormat::from_name("JSON"), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_name("yml"), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_name("toml"), None);
    }
}
