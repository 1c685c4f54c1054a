//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ignr - offline-first .gitignore generator
#[derive(Debug, Parser)]
#[command(
    name = "ignr",
    about = "Offline-first .gitignore generator",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Logs are written to: ~/.local/share/ignr/logs/ignr.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Shorthand for --log-level DEBUG
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available gitignore templates
    List {
        /// Filter by category (root, Global, community)
        #[arg(long)]
        category: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Search templates by name
    Search {
        /// Pattern; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        pattern: Vec<String>,
    },

    /// Generate a .gitignore from templates
    Generate {
        /// Template names; omit to pick interactively
        templates: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,

        /// Disable interactive selection
        #[arg(long)]
        no_interactive: bool,

        /// Suggest templates based on the files in the current directory
        #[arg(long)]
        suggest: bool,
    },

    /// Manage template presets (interactive when no subcommand is given)
    Preset {
        #[command(subcommand)]
        command: Option<PresetCommand>,
    },

    /// Update the cached gitignore templates
    Update,
}

#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    /// Create a preset from template names
    Create {
        /// Preset name
        name: Option<String>,

        /// Template names; omit to pick interactively
        templates: Vec<String>,

        /// Disable interactive selection
        #[arg(long)]
        no_interactive: bool,
    },

    /// Edit a preset's templates
    Edit {
        /// Preset key or name
        key: Option<String>,

        /// Replacement template names; omit to pick interactively
        templates: Vec<String>,

        /// Disable interactive selection
        #[arg(long)]
        no_interactive: bool,
    },

    /// List presets
    List,

    /// Show preset details
    Show {
        /// Preset key or name
        name: String,
    },

    /// Delete a preset
    Delete {
        /// Preset key or name; omit to pick interactively
        key: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate a .gitignore using a preset
    Use {
        /// Preset key or name; omit to pick interactively
        key: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Flags shared by every command that writes a .gitignore
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Output file path (default: .gitignore)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Append to an existing file instead of overwriting
    #[arg(long)]
    pub append: bool,

    /// Skip the generator header
    #[arg(long)]
    pub no_header: bool,

    /// Overwrite an existing file without asking
    #[arg(long)]
    pub force: bool,
}

/// Output format for listings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Log file location shown in help and on fatal errors
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ignr")
        .join("logs")
        .join("ignr.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["ignr"]).is_err());
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["ignr", "list", "--category", "Global", "--format", "json"]);
        match cli.command {
            Command::List { category, format } => {
                assert_eq!(category.as_deref(), Some("Global"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_search_joins_words() {
        let cli = Cli::parse_from(["ignr", "search", "visual", "studio"]);
        assert!(matches!(cli.command, Command::Search { pattern } if pattern == vec!["visual", "studio"]));
        assert!(Cli::try_parse_from(["ignr", "search"]).is_err());
    }

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from(["ignr", "generate", "Go", "Node", "-o", "out/.gitignore", "--force", "--no-header"]);
        match cli.command {
            Command::Generate {
                templates,
                output,
                no_interactive,
                suggest,
            } => {
                assert_eq!(templates, vec!["Go", "Node"]);
                assert_eq!(output.output, Some(PathBuf::from("out/.gitignore")));
                assert!(output.force && output.no_header && !output.append);
                assert!(!no_interactive && !suggest);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_preset_bare() {
        let cli = Cli::parse_from(["ignr", "preset"]);
        assert!(matches!(cli.command, Command::Preset { command: None }));
    }

    #[test]
    fn test_cli_parse_preset_subcommands() {
        let cli = Cli::parse_from(["ignr", "preset", "create", "Web", "Node", "--no-interactive"]);
        assert!(matches!(
            cli.command,
            Command::Preset {
                command: Some(PresetCommand::Create { name: Some(_), no_interactive: true, .. })
            }
        ));

        let cli = Cli::parse_from(["ignr", "preset", "delete", "web", "-y"]);
        assert!(matches!(
            cli.command,
            Command::Preset {
                command: Some(PresetCommand::Delete { key: Some(_), yes: true })
            }
        ));

        let cli = Cli::parse_from(["ignr", "preset", "use", "--append"]);
        assert!(matches!(
            cli.command,
            Command::Preset {
                command: Some(PresetCommand::Use { key: None, ref output })
            } if output.append
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ignr", "update", "-v", "--log-level", "trace", "-c", "/tmp/ignr.yml"]);
        assert!(cli.verbose);
        assert_eq!(cli.log_level.as_deref(), Some("trace"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ignr.yml")));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
