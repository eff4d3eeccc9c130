//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// StationJSON - convert FDSN StationXML metadata to StationJSON
///
/// Reads StationXML from a file, standard input or an FDSN station web
/// service and writes the equivalent StationJSON document.
#[derive(Parser, Debug)]
#[command(
    name = "stationjson",
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
    #[arg(short, long, global = true, env = "STATIONJSON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

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
    /// Convert a StationXML document to StationJSON
    Convert(ConvertArgs),

    /// Validate a StationJSON document against the schema
    Validate(ValidateArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the convert command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// StationXML file to convert (`-` for standard input)
    #[arg(value_name = "INPUT", conflicts_with = "url")]
    pub input: Option<PathBuf>,

    /// Fetch StationXML from this URL instead of a file
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Module identifier written to the document
    #[arg(short, long)]
    pub module: Option<String>,

    /// Validate the converted document against the bundled schema
    #[arg(long)]
    pub validate: bool,

    /// Write the document to a file instead of standard output
    #[arg(long = "save-to", value_name = "FILE")]
    pub save_to: Option<PathBuf>,

    /// Indentation width for pretty JSON output
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Print network/station/channel/stage counts instead of the document
    #[arg(long)]
    pub summary: bool,
}

/// FDSN station web-service query parameters
#[derive(Parser, Debug, Default, Clone)]
pub struct QueryArgs {
    /// Network code(s), comma separated
    #[arg(long, value_name = "NET", conflicts_with_all = ["input", "url"])]
    pub network: Option<String>,

    /// Station code(s), comma separated
    #[arg(long, value_name = "STA", requires = "network")]
    pub station: Option<String>,

    /// Location code(s), comma separated
    #[arg(long, value_name = "LOC", requires = "network")]
    pub location: Option<String>,

    /// Channel code(s), comma separated
    #[arg(long, value_name = "CHA", requires = "network")]
    pub channel: Option<String>,

    /// Level of detail requested from the service
    #[arg(long, value_enum, requires = "network")]
    pub level: Option<QueryLevel>,
}

impl QueryArgs {
    /// Whether any query parameter was given
    pub fn is_set(&self) -> bool {
        self.network.is_some()
    }
}

/// Detail level of a station query
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum QueryLevel {
    Network,
    Station,
    Channel,
    Response,
}

impl From<QueryLevel> for stationjson_core::http::Level {
    fn from(level: QueryLevel) -> Self {
        use stationjson_core::http::Level;
        match level {
            QueryLevel::Network => Level::Network,
            QueryLevel::Station => Level::Station,
            QueryLevel::Channel => Level::Channel,
            QueryLevel::Response => Level::Response,
        }
    }
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the StationJSON document (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validation strictness mode
    #[arg(short, long, value_enum, default_value = "strict")]
    pub strict: StrictMode,

    /// Validate against this schema file instead of the bundled one
    #[arg(long, value_name = "SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Show detailed validation errors
    #[arg(long)]
    pub detailed: bool,
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
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show current configuration values
    Show(ConfigShowArgs),

    /// Print the configuration file that would be loaded
    Path,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Destination (defaults to ./stationjson.toml)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// Compact JSON output
    Json,
    /// YAML output
    Yaml,
    /// Indented JSON output
    JsonPretty,
}

/// Validation strictness
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrictMode {
    /// Schema, timestamp and epoch rules
    Strict,
    /// Schema and timestamp rules
    Partial,
    /// Schema only
    Basic,
}

impl From<StrictMode> for stationjson_schemas::ValidationMode {
    fn from(mode: StrictMode) -> Self {
        use stationjson_schemas::ValidationMode;
        match mode {
            StrictMode::Strict => ValidationMode::Strict,
            StrictMode::Partial => ValidationMode::Partial,
            StrictMode::Basic => ValidationMode::Basic,
        }
    }
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
        !self.no_color && std::io::stdout().is_terminal()
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
    fn test_convert_file_args() {
        let cli = Cli::parse_from([
            "stationjson", "-vv", "convert", "inventory.xml", "--module", "ORFEUS", "--indent", "2",
        ]);
        assert_eq!(cli.verbosity_level(), 2);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.input, Some(PathBuf::from("inventory.xml")));
                assert_eq!(args.module.as_deref(), Some("ORFEUS"));
                assert_eq!(args.indent, Some(2));
                assert!(!args.query.is_set());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_convert_query_args() {
        let cli = Cli::parse_from([
            "stationjson", "convert", "--network", "NL", "--station", "HGN", "--level", "channel",
        ]);
        match cli.command {
            Commands::Convert(args) => {
                assert!(args.query.is_set());
                assert_eq!(args.query.station.as_deref(), Some("HGN"));
                assert_eq!(args.query.level, Some(QueryLevel::Channel));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_station_requires_network() {
        assert!(Cli::try_parse_from(["stationjson", "convert", "--station", "HGN"]).is_err());
        assert!(Cli::try_parse_from(["stationjson", "convert", "in.xml", "--url", "http://x"]).is_err());
    }

    #[test]
    fn test_quiet_overrides_verbosity() {
        let cli = Cli::parse_from(["stationjson", "--quiet", "validate", "out.json"]);
        assert_eq!(cli.verbosity_level(), 0);
        match cli.command {
            Commands::Validate(args) => assert_eq!(args.strict, StrictMode::Strict),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
