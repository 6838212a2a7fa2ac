//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list: fetch the tool catalog once and print it
//! - layout: show the grid geometry for a width

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolboard - a terminal dashboard for gateway tools
#[derive(Parser, Debug)]
#[command(name = "toolboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Gateway origin, overriding the config file (e.g. http://localhost:8000)
    #[arg(short, long, global = true)]
    pub origin: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch the tool catalog once and print it
    List {
        /// Print the raw JSON payload instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show cards per row and column span for a width
    Layout {
        /// Width in logical units
        width: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        // No args should result in None command (TUI mode)
        let cli = Cli::try_parse_from(["toolboard"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        assert!(cli.origin.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["toolboard", "-v"]).unwrap();
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_cli_config_option() {
        let cli = Cli::try_parse_from(["toolboard", "-c", "/path/to/toolboard.yml"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/toolboard.yml")));
    }

    #[test]
    fn test_cli_origin_option_is_global() {
        let cli = Cli::try_parse_from(["toolboard", "list", "--origin", "http://127.0.0.1:9000"]).unwrap();
        assert_eq!(cli.origin.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(cli.command, Some(Commands::List { json: false }));
    }

    #[test]
    fn test_list_json() {
        let cli = Cli::try_parse_from(["toolboard", "list", "--json"]).unwrap();
        assert_eq!(cli.command, Some(Commands::List { json: true }));
    }

    #[test]
    fn test_layout_command() {
        let cli = Cli::try_parse_from(["toolboard", "layout", "1200"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Layout { width: 1200 }));
    }

    #[test]
    fn test_layout_requires_number() {
        assert!(Cli::try_parse_from(["toolboard", "layout", "wide"]).is_err());
    }

    #[test]
    fn test_help_works() {
        Cli::command().debug_assert();
    }
}
