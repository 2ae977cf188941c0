//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the order exporter
//! using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Order Exporter - completed orders to CSV with exported-flag tracking
#[derive(Parser, Debug)]
#[command(name = "order-exporter")]
#[command(version, about, long_about = None)]
#[command(author = "Order Exporter Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "order-exporter.toml",
        env = "ORDER_EXPORTER_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ORDER_EXPORTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export unexported completed orders to CSV and flag them
    Export(commands::export::ExportArgs),

    /// Remove the exported flag from all completed orders
    Unset(commands::unset::UnsetArgs),

    /// Show which completed orders are flagged as exported
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["order-exporter", "export", "--token", "abc"]);
        assert_eq!(cli.config, "order-exporter.toml");
        match cli.command {
            Commands::Export(args) => assert_eq!(args.token.as_deref(), Some("abc")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["order-exporter", "--config", "custom.toml", "status"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["order-exporter", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_unset() {
        let cli = Cli::parse_from(["order-exporter", "unset", "--yes"]);
        match cli.command {
            Commands::Unset(args) => assert!(args.yes),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["order-exporter", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["order-exporter", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_stdout_conflicts_with_output_dir() {
        let result = Cli::try_parse_from([
            "order-exporter",
            "export",
            "--stdout",
            "--output-dir",
            "out",
        ]);
        assert!(result.is_err());
    }
}
