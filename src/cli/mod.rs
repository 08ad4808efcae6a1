//! CLI module for the Oluś syntax tools
//!
//! This module provides the `olus` command-line interface, a thin debugging driver around
//! [`olus_syntax`].
//!
//! ## Commands
//!
//! - `lex <file>` - Print the token stream
//! - `parse <file> [--json]` - Print the syntax tree
//! - `check <file>` - Report syntax diagnostics
//! - `query <file> <pattern>` - Print the nodes matching a query pattern
//!
//! Global flags `--flat` and `--tab-width` select the dialect and how tabs are measured.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use olus_syntax::ParseConfig;
use thiserror::Error;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Syntax tools for the Oluś programming language
#[derive(Parser, Debug)]
#[command(name = "olus")]
#[command(version = VERSION)]
#[command(about = "Syntax tools for the Oluś programming language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Ignore indentation: no blocks, leading whitespace is insignificant
    #[arg(long, global = true)]
    pub flat: bool,

    /// Columns a tab counts for when measuring indentation
    #[arg(long, global = true, value_name = "N", default_value_t = 4)]
    pub tab_width: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream
    Lex {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the syntax tree
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Emit the tree and diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report syntax diagnostics
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the nodes matching a query pattern such as `procedure.head`
    Query {
        /// Source file to search
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// `kind`, `parent.field` or `parent.field:kind`
        #[arg(value_name = "PATTERN")]
        pattern: String,
    },
}

impl Cli {
    /// Parse configuration selected by the global flags.
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::default()
            .with_indentation(!self.flat)
            .with_tab_width(self.tab_width)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.parse_config();
    tracing::debug!(command = ?cli.command, ?config, "executing command");

    match &cli.command {
        Command::Lex { file } => commands::lex_file(&file.to_string_lossy(), &config),
        Command::Parse { file, json } => commands::parse_file(&file.to_string_lossy(), &config, *json),
        Command::Check { file } => commands::check_file(&file.to_string_lossy(), &config),
        Command::Query { file, pattern } => commands::query_file(&file.to_string_lossy(), pattern, &config),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_lex() {
        let cli = Cli::try_parse_from(["olus", "lex", "test.olus"]).unwrap();
        assert!(matches!(cli.command, Command::Lex { .. }));
        assert!(!cli.flat);
        assert_eq!(cli.tab_width, 4);
    }

    #[test]
    fn test_cli_parse_json() {
        let cli = Cli::try_parse_from(["olus", "parse", "test.olus", "--json"]).unwrap();
        if let Command::Parse { json, file } = cli.command {
            assert!(json);
            assert_eq!(file, PathBuf::from("test.olus"));
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["olus", "check", "test.olus", "--flat", "--tab-width", "8"]).unwrap();
        assert!(matches!(cli.command, Command::Check { .. }));
        let config = cli.parse_config();
        assert!(!config.with_indentation);
        assert_eq!(config.tab_width, 8);
    }

    #[test]
    fn test_cli_parse_query() {
        let cli = Cli::try_parse_from(["olus", "query", "test.olus", "procedure.head"]).unwrap();
        if let Command::Query { pattern, .. } = cli.command {
            assert_eq!(pattern, "procedure.head");
        } else {
            panic!("Expected Query command");
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["olus"]).is_err());
        assert!(Cli::try_parse_from(["olus", "fmt", "x"]).is_err());
    }
}
