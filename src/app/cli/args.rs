//! Command-line arguments
//!
//! Global flags control logging, colour and the config file; the subcommand
//! selects which part of the version descriptor to print or check.

use crate::core::logging::LOG_FORMATS;
use crate::core::version::{VERSION, VERSION_STRING};
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "vips-version")]
#[command(about = "Report the library version and check compatibility requirements")]
#[command(version = VERSION, long_version = VERSION_STRING)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Force colored output
    #[arg(short = 'g', long = "color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", conflicts_with = "color")]
    pub no_color: bool,

    /// Log level
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = PossibleValuesParser::new(LOG_LEVELS)
    )]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(
        short = 'o',
        long = "log-format",
        value_name = "FORMAT",
        value_parser = PossibleValuesParser::new(LOG_FORMATS)
    )]
    pub log_format: Option<String>,

    /// Color setting from the config file; command-line flags take precedence
    #[arg(skip)]
    pub config_color: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the version string (default)
    Show {
        /// Include the build timestamp
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,

        /// Output format
        #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print "MAJOR MINOR MICRO"
    Triple,

    /// Print the platform executable suffix, or NAME with the suffix appended
    Suffix {
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },

    /// Exit with status 0 if this build satisfies MAJOR[.MINOR], 1 otherwise
    Check {
        #[arg(value_name = "REQUIREMENT")]
        requirement: String,
    },

    /// Print whether this build is less than, equal to or greater than VERSION
    Compare {
        #[arg(value_name = "VERSION")]
        version: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for Command {
    fn default() -> Self {
        Command::Show {
            verbose: false,
            format: OutputFormat::Text,
        }
    }
}

impl Args {
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }

    /// --color beats --no-color beats the config file beats TTY detection
    pub fn use_color(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else if let Some(color) = self.config_color {
            color
        } else {
            std::io::stdout().is_terminal()
        }
    }
}
