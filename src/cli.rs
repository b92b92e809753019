//! Command-line interface definitions and parsing
//!
//! The `slimselect` binary loads an option tree from a JSON file, drives one
//! widget through a scripted sequence and prints the rendered result. It is a
//! harness for the widget core, not an interactive picker.
//!
//! The sequence is always: load data, apply each `--set`, open, search,
//! disable.
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use slimselect::cli::Cli;
//!
//! let cli = Cli::parse_from(["slimselect", "colors.json", "--set", "2", "--open"]);
//! assert_eq!(cli.set, vec!["2".to_string()]);
//! assert!(cli.open);
//! ```

use crate::config::Settings;
use crate::data::MatchBy;
use crate::SlimSelectError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// What `--set` values are compared against
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchArg {
    /// Option values
    #[default]
    Value,
    /// Option display texts
    Text,
}

impl From<MatchArg> for MatchBy {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Value => Self::Value,
            MatchArg::Text => Self::Text,
        }
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "slimselect")]
#[command(about = "Drive a searchable select widget from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON file with the option tree
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Treat the native control as a multi select
    #[arg(short = 'm', long = "multiple")]
    pub multiple: bool,

    /// TOML settings file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Value to select (repeat to select several in multi mode)
    #[arg(short = 's', long = "set", value_name = "VALUE")]
    pub set: Vec<String>,

    /// Match `--set` values by value or by text
    #[arg(long = "by", value_enum, default_value_t = MatchArg::Value)]
    pub by: MatchArg,

    /// Search query applied to the open dropdown
    #[arg(short = 'q', long = "search", value_name = "QUERY")]
    pub search: Option<String>,

    /// Open the dropdown before printing
    #[arg(short = 'o', long = "open")]
    pub open: bool,

    /// Disable the widget before printing
    #[arg(short = 'd', long = "disable")]
    pub disable: bool,

    /// Keep the dropdown open after a single-mode selection
    #[arg(short = 'k', long = "keep-open")]
    pub keep_open: bool,

    /// Verbose logging (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Settings from `--config` (or defaults) with flag overrides applied
    ///
    /// # Errors
    ///
    /// Returns `SlimSelectError::Config` if the settings file cannot be loaded.
    pub fn settings(&self) -> Result<Settings, SlimSelectError> {
        let settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(if self.keep_open { settings.keep_open() } else { settings })
    }

    /// Match mode for `--set`
    #[must_use]
    pub fn match_by(&self) -> MatchBy {
        self.by.into()
    }

    /// Log level for the requested verbosity
    #[must_use]
    pub const fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
