//! Command-line interface for holm-sidak.

use crate::config::{Config, OutputFormat};
use crate::input::parse_switch;
use clap::Parser;
use holm_sidak_core::{HolmSidakError, Tail};
use std::path::PathBuf;

fn parse_tail(value: &str) -> Result<Tail, HolmSidakError> {
    value.parse()
}

#[derive(Debug, Parser)]
#[command(name = "holm-sidak")]
#[command(about = "Holm-Sidak multiple pairwise t-test comparisons among independent groups")]
#[command(version)]
pub struct Cli {
    /// Files holding one group each, in group order (label = file stem)
    pub files: Vec<PathBuf>,

    /// Inline group, "label:1.2,3.4,..." or "1.2 3.4 ..." (repeatable, after files)
    #[arg(short, long)]
    pub group: Vec<String>,

    /// Two-column "value,group" table to split into groups (after inline groups)
    #[arg(long)]
    pub grouped: Option<PathBuf>,

    /// JSON request document with groups and options
    #[arg(long, conflicts_with_all = ["files", "group", "grouped"])]
    pub request: Option<PathBuf>,

    /// Familywise significance level (0.0-1.0)
    #[arg(short, long)]
    pub alpha: Option<f64>,

    /// Tail of the test: both, left or right
    #[arg(short, long, value_parser = parse_tail)]
    pub tail: Option<Tail>,

    /// Compare group 1 against every other group (on/off, yes/no, true/false, 1/0)
    #[arg(
        long,
        value_parser = parse_switch,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub control: Option<bool>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colored terminal output
    #[arg(long)]
    pub no_color: bool,

    /// Path to config file (defaults to .holm-sidak.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    /// Only non-None optional values will override the config.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(alpha) = self.alpha {
            config.procedure.alpha = alpha;
        }

        if let Some(tail) = self.tail {
            config.procedure.tail = tail;
        }

        if let Some(control) = self.control {
            config.procedure.control = control;
        }

        if let Some(format) = self.format {
            config.output.format = format;
        }

        if self.no_color {
            config.output.colors = false;
        }
    }
}
