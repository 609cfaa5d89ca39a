//! CLI argument definitions for the MARCXML normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use marc_transform::Rule;

#[derive(Parser)]
#[command(
    name = "marc-normalize",
    version,
    about = "Normalize a MARCXML export into one import file per record",
    long_about = "Read a MARCXML export, clean up headings, titles, extents and dates,\n\
                  and write each accepted record as <call number>.xml wrapped in a\n\
                  MARC21 slim collection envelope."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a MARCXML export into per-record files.
    Convert(ConvertArgs),

    /// List the cleanup rules and the fields they touch.
    Rules,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// MARCXML export to read.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Only emit records whose call number starts with this prefix.
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// File listing call numbers already imported, one per line.
    #[arg(long = "skip-list", value_name = "PATH")]
    pub skip_list: Option<PathBuf>,

    /// Directory receiving the <call number>.xml files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Process every record without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write records that failed to be written to this JSON file.
    #[arg(long = "failure-report", value_name = "PATH")]
    pub failure_report: Option<PathBuf>,

    /// Turn off an optional cleanup rule (repeatable).
    #[arg(long = "disable-rule", value_enum, value_name = "RULE")]
    pub disable_rule: Vec<RuleArg>,
}

/// CLI names for the optional cleanup rules. Required rules always run.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleArg {
    HeadingPunctuation,
    CorporateNamePeriods,
    TitleCleanup,
    ProvenancePunctuation,
    ExtentCleanup,
    DateInference,
}

impl From<RuleArg> for Rule {
    fn from(value: RuleArg) -> Self {
        match value {
            RuleArg::HeadingPunctuation => Rule::HeadingPunctuation,
            RuleArg::CorporateNamePeriods => Rule::CorporateNamePeriods,
            RuleArg::TitleCleanup => Rule::TitleCleanup,
            RuleArg::ProvenancePunctuation => Rule::ProvenancePunctuation,
            RuleArg::ExtentCleanup => Rule::ExtentCleanup,
            RuleArg::DateInference => Rule::DateInference,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
