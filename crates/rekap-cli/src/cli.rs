//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use rekap_model::ReportKind;

#[derive(Parser)]
#[command(
    name = "rekap",
    version,
    about = "Aggregate hospital discharge records into morbidity reports",
    long_about = "Aggregate per-patient discharge records into fixed-format morbidity reports.\n\n\
                  Report templates list diagnosis codes in hand-written range notation\n\
                  (e.g. \"A 06.0-.3,.5-.9\"); each line is filled with age, gender,\n\
                  category and death counts from the matching records."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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
    /// Fill a report template from discharge records.
    Run(RunArgs),

    /// Print the canonical codes of one or more code expressions.
    Expand(ExpandArgs),

    /// Show which record column each logical field resolves to.
    Fields(FieldsArgs),

    /// List the count columns of a report kind.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Report kind to produce.
    #[arg(long = "report", value_enum)]
    pub report: ReportArg,

    /// Report template CSV, one line per code expression.
    #[arg(long = "template", value_name = "CSV")]
    pub template: PathBuf,

    /// Discharge records CSV.
    #[arg(long = "records", value_name = "CSV")]
    pub records: PathBuf,

    /// Output CSV (default: <TEMPLATE>_<REPORT>.csv beside the template).
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// TOML file with extra column aliases.
    #[arg(long = "aliases", value_name = "TOML")]
    pub aliases: Option<PathBuf>,

    /// Print the filled report as JSON on stdout.
    ///
    /// No CSV is written unless --output is also given.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ExpandArgs {
    /// Code expressions, e.g. "A 15.1-16.2".
    #[arg(value_name = "EXPR", required = true)]
    pub expressions: Vec<String>,

    /// Chapter letter for expressions that carry none.
    #[arg(long = "prefix", value_name = "LETTER")]
    pub prefix: Option<char>,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Discharge records CSV.
    #[arg(long = "records", value_name = "CSV")]
    pub records: PathBuf,

    /// TOML file with extra column aliases.
    #[arg(long = "aliases", value_name = "TOML")]
    pub aliases: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Report kind to list.
    #[arg(long = "report", value_enum)]
    pub report: ReportArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportArg {
    /// 16-band age by gender grid.
    Sirs,
    /// 8-band age, gender and affiliation category report.
    Puskesad,
}

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Sirs => ReportKind::Sirs,
            ReportArg::Puskesad => ReportKind::Puskesad,
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
